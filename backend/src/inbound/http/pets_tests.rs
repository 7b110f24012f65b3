//! Tests for the pet handlers.

use super::*;
use crate::inbound::http::test_utils::{memory_state, test_app};
use crate::inbound::http::users::UserResponse;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::json;

/// Register an account through the API and yield its id.
macro_rules! create_owner {
    ($app:expr, $username:expr) => {{
        let request = actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"username": $username, "password": "pw"}))
            .to_request();
        let user: UserResponse = actix_test::call_and_read_body_json(&$app, request).await;
        user.id
    }};
}

fn create_request(uri: &str, body: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post().uri(uri).set_json(body)
}

#[rstest]
#[case("/api/pets")]
#[case("/api/pets/new")]
#[actix_web::test]
async fn both_create_routes_register_a_healthy_pet(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let owner = create_owner!(app, "ada");

    let body = json!({"ownerId": owner, "name": "Rex", "type": "Dog", "age": 3});
    let response = actix_test::call_service(&app, create_request(uri, body).to_request()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let pet: PetResponse = actix_test::read_body_json(response).await;
    assert_eq!(pet.owner_id, owner);
    assert_eq!(pet.species, Species::Dog);
    assert_eq!(pet.status, HealthStatus::Healthy);
    assert_eq!(pet.age, Some(3));
}

#[actix_web::test]
async fn unknown_owner_is_rejected() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let body = json!({
        "ownerId": UserId::random().to_string(),
        "name": "Rex",
        "species": "dog"
    });

    let response =
        actix_test::call_service(&app, create_request("/api/pets", body).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(response).await;
    assert_eq!(payload["details"]["field"], "ownerId");
}

#[rstest]
#[case(json!({"name": "Rex", "species": "dog"}), "ownerId")]
#[case(json!({"ownerId": "nope", "name": "Rex", "species": "dog"}), "ownerId")]
#[case(json!({"ownerId": "OWNER", "species": "dog"}), "name")]
#[case(json!({"ownerId": "OWNER", "name": "Rex"}), "species")]
#[case(json!({"ownerId": "OWNER", "name": "Rex", "species": "dragon"}), "species")]
#[case(json!({"ownerId": "OWNER", "name": "Rex", "species": "cat", "status": "dead"}), "status")]
#[case(json!({"ownerId": "OWNER", "name": "Rex", "species": "cat", "gender": 1}), "gender")]
#[actix_web::test]
async fn create_reports_the_offending_field(#[case] body: Value, #[case] field: &str) {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let owner = create_owner!(app, "ada");
    let body: Value = serde_json::from_str(&body.to_string().replace("OWNER", &owner))
        .expect("body stays valid JSON");

    let response =
        actix_test::call_service(&app, create_request("/api/pets", body).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(response).await;
    assert_eq!(payload["details"]["field"], field);
}

#[actix_web::test]
async fn pets_can_be_listed_per_owner() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let ada = create_owner!(app, "ada");
    let grace = create_owner!(app, "grace");
    for (owner, name) in [(&ada, "Rex"), (&grace, "Tom"), (&ada, "Polly")] {
        let body = json!({"ownerId": owner, "name": name, "species": "other"});
        actix_test::call_service(&app, create_request("/api/pets", body).to_request()).await;
    }

    let filtered = actix_test::TestRequest::get()
        .uri(&format!("/api/pets?userId={ada}"))
        .to_request();
    let by_query: Vec<PetResponse> = actix_test::call_and_read_body_json(&app, filtered).await;
    let nested = actix_test::TestRequest::get()
        .uri(&format!("/api/users/{ada}/pets"))
        .to_request();
    let by_path: Vec<PetResponse> = actix_test::call_and_read_body_json(&app, nested).await;
    let everything = actix_test::TestRequest::get().uri("/api/pets").to_request();
    let all: Vec<PetResponse> = actix_test::call_and_read_body_json(&app, everything).await;

    let names: Vec<_> = by_query.iter().map(|pet| pet.name.as_str()).collect();
    assert_eq!(names, ["Rex", "Polly"]);
    assert_eq!(by_query, by_path);
    assert_eq!(all.len(), 3);
}

#[actix_web::test]
async fn patch_updates_status_and_keeps_the_rest() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let owner = create_owner!(app, "ada");
    let body = json!({"ownerId": owner, "name": "Rex", "species": "dog", "breed": "Beagle"});
    let created: PetResponse = actix_test::call_and_read_body_json(
        &app,
        create_request("/api/pets", body).to_request(),
    )
    .await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/api/pets/{}", created.id))
        .set_json(json!({"status": "sick"}))
        .to_request();
    let updated: PetResponse = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(updated.status, HealthStatus::Sick);
    assert_eq!(updated.breed.as_deref(), Some("Beagle"));
    assert_eq!(updated.name, "Rex");
}

#[actix_web::test]
async fn put_requires_the_core_fields() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let owner = create_owner!(app, "ada");
    let body = json!({"ownerId": owner, "name": "Rex", "species": "dog"});
    let created: PetResponse = actix_test::call_and_read_body_json(
        &app,
        create_request("/api/pets", body).to_request(),
    )
    .await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/pets/{}", created.id))
        .set_json(json!({"name": "Max"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn deleting_an_owner_leaves_their_pets() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let owner = create_owner!(app, "ada");
    let body = json!({"ownerId": owner, "name": "Rex", "species": "dog"});
    let created: PetResponse = actix_test::call_and_read_body_json(
        &app,
        create_request("/api/pets", body).to_request(),
    )
    .await;

    let delete = actix_test::TestRequest::delete()
        .uri(&format!("/api/users/{owner}"))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, delete).await.status(),
        StatusCode::OK
    );

    let get = actix_test::TestRequest::get()
        .uri(&format!("/api/pets/{}", created.id))
        .to_request();
    let pet: PetResponse = actix_test::call_and_read_body_json(&app, get).await;
    assert_eq!(pet.owner_id, owner);
}

#[actix_web::test]
async fn delete_missing_pet_is_not_found() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/pets/{}", PetId::random()))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload: Value = actix_test::read_body_json(response).await;
    assert_eq!(payload["code"], "not_found");
}
