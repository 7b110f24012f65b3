//! Pets and their owners exercised through the HTTP surface.

mod support;

use actix_web::test::TestRequest;
use serde_json::{Value, json};

use support::{call_json, error_field, init_app};

#[actix_web::test]
async fn pets_are_listed_per_owner_and_outlive_them() {
    let app = init_app().await;

    let mut owners = Vec::new();
    for username in ["ada", "grace"] {
        let owner: Value = call_json(
            &app,
            TestRequest::post()
                .uri("/api/users")
                .set_json(json!({"username": username, "password": "pw"}))
                .to_request(),
            201,
        )
        .await;
        owners.push(owner["id"].as_str().expect("id").to_owned());
    }
    let (ada, grace) = (&owners[0], &owners[1]);

    let rex: Value = call_json(
        &app,
        TestRequest::post()
            .uri("/api/pets")
            .set_json(json!({"ownerId": ada, "name": "Rex", "species": "dog", "age": 3}))
            .to_request(),
        201,
    )
    .await;
    assert_eq!(rex["status"], "healthy");
    let _: Value = call_json(
        &app,
        TestRequest::post()
            .uri("/api/pets/new")
            .set_json(json!({"ownerId": grace, "name": "Tom", "type": "cat"}))
            .to_request(),
        201,
    )
    .await;

    let adas: Vec<Value> = call_json(
        &app,
        TestRequest::get()
            .uri(&format!("/api/users/{ada}/pets"))
            .to_request(),
        200,
    )
    .await;
    assert_eq!(adas, vec![rex.clone()]);

    let _: Value = call_json(
        &app,
        TestRequest::delete()
            .uri(&format!("/api/users/{ada}"))
            .to_request(),
        200,
    )
    .await;

    let all: Vec<Value> = call_json(&app, TestRequest::get().uri("/api/pets").to_request(), 200).await;
    assert_eq!(all.len(), 2);

    let count: Value = call_json(
        &app,
        TestRequest::get().uri("/api/stats/pets/count").to_request(),
        200,
    )
    .await;
    assert_eq!(count["message"], "There are 2 pets on record");
}

#[actix_web::test]
async fn pets_need_an_existing_owner() {
    let app = init_app().await;

    let err: Value = call_json(
        &app,
        TestRequest::post()
            .uri("/api/pets")
            .set_json(json!({
                "ownerId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "name": "Rex",
                "species": "dog",
            }))
            .to_request(),
        400,
    )
    .await;

    assert_eq!(error_field(&err), Some("ownerId"));
}
