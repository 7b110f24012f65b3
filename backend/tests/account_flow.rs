//! Signup, login and statistics exercised through the HTTP surface.

mod support;

use actix_web::test::TestRequest;
use serde_json::{Value, json};

use support::{call_json, init_app};

fn post(uri: &str, body: Value) -> actix_http::Request {
    TestRequest::post().uri(uri).set_json(body).to_request()
}

#[actix_web::test]
async fn signup_then_login_with_the_issued_key() {
    let app = init_app().await;

    let prompt: Value = call_json(
        &app,
        post("/api/signup", json!({"username": "grace", "password": "cobol"})),
        200,
    )
    .await;
    assert!(prompt.get("code").is_none());

    let created: Value = call_json(
        &app,
        post(
            "/api/signup",
            json!({"username": "grace", "password": "cobol", "age": 85}),
        ),
        201,
    )
    .await;
    let code = created["code"].as_str().expect("auth key").to_owned();
    assert_eq!(code.len(), 6);
    assert!(
        code.bytes()
            .all(|byte| byte.is_ascii_uppercase() || byte.is_ascii_digit())
    );

    let user: Value = call_json(
        &app,
        TestRequest::get()
            .uri(&format!("/api/users/{}", created["id"].as_str().expect("id")))
            .to_request(),
        200,
    )
    .await;
    assert_eq!(user["role"], "user");
    assert_eq!(user["code"], code.as_str());
    assert!(user.get("password").is_none());

    let key_prompt: Value = call_json(
        &app,
        post("/api/login", json!({"username": "grace", "password": "cobol"})),
        200,
    )
    .await;
    assert!(key_prompt.get("id").is_none());

    let done: Value = call_json(
        &app,
        post(
            "/api/login",
            json!({"username": "grace", "password": "cobol", "authKey": format!(" {code} ")}),
        ),
        200,
    )
    .await;
    assert_eq!(done["id"], created["id"]);
    assert!(
        done["message"]
            .as_str()
            .expect("message")
            .to_lowercase()
            .contains("congrats")
    );
}

#[actix_web::test]
async fn wrong_key_is_unauthorised() {
    let app = init_app().await;
    let _: Value = call_json(
        &app,
        post("/api/signup", json!({"username": "ada", "password": "pw", "age": 36})),
        201,
    )
    .await;

    let err: Value = call_json(
        &app,
        post(
            "/api/login",
            json!({"username": "ada", "password": "pw", "authKey": "??????"}),
        ),
        401,
    )
    .await;

    assert_eq!(err["code"], "unauthorized");
}

#[actix_web::test]
async fn stats_follow_the_stored_records() {
    let app = init_app().await;

    let empty: Value = call_json(
        &app,
        TestRequest::get().uri("/api/stats/users/ages").to_request(),
        200,
    )
    .await;
    assert_eq!(empty, json!({"message": "0 users reported an age", "count": 0}));

    for (username, age) in [("ada", Some(36)), ("grace", Some(40)), ("linus", None)] {
        let _: Value = call_json(
            &app,
            post(
                "/api/users",
                json!({"username": username, "password": "pw", "age": age}),
            ),
            201,
        )
        .await;
    }

    let count: Value = call_json(
        &app,
        TestRequest::get().uri("/api/stats/users/count").to_request(),
        200,
    )
    .await;
    assert_eq!(
        count,
        json!({"message": "There are 3 registered users", "count": 3})
    );

    let ages: Value = call_json(
        &app,
        TestRequest::get().uri("/api/stats/users/ages").to_request(),
        200,
    )
    .await;
    assert_eq!(ages["count"], 2);
    assert_eq!(ages["youngest"], 36);
    assert_eq!(ages["oldest"], 40);
    assert_eq!(ages["average"], 38.0);

    let pets: Value = call_json(
        &app,
        TestRequest::get().uri("/api/stats/pets/count").to_request(),
        200,
    )
    .await;
    assert_eq!(pets["count"], 0);
}

#[actix_web::test]
async fn search_matches_part_of_the_username() {
    let app = init_app().await;
    for username in ["Ada Lovelace", "Grace Hopper"] {
        let _: Value = call_json(
            &app,
            post("/api/users", json!({"username": username, "password": "pw"})),
            201,
        )
        .await;
    }

    let found: Vec<Value> = call_json(
        &app,
        TestRequest::get()
            .uri("/api/users?search=hop")
            .to_request(),
        200,
    )
    .await;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["username"], "Grace Hopper");
}

#[actix_web::test]
async fn usernames_are_stored_as_given() {
    let app = init_app().await;

    let created: Value = call_json(
        &app,
        post("/api/users", json!({"username": " ada ", "password": "pw"})),
        201,
    )
    .await;
    assert_eq!(created["username"], " ada ");

    let fetched: Value = call_json(
        &app,
        TestRequest::get()
            .uri(&format!("/api/users/{}", created["id"].as_str().expect("id")))
            .to_request(),
        200,
    )
    .await;
    assert_eq!(fetched["username"], " ada ");

    let rejected: Value = call_json(
        &app,
        post("/api/users", json!({"username": "   ", "password": "pw"})),
        400,
    )
    .await;
    assert_eq!(rejected["details"]["field"], "username");
}

#[actix_web::test]
async fn signup_validation_matches_the_users_route() {
    let app = init_app().await;

    let via_signup: Value = call_json(
        &app,
        post("/api/signup", json!({"username": "ada", "password": "", "age": 30})),
        400,
    )
    .await;
    let via_users: Value = call_json(
        &app,
        post("/api/users", json!({"username": "ada", "password": ""})),
        400,
    )
    .await;

    assert_eq!(via_signup["details"], via_users["details"]);
    assert_eq!(
        via_signup["details"],
        json!({"field": "password", "code": "invalid_value"})
    );
}
