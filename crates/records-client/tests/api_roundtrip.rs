//! Client calls against a live server.

mod support;

use records_client::{
    ClientError, FormState, FormStatus, ListView, LoginFlow, LoginStep, PetDetails, PetInput,
    PetUpdate, SignupFlow, SignupStep, StudentInput, StudentUpdate, UserInput,
};
use serde_json::json;

use support::spawn_backend;

#[actix_web::test]
async fn student_pages_follow_the_server() {
    let client = spawn_backend();

    let mut form = FormState::<StudentInput>::new();
    *form.draft_mut() = StudentInput {
        name: "Ada".to_owned(),
        age: 12,
        grade: "7".to_owned(),
    };
    let created = form
        .submit(|draft| {
            let client = client.clone();
            async move { client.create_student(&draft).await }
        })
        .await
        .expect("student created");
    assert_eq!(form.status(), &FormStatus::Succeeded);
    assert_eq!(created.name, "Ada");

    let updated = client
        .update_student(
            &created.id,
            &StudentUpdate {
                grade: Some("8".to_owned()),
                ..StudentUpdate::default()
            },
        )
        .await
        .expect("patched");
    assert_eq!(updated.grade, "8");
    assert_eq!(updated.age, 12);

    let mut page = ListView::new();
    page.load(client.list_students()).await;
    assert_eq!(page.items(), &[updated.clone()]);

    client.delete_student(&created.id).await.expect("deleted");
    let err = client
        .delete_student(&created.id)
        .await
        .expect_err("second delete");
    assert_eq!(err.status(), Some(404));

    page.load(client.list_students()).await;
    assert!(page.items().is_empty());
}

#[actix_web::test]
async fn invalid_forms_keep_their_draft() {
    let client = spawn_backend();

    let mut form = FormState::<StudentInput>::new();
    form.draft_mut().name = "Ada".to_owned();
    let saved = form
        .submit(|draft| {
            let client = client.clone();
            async move { client.create_student(&draft).await }
        })
        .await;

    assert!(saved.is_none());
    assert!(matches!(form.status(), FormStatus::Failed(message) if message.contains("age")));
    assert_eq!(form.draft().name, "Ada");
}

#[actix_web::test]
async fn signup_and_login_flows_complete() {
    let client = spawn_backend();

    let mut signup = SignupFlow::new();
    signup.submit_credentials(&client, "ada", "lovelace").await;
    assert!(matches!(signup.step(), SignupStep::AwaitingAge { .. }));
    signup.submit_age(&client, 36).await;
    let SignupStep::Complete { id, code, .. } = signup.step().clone() else {
        panic!("signup should complete: {:?}", signup.error());
    };

    let mut login = LoginFlow::new();
    login.submit_credentials(&client, "ada", "lovelace").await;
    assert!(matches!(login.step(), LoginStep::AwaitingAuthKey { .. }));

    login.submit_auth_key(&client, "??????").await;
    assert!(matches!(login.step(), LoginStep::AwaitingAuthKey { .. }));
    assert!(login.error().is_some());

    login.submit_auth_key(&client, &code).await;
    assert!(matches!(
        login.step(),
        LoginStep::Authenticated { id: Some(logged_in), .. } if *logged_in == id
    ));
}

#[actix_web::test]
async fn pets_belong_to_users() {
    let client = spawn_backend();

    let owner = client
        .create_user(&UserInput {
            username: "grace".to_owned(),
            password: "cobol".to_owned(),
            age: Some(85),
            role: None,
        })
        .await
        .expect("owner");

    let pet = client
        .create_pet(&PetInput {
            owner_id: owner.id.clone(),
            name: "Rex".to_owned(),
            species: "dog".to_owned(),
            details: PetDetails::default(),
        })
        .await
        .expect("pet");
    assert_eq!(pet.status.as_deref(), Some("healthy"));

    let sick = client
        .update_pet(
            &pet.id,
            &PetUpdate {
                details: PetDetails {
                    status: Some("sick".to_owned()),
                    ..PetDetails::default()
                },
                ..PetUpdate::default()
            },
        )
        .await
        .expect("updated");
    assert_eq!(sick.status.as_deref(), Some("sick"));

    assert_eq!(client.user_pets(&owner.id).await.expect("pets"), vec![sick.clone()]);
    assert_eq!(
        client.list_pets(Some(&owner.id)).await.expect("pets"),
        vec![sick]
    );

    let err = client
        .create_pet(&PetInput {
            owner_id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".to_owned(),
            name: "Tom".to_owned(),
            species: "cat".to_owned(),
            details: PetDetails::default(),
        })
        .await
        .expect_err("unknown owner");
    let ClientError::Api { status, body } = err else {
        panic!("expected an API error");
    };
    assert_eq!(status, 400);
    assert_eq!(body.field(), Some("ownerId"));
}

#[actix_web::test]
async fn stats_and_practice_routes_answer() {
    let client = spawn_backend();

    assert_eq!(client.user_count().await.expect("count").count, 0);
    assert_eq!(client.pet_count().await.expect("count").count, 0);
    assert!(client.user_ages().await.expect("ages").youngest.is_none());

    let greeting = client.message().await.expect("message");
    assert_eq!(greeting.message, "Hello from the backend!");

    let echoed = client.echo(&json!({"a": [1, 2]})).await.expect("echo");
    assert_eq!(echoed, json!({"received": {"a": [1, 2]}}));
}
