//! Shared helpers for HTTP integration tests over in-memory stores.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use mockable::DefaultClock;
use recordkeeper::Trace;
use recordkeeper::domain::DEFAULT_MAX_ID_ATTEMPTS;
use recordkeeper::inbound::http::configure;
use recordkeeper::inbound::http::state::{HttpState, RecordStores};
use recordkeeper::outbound::memory::{MemoryPetStore, MemoryStudentStore, MemoryUserStore};
use recordkeeper::outbound::random::ThreadRandomSource;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Fresh handler state over empty in-memory stores.
pub fn memory_state() -> HttpState {
    let stores = RecordStores {
        students: Arc::new(MemoryStudentStore::default()),
        users: Arc::new(MemoryUserStore::default()),
        pets: Arc::new(MemoryPetStore::default()),
    };
    HttpState::from_stores(
        stores,
        Arc::new(ThreadRandomSource),
        Arc::new(DefaultClock),
        DEFAULT_MAX_ID_ATTEMPTS,
    )
}

/// Initialise the full `/api` surface behind the trace middleware.
pub async fn init_app()
-> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

/// Send `request` and decode the JSON body, asserting the status first.
pub async fn call_json<S, T>(app: &S, request: Request, expected: u16) -> T
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    T: DeserializeOwned,
{
    let response = test::call_service(app, request).await;
    let status = response.status().as_u16();
    let body = test::read_body(response).await;
    assert_eq!(
        status,
        expected,
        "unexpected status; body: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("JSON body")
}

/// Field name reported by an error envelope.
pub fn error_field(body: &Value) -> Option<&str> {
    body.pointer("/details/field").and_then(Value::as_str)
}
