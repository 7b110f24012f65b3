//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;

use crate::Trace;
use crate::domain::DEFAULT_MAX_ID_ATTEMPTS;
use crate::inbound::http::configure;
use crate::inbound::http::state::{HttpState, RecordStores};
use crate::outbound::memory::{MemoryPetStore, MemoryStudentStore, MemoryUserStore};
use crate::outbound::random::ThreadRandomSource;

/// Handler state over fresh, empty in-memory stores.
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

/// Full API application over `state`, wrapped in the trace middleware.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure)
}
