//! Spawns a recordkeeper server over in-memory stores on an ephemeral port.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use recordkeeper::Trace;
use recordkeeper::domain::DEFAULT_MAX_ID_ATTEMPTS;
use recordkeeper::inbound::http::configure;
use recordkeeper::inbound::http::state::{HttpState, RecordStores};
use recordkeeper::outbound::memory::{MemoryPetStore, MemoryStudentStore, MemoryUserStore};
use recordkeeper::outbound::random::ThreadRandomSource;
use records_client::RecordsClient;

/// Start a server bound to `127.0.0.1:0` and return a client pointing at it.
///
/// Must run inside an actix system, e.g. `#[actix_web::test]`.
pub fn spawn_backend() -> RecordsClient {
    let stores = RecordStores {
        students: Arc::new(MemoryStudentStore::default()),
        users: Arc::new(MemoryUserStore::default()),
        pets: Arc::new(MemoryPetStore::default()),
    };
    let state = web::Data::new(HttpState::from_stores(
        stores,
        Arc::new(ThreadRandomSource),
        Arc::new(DefaultClock),
        DEFAULT_MAX_ID_ATTEMPTS,
    ));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .configure(configure)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind ephemeral port");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    RecordsClient::new(&format!("http://{addr}")).expect("client")
}
