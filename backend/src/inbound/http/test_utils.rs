//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::UserService;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users;
use crate::outbound::memory::InMemoryUserRepository;

/// State backed by a fresh, empty in-memory repository.
pub fn memory_state() -> HttpState {
    let service = UserService::new(Arc::new(InMemoryUserRepository::new()));
    HttpState::from_service(Arc::new(service))
}

/// App exposing the users routes over `state`, wrapped in the trace
/// middleware the server installs.
pub fn users_app(
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
        .configure(users::configure)
}
