//! HTTP inbound adapter exposing the REST endpoints under `/api`.
//!
//! Handlers depend only on the driving ports held in [`state::HttpState`];
//! [`configure`] registers every route together with the extractor error
//! handlers.

pub mod accounts;
pub mod error;
pub mod health;
pub mod pets;
pub mod practice;
pub mod schemas;
pub mod state;
pub mod stats;
pub mod students;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register the `/api` scope and the JSON, query and path error handlers.
///
/// Health probes are mounted separately because they do not depend on
/// [`state::HttpState`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use recordkeeper::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    error::extractor_config(cfg);
    cfg.service(
        web::scope("/api")
            .service(students::list_students)
            .service(students::get_student)
            .service(students::create_student)
            .service(students::replace_student)
            .service(students::update_student)
            .service(students::delete_student)
            .service(users::list_users)
            .service(users::list_user_pets)
            .service(users::get_user)
            .service(users::create_user)
            .service(users::replace_user)
            .service(users::update_user)
            .service(users::delete_user)
            .service(pets::list_pets)
            .service(pets::create_pet_from_form)
            .service(pets::create_pet)
            .service(pets::get_pet)
            .service(pets::replace_pet)
            .service(pets::update_pet)
            .service(pets::delete_pet)
            .service(accounts::signup)
            .service(accounts::login)
            .service(stats::user_count)
            .service(stats::user_ages)
            .service(stats::pet_count)
            .service(practice::message)
            .service(practice::echo),
    );
}
