//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod cache_control;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Every account and task route, mounted under `/api`.
///
/// Handlers expect [`state::HttpState`] in app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use taskflow::inbound::http::{api_scope, configure_extractors};
///
/// let _app = App::new().configure(configure_extractors).service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(users::signup)
        .service(users::login)
        .service(users::profile)
        .service(tasks::create_task)
        .service(tasks::list_tasks)
        .service(tasks::update_task)
        .service(tasks::delete_task)
}

/// Install extractor configs so malformed JSON, query strings and paths
/// produce the standard `invalid_request` payload.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(validation::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(validation::path_error_handler));
}
