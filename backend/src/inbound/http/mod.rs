//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod envelope;
pub mod error;
pub mod health;
pub mod orders;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api/v1` scope with its extractor settings.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use delivery_service::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::path_config())
        .app_data(validation::query_config())
        .service(
            web::scope("/api/v1")
                .service(users::sign_in)
                .service(users::sign_out)
                .service(users::private)
                .service(orders::create_order)
                .service(orders::get_order)
                .service(orders::transition_order)
                .service(orders::cancel_order)
                .service(orders::get_sender_order)
                .service(orders::cancel_sender_order),
        );
}
