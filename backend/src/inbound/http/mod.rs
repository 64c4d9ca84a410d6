//! HTTP inbound adapter exposing the blog's pages as JSON view models.
//!
//! [`configure`] registers every page handler; the caller supplies
//! `web::Data<HttpState>` and wraps the scope in the session middleware.

pub mod accounts;
pub mod comments;
pub mod error;
pub mod forms;
pub mod health;
pub mod pages;
pub mod posts;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod viewer;
pub mod views;

use actix_web::web;

use crate::domain::Error;

pub use error::ApiResult;

/// Form extraction settings: undecodable bodies become `invalid_request`.
fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|error, _req| Error::invalid_request(error.to_string()).into())
}

/// Register the page and form handlers.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let app = App::new().configure(blog::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        .service(posts::home)
        .service(posts::show_post)
        .service(posts::add_comment)
        .service(posts::new_post_form)
        .service(posts::create_post)
        .service(posts::edit_post_form)
        .service(posts::update_post)
        .service(posts::delete_post)
        .service(comments::edit_comment_form)
        .service(comments::update_comment)
        .service(comments::delete_comment)
        .service(accounts::register_form)
        .service(accounts::register)
        .service(accounts::login_form)
        .service(accounts::login)
        .service(accounts::logout)
        .service(pages::about)
        .service(pages::contact_form)
        .service(pages::send_contact);
}
