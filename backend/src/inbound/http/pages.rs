//! Static pages and the contact form.

use actix_web::{get, post, web};

use super::ApiResult;
use super::forms::ContactForm;
use super::schemas::ErrorSchema;
use super::session::SessionContext;
use super::state::HttpState;
use super::viewer::Viewer;
use super::views::{FormState, FormView, Layout, PageView, with_layout};

/// Confirmation shown after a contact message is accepted.
pub const CONTACT_SENT_MESSAGE: &str = "Successfully sent your message.";

/// Static about page.
#[utoipa::path(
    get,
    path = "/about",
    responses((status = 200, description = "About page", body = PageView)),
    tags = ["pages"]
)]
#[get("/about")]
pub async fn about(viewer: Viewer, session: SessionContext) -> web::Json<PageView> {
    web::Json(PageView {
        layout: Layout::new(&viewer, &session),
        heading: "About Me".to_owned(),
        message: None,
    })
}

/// Empty contact form.
#[utoipa::path(
    get,
    path = "/contact",
    responses((status = 200, description = "Contact form", body = FormView)),
    tags = ["pages"]
)]
#[get("/contact")]
pub async fn contact_form(viewer: Viewer, session: SessionContext) -> web::Json<FormView> {
    web::Json(FormView {
        layout: Layout::new(&viewer, &session),
        form: FormState::empty("contact", "/contact"),
    })
}

/// Forward a contact message to the site operator.
///
/// Open to anonymous visitors.
#[utoipa::path(
    post,
    path = "/contact",
    request_body(content = ContactForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Message accepted", body = PageView),
        (status = 400, description = "Form validation failed", body = ErrorSchema),
        (status = 503, description = "Delivery unavailable", body = ErrorSchema)
    ),
    tags = ["pages"]
)]
#[post("/contact")]
pub async fn send_contact(
    state: web::Data<HttpState>,
    viewer: Viewer,
    session: SessionContext,
    form: web::Form<ContactForm>,
) -> ApiResult<web::Json<PageView>> {
    let message = form
        .validate()
        .map_err(|err| with_layout(err, &viewer, &session))?;
    state.contact.send(message).await?;
    Ok(web::Json(PageView {
        layout: Layout::new(&viewer, &session),
        heading: "Contact Me".to_owned(),
        message: Some(CONTACT_SENT_MESSAGE.to_owned()),
    }))
}
