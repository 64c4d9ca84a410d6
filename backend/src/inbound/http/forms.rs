//! URL-encoded form bodies and their conversion into validated domain inputs.
//!
//! Every field defaults to empty so a missing field is reported like a blank
//! one, through the same per-field messages, instead of failing extraction.
//! Validation failures echo the submitted values except passwords.

use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use zeroize::Zeroize;

use crate::domain::{
    CommentText, ContactInput, ContactMessage, Error, LoginCredentials, PostDraft, PostInput,
    Registration, RegistrationInput,
};

/// `POST /register`.
///
/// Password fields are wiped on drop.
#[derive(Deserialize, ToSchema)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl RegisterForm {
    /// Check every field and build the registration.
    /// Field messages come back as an `invalid_request` error.
    pub fn validate(&self) -> Result<Registration, Error> {
        Registration::try_from_input(RegistrationInput {
            username: &self.username,
            email: &self.email,
            password: &self.password,
            confirm_password: &self.confirm_password,
        })
        .map_err(|errors| {
            errors.into_error(
                "register",
                json!({ "username": self.username, "email": self.email }),
            )
        })
    }
}

impl Drop for RegisterForm {
    fn drop(&mut self) {
        self.password.zeroize();
        self.confirm_password.zeroize();
    }
}

/// `POST /login`. `name` accepts a display name or an email address.
#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// Require both fields and build the credentials.
    pub fn validate(&self) -> Result<LoginCredentials, Error> {
        LoginCredentials::try_from_parts(&self.name, &self.password)
            .map_err(|errors| errors.into_error("login", json!({ "name": self.name })))
    }
}

impl Drop for LoginForm {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// `POST /new-post` and `POST /edit-post/{id}`.
#[derive(Debug, Deserialize, ToSchema, Default)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub img_url: String,
    pub body: String,
}

impl PostForm {
    /// Check title, subtitle, image URL and body.
    pub fn validate(&self) -> Result<PostDraft, Error> {
        PostDraft::try_from_input(PostInput {
            title: &self.title,
            subtitle: &self.subtitle,
            author: &self.author,
            img_url: &self.img_url,
            body: &self.body,
        })
        .map_err(|errors| {
            errors.into_error(
                "post",
                json!({
                    "title": self.title,
                    "subtitle": self.subtitle,
                    "author": self.author,
                    "img_url": self.img_url,
                    "body": self.body,
                }),
            )
        })
    }
}

/// `POST /post/{id}` and `POST /edit-comment/{id}`.
#[derive(Debug, Deserialize, ToSchema, Default)]
#[serde(default)]
pub struct CommentForm {
    pub comment_text: String,
}

impl CommentForm {
    /// Reject an empty comment.
    pub fn validate(&self) -> Result<CommentText, Error> {
        CommentText::try_from_input(&self.comment_text).map_err(|errors| {
            errors.into_error("comment", json!({ "comment_text": self.comment_text }))
        })
    }
}

/// `POST /contact`.
#[derive(Debug, Deserialize, ToSchema, Default)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    /// Check the sender details and message.
    pub fn validate(&self) -> Result<ContactMessage, Error> {
        ContactMessage::try_from_input(ContactInput {
            name: &self.name,
            email: &self.email,
            phone: &self.phone,
            message: &self.message,
        })
        .map_err(|errors| {
            errors.into_error(
                "contact",
                json!({
                    "name": self.name,
                    "email": self.email,
                    "phone": self.phone,
                    "message": self.message,
                }),
            )
        })
    }
}
