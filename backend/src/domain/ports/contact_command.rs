//! Driving port for the contact form.

use async_trait::async_trait;

use crate::domain::{ContactMessage, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactCommand: Send + Sync {
    /// Forward a validated message to the site operator.
    async fn send(&self, message: ContactMessage) -> Result<(), Error>;
}
