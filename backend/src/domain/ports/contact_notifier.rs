//! Port for delivering contact form messages to the site operator.

use async_trait::async_trait;

use crate::domain::ContactMessage;

use super::define_port_error;

define_port_error! {
    /// Errors raised by contact notifier adapters.
    pub enum ContactNotifierError {
        /// The message could not be delivered.
        Delivery { message: String } => "contact message delivery failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactNotifier: Send + Sync {
    /// Deliver one contact message.
    async fn notify(&self, message: &ContactMessage) -> Result<(), ContactNotifierError>;
}
