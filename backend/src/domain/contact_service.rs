//! Contact form delivery service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{ContactCommand, ContactNotifier};
use crate::domain::{ContactMessage, Error};

/// Contact service implementing [`ContactCommand`].
#[derive(Clone)]
pub struct ContactService<N> {
    notifier: Arc<N>,
}

impl<N> ContactService<N> {
    /// Create a new service delivering through `notifier`.
    pub fn new(notifier: Arc<N>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl<N> ContactCommand for ContactService<N>
where
    N: ContactNotifier,
{
    async fn send(&self, message: ContactMessage) -> Result<(), Error> {
        self.notifier
            .notify(&message)
            .await
            .map_err(|err| Error::service_unavailable(err.to_string()))?;
        info!(from = %message.email, "contact message delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{ContactNotifierError, MockContactNotifier};
    use crate::domain::{ContactInput, ErrorCode};

    fn message() -> ContactMessage {
        ContactMessage::try_from_input(ContactInput {
            name: "Bob",
            email: "bob@y.org",
            phone: "",
            message: "Hello",
        })
        .expect("valid message")
    }

    #[tokio::test]
    async fn forwards_messages_to_the_notifier() {
        let mut notifier = MockContactNotifier::new();
        notifier
            .expect_notify()
            .withf(|msg| msg.name == "Bob")
            .times(1)
            .return_once(|_| Ok(()));
        let service = ContactService::new(Arc::new(notifier));

        service.send(message()).await.expect("delivered");
    }

    #[tokio::test]
    async fn delivery_failures_are_unavailable() {
        let mut notifier = MockContactNotifier::new();
        notifier
            .expect_notify()
            .return_once(|_| Err(ContactNotifierError::delivery("smtp down")));
        let service = ContactService::new(Arc::new(notifier));

        let err = service.send(message()).await.expect_err("failed");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
