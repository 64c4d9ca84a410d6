//! Contact notifier that records messages in the structured log.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ContactMessage;
use crate::domain::ports::{ContactNotifier, ContactNotifierError};

/// Writes each contact message to the `contact` tracing target.
///
/// Only sizes are logged at `info`. The sender's details and the message
/// itself are logged at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogContactNotifier;

#[async_trait]
impl ContactNotifier for LogContactNotifier {
    async fn notify(&self, message: &ContactMessage) -> Result<(), ContactNotifierError> {
        info!(
            target: "contact",
            message_len = message.message.chars().count(),
            has_phone = message.phone.is_some(),
            "contact form submission"
        );
        debug!(
            target: "contact",
            name = %message.name,
            email = %message.email,
            phone = message.phone.as_deref().unwrap_or(""),
            body = %message.message,
            "contact form contents"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use parking_lot::Mutex;
    use rstest::rstest;
    use tracing::Level;

    use super::*;
    use crate::domain::ContactInput;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn message() -> ContactMessage {
        ContactMessage::try_from_input(ContactInput {
            name: "Bob",
            email: "bob@y.org",
            phone: "555-0100",
            message: "Hello there",
        })
        .expect("valid message")
    }

    async fn logged_at(level: Level) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);
        LogContactNotifier
            .notify(&message())
            .await
            .expect("logged");
        let bytes = captured.0.lock().clone();
        String::from_utf8(bytes).expect("utf-8 log output")
    }

    #[tokio::test]
    async fn info_level_keeps_personal_details_out_of_the_log() {
        let output = logged_at(Level::INFO).await;
        assert!(output.contains("contact form submission"));
        assert!(output.contains("message_len=11"));
        for detail in ["bob@y.org", "555-0100", "Hello there"] {
            assert!(!output.contains(detail), "{detail} leaked: {output}");
        }
    }

    #[rstest]
    #[case("bob@y.org")]
    #[case("555-0100")]
    #[case("Hello there")]
    #[tokio::test]
    async fn debug_level_records_the_full_message(#[case] detail: &str) {
        let output = logged_at(Level::DEBUG).await;
        assert!(output.contains(detail), "{detail} missing: {output}");
    }
}
