//! Contact form messages addressed to the site operator.

use super::EmailAddress;
use super::validation::FieldErrors;

/// Raw contact form values.
#[derive(Debug, Clone, Copy)]
pub struct ContactInput<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub message: &'a str,
}

/// Validated contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: EmailAddress,
    /// Optional; empty input becomes `None`.
    pub phone: Option<String>,
    pub message: String,
}

impl ContactMessage {
    /// Validate the contact form, collecting all failures.
    pub fn try_from_input(input: ContactInput<'_>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.require("name", input.name);
        let email = EmailAddress::new(input.email)
            .map_err(|err| errors.push("email", err.to_string()))
            .ok();
        let message = errors.require("message", input.message);
        let phone = Some(input.phone.trim())
            .filter(|phone| !phone.is_empty())
            .map(str::to_owned);

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) if errors.is_empty() => Ok(Self {
                name: name.to_owned(),
                email,
                phone,
                message: message.to_owned(),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::REQUIRED_MESSAGE;

    #[test]
    fn phone_is_optional() {
        let message = ContactMessage::try_from_input(ContactInput {
            name: "Bob",
            email: "bob@y.org",
            phone: "  ",
            message: "Hi there",
        })
        .expect("valid message");
        assert_eq!(message.phone, None);
        assert_eq!(message.email.as_ref(), "bob@y.org");
    }

    #[test]
    fn reports_missing_fields() {
        let errors = ContactMessage::try_from_input(ContactInput {
            name: "",
            email: "",
            phone: "",
            message: "",
        })
        .expect_err("blank form");
        assert_eq!(errors.messages("name"), [REQUIRED_MESSAGE.to_owned()]);
        assert_eq!(errors.messages("email"), [REQUIRED_MESSAGE.to_owned()]);
        assert_eq!(errors.messages("message"), [REQUIRED_MESSAGE.to_owned()]);
    }
}
