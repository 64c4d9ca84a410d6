//! Authentication inputs: login credentials and registration requests.
//!
//! Inbound adapters hand raw form strings to these constructors; everything
//! past this point works with normalised, validated values.

use zeroize::Zeroizing;

use super::validation::FieldErrors;
use super::{DisplayName, EmailAddress};

/// Minimum accepted password length at registration.
pub const PASSWORD_MIN: usize = 4;

/// Validated login credentials.
///
/// ## Invariants
/// - `identifier` is trimmed and non-empty. It may be a display name or an
///   email address; lookups normalise it for each interpretation.
/// - `password` is non-empty and keeps caller whitespace.
///
/// # Examples
/// ```
/// use blog::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice@x.com ", "secret1").unwrap();
/// assert_eq!(creds.identifier(), "alice@x.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    identifier: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form values.
    pub fn try_from_parts(identifier: &str, password: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let identifier = errors.require("name", identifier).map(str::to_owned);
        if password.is_empty() {
            errors.push("password", super::validation::REQUIRED_MESSAGE);
        }
        match identifier {
            Some(identifier) if errors.is_empty() => Ok(Self {
                identifier,
                password: Zeroizing::new(password.to_owned()),
            }),
            _ => Err(errors),
        }
    }

    /// Display name or email as typed (trimmed).
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    /// Password as typed.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: EmailAddress,
    display_name: DisplayName,
    password: Zeroizing<String>,
}

/// Raw registration form values.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationInput<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

impl Registration {
    /// Validate every registration field, collecting all failures.
    pub fn try_from_input(input: RegistrationInput<'_>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let display_name = DisplayName::new(input.username)
            .map_err(|err| errors.push("username", err.to_string()))
            .ok();
        let email = EmailAddress::new(input.email)
            .map_err(|err| errors.push("email", err.to_string()))
            .ok();

        if input.password.is_empty() {
            errors.push("password", super::validation::REQUIRED_MESSAGE);
        } else if input.password.chars().count() < PASSWORD_MIN {
            errors.push(
                "password",
                format!("Field must be at least {PASSWORD_MIN} characters long."),
            );
        }
        if input.confirm_password.is_empty() {
            errors.push("confirm_password", super::validation::REQUIRED_MESSAGE);
        } else if input.confirm_password != input.password {
            errors.push("confirm_password", "Passwords must match");
        }

        match (email, display_name) {
            (Some(email), Some(display_name)) if errors.is_empty() => Ok(Self {
                email,
                display_name,
                password: Zeroizing::new(input.password.to_owned()),
            }),
            _ => Err(errors),
        }
    }

    /// Normalised email.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Normalised display name.
    #[must_use]
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Raw password to hash.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::REQUIRED_MESSAGE;
    use rstest::rstest;

    fn input<'a>(
        username: &'a str,
        email: &'a str,
        password: &'a str,
        confirm: &'a str,
    ) -> RegistrationInput<'a> {
        RegistrationInput {
            username,
            email,
            password,
            confirm_password: confirm,
        }
    }

    #[rstest]
    #[case("", "pw", "name")]
    #[case("   ", "pw", "name")]
    #[case("alice", "", "password")]
    fn login_requires_both_fields(
        #[case] identifier: &str,
        #[case] password: &str,
        #[case] failing: &str,
    ) {
        let errors = LoginCredentials::try_from_parts(identifier, password)
            .expect_err("blank inputs must fail");
        assert_eq!(errors.messages(failing), [REQUIRED_MESSAGE.to_owned()]);
    }

    #[rstest]
    fn registration_normalises_fields() {
        let registration =
            Registration::try_from_input(input("alice", "Alice@X.com", "secret1", "secret1"))
                .expect("valid registration");
        assert_eq!(registration.display_name().as_ref(), "Alice");
        assert_eq!(registration.email().as_ref(), "alice@x.com");
        assert_eq!(registration.password(), "secret1");
    }

    #[rstest]
    fn registration_collects_every_failure() {
        let errors = Registration::try_from_input(input("al", "nope", "abc", "abd"))
            .expect_err("invalid registration");
        assert!(!errors.messages("username").is_empty());
        assert_eq!(errors.messages("email"), ["Invalid email address.".to_owned()]);
        assert_eq!(
            errors.messages("password"),
            ["Field must be at least 4 characters long.".to_owned()]
        );
        assert_eq!(
            errors.messages("confirm_password"),
            ["Passwords must match".to_owned()]
        );
    }
}
