//! Unit tests for session configuration parsing.

use std::collections::HashMap;
use std::io::Write as _;

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create key file");
    file.write_all(&vec![b'a'; len]).expect("write key file");
    file
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

struct ReleaseEnv {
    key: NamedTempFile,
    vars: HashMap<&'static str, String>,
}

impl ReleaseEnv {
    fn with(mut self, name: &'static str, value: &str) -> Self {
        self.vars.insert(name, value.to_owned());
        self
    }

    fn without(mut self, name: &'static str) -> Self {
        self.vars.remove(name);
        self
    }

    fn settings(self, mode: BuildMode) -> Result<SessionSettings, SessionConfigError> {
        let result = session_settings_from_env(&mock_env(self.vars), mode);
        drop(self.key);
        result
    }
}

#[fixture]
fn release_env() -> ReleaseEnv {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let vars = HashMap::from([
        (KEY_FILE_ENV, key.path().display().to_string()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]);
    ReleaseEnv { key, vars }
}

#[rstest]
fn release_accepts_complete_configuration(release_env: ReleaseEnv) {
    let settings = release_env
        .with(SAMESITE_ENV, "lax")
        .settings(BuildMode::Release)
        .expect("valid release configuration");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_missing_toggles(release_env: ReleaseEnv, #[case] name: &'static str) {
    let err = release_env
        .without(name)
        .settings(BuildMode::Release)
        .err()
        .expect("missing toggle rejected");
    assert!(matches!(err, SessionConfigError::MissingEnv { name: missing } if missing == name));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "sometimes")]
#[case(ALLOW_EPHEMERAL_ENV, "")]
fn release_rejects_invalid_toggles(
    release_env: ReleaseEnv,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let err = release_env
        .with(name, value)
        .settings(BuildMode::Release)
        .err()
        .expect("invalid toggle rejected");
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: invalid, .. } if invalid == name));
}

#[rstest]
fn release_rejects_insecure_same_site_none(release_env: ReleaseEnv) {
    let err = release_env
        .with(COOKIE_SECURE_ENV, "0")
        .with(SAMESITE_ENV, "None")
        .settings(BuildMode::Release)
        .err()
        .expect("insecure SameSite=None rejected");
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_rejects_ephemeral_keys(release_env: ReleaseEnv) {
    let err = release_env
        .with(ALLOW_EPHEMERAL_ENV, "1")
        .settings(BuildMode::Release)
        .err()
        .expect("ephemeral key rejected");
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = key_file(SESSION_KEY_MIN_LEN - 1);
    let env = mock_env(HashMap::from([
        (KEY_FILE_ENV, short.path().display().to_string()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]));

    let err = session_settings_from_env(&env, BuildMode::Release)
        .err()
        .expect("short key rejected");
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_rejects_unreadable_key_file(release_env: ReleaseEnv) {
    let err = release_env
        .with(KEY_FILE_ENV, "/nonexistent/blog/session_key")
        .settings(BuildMode::Release)
        .err()
        .expect("unreadable key rejected");
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_falls_back_to_defaults() {
    let env = mock_env(HashMap::from([(
        KEY_FILE_ENV,
        "/nonexistent/blog/session_key".to_owned(),
    )]));

    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_tolerates_invalid_values_and_short_keys() {
    let short = key_file(8);
    let env = mock_env(HashMap::from([
        (KEY_FILE_ENV, short.path().display().to_string()),
        (COOKIE_SECURE_ENV, "perhaps".to_owned()),
        (SAMESITE_ENV, "bogus".to_owned()),
    ]));

    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug tolerance");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case(0)]
#[case(31)]
#[case(SESSION_KEY_MIN_LEN - 1)]
fn debug_replaces_short_keys_with_a_temporary_one(#[case] len: usize) {
    let short = key_file(len);
    let env = mock_env(HashMap::from([(
        KEY_FILE_ENV,
        short.path().display().to_string(),
    )]));

    let first = session_settings_from_env(&env, BuildMode::Debug).expect("debug tolerance");
    let second = session_settings_from_env(&env, BuildMode::Debug).expect("debug tolerance");

    assert_ne!(
        fingerprint::key_fingerprint(&first.key),
        fingerprint::key_fingerprint(&second.key)
    );
}

#[rstest]
fn key_file_contents_determine_the_key(release_env: ReleaseEnv) {
    let expected = fingerprint::key_fingerprint(&Key::derive_from(&[b'a'; SESSION_KEY_MIN_LEN]));
    let settings = release_env
        .settings(BuildMode::Release)
        .expect("valid release configuration");
    assert_eq!(fingerprint::key_fingerprint(&settings.key), expected);
}
