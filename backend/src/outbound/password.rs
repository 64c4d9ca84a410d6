//! Argon2id adapter for the password hashing port.

use argon2::password_hash::{self, SaltString};
use argon2::{
    Algorithm, Argon2, Params, PasswordHash as PhcHash, PasswordHasher as _,
    PasswordVerifier as _, Version,
};
use rand::{Rng as _, RngCore as _};

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

const SALT_MIN_BYTES: usize = 16;
const SALT_MAX_BYTES: usize = 32;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Settings {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for Argon2Settings {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Argon2id hasher producing PHC strings.
///
/// Each hash gets a fresh salt whose length is drawn uniformly from
/// 16..=32 bytes.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Build a hasher, rejecting parameters Argon2 does not accept.
    pub fn new(settings: Argon2Settings) -> Result<Self, PasswordHashError> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|err| PasswordHashError::hash(format!("invalid argon2 parameters: {err}")))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

fn random_salt() -> Result<SaltString, PasswordHashError> {
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(SALT_MIN_BYTES..=SALT_MAX_BYTES);
    let mut bytes = [0_u8; SALT_MAX_BYTES];
    let salt = bytes
        .get_mut(..len)
        .ok_or_else(|| PasswordHashError::hash("salt length out of range"))?;
    rng.fill_bytes(salt);
    SaltString::encode_b64(salt).map_err(|err| PasswordHashError::hash(err.to_string()))
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let salt = random_salt()?;
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordHash::new(hash.to_string()))
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let parsed = PhcHash::new(hash.as_ref())
            .map_err(|err| PasswordHashError::malformed(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::malformed(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new(Argon2Settings {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .expect("cheap params are valid")
    }

    #[rstest]
    fn verifies_the_original_password(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("secret1").expect("hash");
        assert!(hash.as_ref().starts_with("$argon2id$"));
        assert!(hasher.verify("secret1", &hash).expect("verify"));
        assert!(!hasher.verify("secret2", &hash).expect("verify"));
    }

    #[rstest]
    fn equal_passwords_get_different_salts(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("secret1").expect("hash");
        let second = hasher.hash("secret1").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn salt_lengths_stay_in_range() {
        for _ in 0..32 {
            let salt = random_salt().expect("salt");
            let encoded = salt.as_str().len();
            // Unpadded base64 of 16..=32 bytes.
            assert!((22..=43).contains(&encoded), "unexpected length {encoded}");
        }
    }

    #[rstest]
    fn malformed_hashes_are_reported(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("secret1", &PasswordHash::new("not-a-phc-string"))
            .expect_err("malformed");
        assert!(matches!(err, PasswordHashError::Malformed { .. }));
    }

    #[rstest]
    fn rejects_zero_iterations() {
        let result = Argon2PasswordHasher::new(Argon2Settings {
            memory_kib: 8,
            iterations: 0,
            parallelism: 1,
        });
        assert!(matches!(result, Err(PasswordHashError::Hash { .. })));
    }
}
