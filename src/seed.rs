use std::fmt::{Debug, Formatter};

use pbkdf2::pbkdf2_hmac;
use sha2::{Digest, Sha256};

use crate::epoch::DateTag;

/// Byte length of every seed.
pub const SEED_LEN: usize = 32;

/// PBKDF2 rounds applied when a salt is supplied.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 10_000;

/// Shared secret. `Debug` never prints the contents.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(secret: impl Into<String>) -> Self {
        Password(secret.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Password::new(value)
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Password(value)
    }
}

/// 32-byte key that determines an entire nonce stream.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    pub const fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Seed(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; SEED_LEN] {
        self.0
    }

    /// Hex rendering for diagnostics and test vectors. Treat the output as secret.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Debug for Seed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

/// How a seed is built from password and epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedDerivation {
    /// `SHA-256(password || date_tag)`.
    Sha256,
    /// `PBKDF2-HMAC-SHA256(password, salt || date_tag, iterations, 32)`.
    Pbkdf2Sha256 { iterations: u32 },
}

impl SeedDerivation {
    /// Default path for an optional salt. An empty salt counts as absent.
    pub fn for_salt(salt: Option<&str>) -> Self {
        match salt {
            Some(s) if !s.is_empty() => Self::Pbkdf2Sha256 {
                iterations: DEFAULT_PBKDF2_ITERATIONS,
            },
            _ => Self::Sha256,
        }
    }

    /// Single hash pass over `password || date_tag`.
    pub fn calculate_sha256(password: &[u8], date_tag: &DateTag) -> Seed {
        let mut hasher = Sha256::new();
        hasher.update(password);
        hasher.update(date_tag.as_bytes());
        Seed(hasher.finalize().into())
    }

    /// Iterated derivation keyed on `salt || date_tag`.
    pub fn calculate_pbkdf2(
        password: &[u8],
        date_tag: &DateTag,
        salt: &str,
        iterations: u32,
    ) -> Seed {
        let mut combined = Vec::with_capacity(salt.len() + date_tag.as_str().len());
        combined.extend_from_slice(salt.as_bytes());
        combined.extend_from_slice(date_tag.as_bytes());

        let mut out = [0u8; SEED_LEN];
        pbkdf2_hmac::<Sha256>(password, &combined, iterations, &mut out);
        Seed(out)
    }

    /// Derive the seed along this path. `salt` is ignored by `Sha256`.
    pub fn derive(&self, password: &[u8], date_tag: &DateTag, salt: Option<&str>) -> Seed {
        match self {
            Self::Sha256 => Self::calculate_sha256(password, date_tag),
            Self::Pbkdf2Sha256 { iterations } => {
                Self::calculate_pbkdf2(password, date_tag, salt.unwrap_or_default(), *iterations)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Pbkdf2Sha256 { .. } => "pbkdf2-hmac-sha256",
        }
    }
}

/// Build the seed for `(password, date_tag, salt)` with default parameters.
///
/// No salt (or an empty one) selects the single SHA-256 pass; otherwise PBKDF2 runs
/// with [`DEFAULT_PBKDF2_ITERATIONS`].
pub fn derive_seed(password: &[u8], date_tag: &DateTag, salt: Option<&str>) -> Seed {
    SeedDerivation::for_salt(salt).derive(password, date_tag, salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> DateTag {
        DateTag::parse(s).unwrap()
    }

    #[test]
    fn test_seed_sha256_vector() {
        let seed = derive_seed(b"correcthorse", &tag("20240615"), None);
        assert_eq!(
            seed.to_hex(),
            "b12dca1168c1be2762703a515b1fcb3184ec5d0e1db7bd37c327b75e4ecfae14"
        );
    }

    #[test]
    fn test_seed_pbkdf2_vector() {
        let seed = derive_seed(b"correcthorse", &tag("20240615"), Some("pepper"));
        assert_eq!(
            seed.to_hex(),
            "1ee80560864d1e4296639693f789aa22a6d78a5a0fb757bb1831af5dc47e0ecc"
        );
    }

    #[test]
    fn test_empty_salt_falls_back_to_sha256() {
        let d = tag("20240615");
        assert_eq!(SeedDerivation::for_salt(Some("")), SeedDerivation::Sha256);
        assert_eq!(
            derive_seed(b"correcthorse", &d, Some("")),
            derive_seed(b"correcthorse", &d, None)
        );
    }

    #[test]
    fn test_day_isolation() {
        for salt in [None, Some("pepper")] {
            let a = derive_seed(b"correcthorse", &tag("20240101"), salt);
            let b = derive_seed(b"correcthorse", &tag("20240102"), salt);
            assert_ne!(a, b);
        }
        assert_eq!(
            derive_seed(b"correcthorse", &tag("20240616"), None).to_hex(),
            "aa49372e86b1ebd4d6e4e11ecf56351b083a0e7a4944f208ffe802754cebe559"
        );
    }

    #[test]
    fn test_salt_path_independence() {
        let d = tag("20240615");
        let plain = derive_seed(b"correcthorse", &d, None);
        let salted = derive_seed(b"correcthorse", &d, Some("pepper"));
        assert_ne!(plain, salted);
    }

    #[test]
    fn test_iterations_change_seed() {
        let d = tag("20240615");
        let fast = SeedDerivation::Pbkdf2Sha256 { iterations: 1 };
        let slow = SeedDerivation::Pbkdf2Sha256 {
            iterations: DEFAULT_PBKDF2_ITERATIONS,
        };
        assert_ne!(
            fast.derive(b"correcthorse", &d, Some("pepper")),
            slow.derive(b"correcthorse", &d, Some("pepper"))
        );
    }

    #[test]
    fn test_debug_is_redacted() {
        let seed = derive_seed(b"correcthorse", &tag("20240615"), None);
        assert_eq!(format!("{seed:?}"), "Seed(<redacted>)");
        let pw = Password::from("correcthorse");
        assert!(!format!("{pw:?}").contains("correcthorse"));
    }
}
