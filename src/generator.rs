//! End-to-end pipeline: seed builder, party offset, then the nonce stream.
use derive_builder::Builder;
use tracing::debug;

use crate::epoch::DateTag;
use crate::error::Error;
use crate::party::{apply_party_offset, PartyRole};
use crate::seed::{Password, Seed, SeedDerivation, DEFAULT_PBKDF2_ITERATIONS};
use crate::stream::{NonceStream, DEFAULT_NONCE_LEN};
use crate::types::NonceRecord;

#[derive(Builder, Clone)]
#[builder(pattern = "owned")]
pub struct NonceGenerator {
    #[builder(setter(into))]
    pub password: Password,
    pub date_tag: DateTag,
    /// An empty salt selects the unsalted path, same as no salt.
    #[builder(default, setter(into, strip_option))]
    pub salt: Option<String>,
    #[builder(default)]
    pub role: PartyRole,
    #[builder(default = "DEFAULT_NONCE_LEN")]
    pub nonce_length: usize,
    #[builder(default = "1")]
    pub count: usize,
    /// PBKDF2 rounds; only used when a salt is present.
    #[builder(default = "DEFAULT_PBKDF2_ITERATIONS")]
    pub iterations: u32,
}

impl NonceGenerator {
    pub fn validate(&self) -> Result<(), Error> {
        if self.password.is_empty() {
            return Err(Error::MissingPassword);
        }
        if self.nonce_length == 0 {
            return Err(Error::InvalidConfig("nonce_length must be >= 1".into()));
        }
        if self.count == 0 {
            return Err(Error::InvalidConfig("count must be >= 1".into()));
        }
        if self.iterations == 0 {
            return Err(Error::InvalidConfig("iterations must be >= 1".into()));
        }
        Ok(())
    }

    fn salt(&self) -> Option<&str> {
        self.salt.as_deref().filter(|s| !s.is_empty())
    }

    /// Derivation path selected by the salt and iteration count.
    pub fn derivation(&self) -> SeedDerivation {
        match self.salt() {
            Some(_) => SeedDerivation::Pbkdf2Sha256 {
                iterations: self.iterations,
            },
            None => SeedDerivation::Sha256,
        }
    }

    /// Seed for this configuration, party offset applied.
    pub fn seed(&self) -> Result<Seed, Error> {
        self.validate()?;
        let derivation = self.derivation();
        let base = derivation.derive(self.password.as_bytes(), &self.date_tag, self.salt());
        debug!(
            derivation = derivation.name(),
            role = ?self.role,
            date_tag = %self.date_tag,
            "derived seed"
        );
        Ok(apply_party_offset(base, self.role))
    }

    /// Fresh stream positioned at the first nonce.
    pub fn stream(&self) -> Result<NonceStream, Error> {
        let seed = self.seed()?;
        NonceStream::new(&seed, self.nonce_length)
    }

    /// Lazily produce `count` records. Stops after the first error.
    pub fn records(&self) -> Result<NonceRecords, Error> {
        let stream = self.stream()?;
        debug!(
            nonce_length = self.nonce_length,
            count = self.count,
            "starting nonce stream"
        );
        Ok(NonceRecords {
            stream,
            date_tag: self.date_tag.clone(),
            next_index: 1,
            count: self.count,
        })
    }

    /// Produce all `count` records or the first error.
    pub fn generate(&self) -> Result<Vec<NonceRecord>, Error> {
        self.records()?.collect()
    }
}

impl std::fmt::Debug for NonceGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceGenerator")
            .field("password", &self.password)
            .field("date_tag", &self.date_tag)
            .field("salt", &self.salt.as_ref().map(|_| "<redacted>"))
            .field("role", &self.role)
            .field("nonce_length", &self.nonce_length)
            .field("count", &self.count)
            .field("iterations", &self.iterations)
            .finish()
    }
}

impl NonceGeneratorBuilder {
    fn validate(&self) -> Result<(), Error> {
        match &self.password {
            Some(p) if !p.is_empty() => {}
            _ => return Err(Error::MissingPassword),
        }
        if self.date_tag.is_none() {
            return Err(Error::InvalidConfig("date_tag must be provided".into()));
        }
        if self.nonce_length == Some(0) {
            return Err(Error::InvalidConfig("nonce_length must be >= 1".into()));
        }
        if self.count == Some(0) {
            return Err(Error::InvalidConfig("count must be >= 1".into()));
        }
        if self.iterations == Some(0) {
            return Err(Error::InvalidConfig("iterations must be >= 1".into()));
        }
        Ok(())
    }

    pub fn build_validated(self) -> Result<NonceGenerator, Error> {
        self.validate()?;
        self.build()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}

/// Iterator over the records of one generator run.
#[derive(Debug)]
pub struct NonceRecords {
    stream: NonceStream,
    date_tag: DateTag,
    next_index: usize,
    count: usize,
}

impl Iterator for NonceRecords {
    type Item = Result<NonceRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index > self.count {
            return None;
        }
        let index = self.next_index;
        let item = self.stream.next()?.map(|nonce| NonceRecord {
            index,
            nonce: nonce.to_hex(),
            date_tag: self.date_tag.clone(),
        });
        self.next_index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.count + 1).saturating_sub(self.next_index);
        (0, Some(left))
    }
}
