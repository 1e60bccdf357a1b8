//! Sequential HKDF-SHA256 output cut into fixed-size nonces.
//!
//! The seed is run through HKDF-Extract with an absent salt, then HKDF-Expand with empty
//! info is read front to back. Nonce `k` (1-based) covers output bytes
//! `(k - 1) * len .. k * len`, so a stream is fully determined by its seed and nonce length.
use std::fmt::{Display, Formatter};

use hkdf::Hkdf;
use sha2::Sha256;

use crate::error::Error;
use crate::seed::Seed;

const HASH_LEN: usize = 32;

/// Most bytes HKDF-SHA256 can expand from one key (255 blocks).
pub const MAX_STREAM_BYTES: usize = 255 * HASH_LEN;

/// Nonce byte length used when none is configured.
pub const DEFAULT_NONCE_LEN: usize = 16;

/// One nonce cut from the stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nonce(Vec<u8>);

impl Nonce {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex, two characters per byte, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl Display for Nonce {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Owned read cursor over the expansion of a single seed.
///
/// Reads go through `&mut self`; share a stream between threads only behind external
/// synchronization. Building a new stream from the same seed restarts at offset zero.
pub struct NonceStream {
    okm: Box<[u8]>,
    position: usize,
    nonce_length: usize,
    fused: bool,
}

impl NonceStream {
    /// Start a stream over `seed` yielding `nonce_length`-byte nonces.
    pub fn new(seed: &Seed, nonce_length: usize) -> Result<Self, Error> {
        Self::from_ikm(seed.as_bytes(), nonce_length)
    }

    pub(crate) fn from_ikm(ikm: &[u8], nonce_length: usize) -> Result<Self, Error> {
        if nonce_length == 0 {
            return Err(Error::InvalidConfig("nonce_length must be >= 1".into()));
        }
        let hk = Hkdf::<Sha256>::new(None, ikm);
        let mut okm = vec![0u8; MAX_STREAM_BYTES].into_boxed_slice();
        hk.expand(&[], &mut okm)
            .map_err(|e| Error::InvalidConfig(format!("hkdf expand: {e}")))?;
        Ok(Self {
            okm,
            position: 0,
            nonce_length,
            fused: false,
        })
    }

    pub fn nonce_length(&self) -> usize {
        self.nonce_length
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left before the expansion limit.
    pub fn remaining(&self) -> usize {
        self.okm.len() - self.position
    }

    /// Read the next nonce.
    ///
    /// Fails with [`Error::ExhaustedStream`] when fewer than `nonce_length` bytes remain;
    /// the cursor does not move in that case.
    pub fn next_nonce(&mut self) -> Result<Nonce, Error> {
        let exhausted = Error::ExhaustedStream {
            requested: self.nonce_length,
            remaining: self.remaining(),
        };
        let end = match self.position.checked_add(self.nonce_length) {
            Some(end) if end <= self.okm.len() => end,
            _ => return Err(exhausted),
        };
        let chunk = &self.okm[self.position..end];
        let nonce = Nonce(chunk.to_vec());
        self.position = end;
        Ok(nonce)
    }
}

impl std::fmt::Debug for NonceStream {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceStream")
            .field("nonce_length", &self.nonce_length)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl Iterator for NonceStream {
    type Item = Result<Nonce, Error>;

    /// Yields nonces until the first error, which is returned once before the stream ends.
    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        let item = self.next_nonce();
        if item.is_err() {
            self.fused = true;
        }
        Some(item)
    }
}
