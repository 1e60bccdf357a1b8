//! Deterministic nonce streams for two parties sharing a password.
//!
//! Both sides run the same pipeline and arrive at the same nonces without talking:
//! - [`derive_seed`]: `SHA-256(password || YYYYMMDD)`, or PBKDF2-HMAC-SHA256 keyed on
//!   `salt || YYYYMMDD` when a salt is given.
//! - [`apply_party_offset`]: Party B adds one to the seed (big-endian, wrapping).
//! - [`NonceStream`]: HKDF-SHA256 output read sequentially in fixed-size, hex-encoded chunks.
//!
//! The date tag is always supplied by the caller (see [`epoch::Clock`]), so every function
//! here is a pure function of its inputs.

pub mod epoch;
pub mod error;
pub mod generator;
pub mod party;
pub mod persist;
pub mod seed;
pub mod stream;
pub mod types;

pub use epoch::{Clock, DateTag, FixedClock, SystemClock};
pub use error::Error;
pub use generator::{NonceGenerator, NonceGeneratorBuilder, NonceRecords};
pub use party::{apply_party_offset, PartyRole};
pub use persist::NonceWriter;
pub use seed::{derive_seed, Password, Seed, SeedDerivation, DEFAULT_PBKDF2_ITERATIONS};
pub use stream::{Nonce, NonceStream, DEFAULT_NONCE_LEN, MAX_STREAM_BYTES};
pub use types::NonceRecord;
