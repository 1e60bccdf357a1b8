use serde::{Deserialize, Serialize};

use crate::seed::Seed;

/// Which side of the exchange is deriving nonces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    #[default]
    PartyA,
    PartyB,
}

impl PartyRole {
    pub fn from_is_party_b(is_party_b: bool) -> Self {
        if is_party_b {
            PartyRole::PartyB
        } else {
            PartyRole::PartyA
        }
    }

    pub fn is_party_b(&self) -> bool {
        matches!(self, PartyRole::PartyB)
    }
}

/// Offset `seed` for `role`.
///
/// Party A keeps the seed. Party B gets the seed read as a big-endian integer plus one;
/// an all-`0xff` seed wraps to all zeros.
pub fn apply_party_offset(seed: Seed, role: PartyRole) -> Seed {
    match role {
        PartyRole::PartyA => seed,
        PartyRole::PartyB => increment_be(seed),
    }
}

fn increment_be(seed: Seed) -> Seed {
    let mut bytes = seed.to_bytes();
    for byte in bytes.iter_mut().rev() {
        let (next, carry) = byte.overflowing_add(1);
        *byte = next;
        if !carry {
            break;
        }
    }
    Seed::from_bytes(bytes)
}
