use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::epoch::DateTag;

/// One produced nonce with its 1-based position and the epoch it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonceRecord {
    pub index: usize,
    pub nonce: String,
    pub date_tag: DateTag,
}

impl NonceRecord {
    /// File name the record is persisted under: `n-<index>`.
    pub fn file_name(&self) -> String {
        format!("n-{}", self.index)
    }
}

impl Display for NonceRecord {
    /// `<index>: <nonce> <date_tag>`
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {}", self.index, self.nonce, self.date_tag)
    }
}
