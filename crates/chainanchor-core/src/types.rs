//! Shared types: block hashes, network selection, and block-index entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnchorError;

// ─── BlockHash ────────────────────────────────────────────────────────────────

/// A 256-bit block identifier, treated as opaque bytes in display order.
///
/// Serialized as 64 lowercase hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockHash([u8; 32]);

impl BlockHash {
    pub const ZERO: BlockHash = BlockHash([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Decode a hex literal in a `const`/`static` initializer.
    ///
    /// Used only by the shipped checkpoint tables. Untrusted input goes
    /// through [`BlockHash::from_str`].
    ///
    /// # Panics
    ///
    /// Panics if `s` is not 64 hex digits (with an optional `0x` prefix).
    /// In a const context that panic is a compile error.
    pub(crate) const fn from_hex_const(s: &str) -> Self {
        let bytes = s.as_bytes();
        let prefixed = bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] | 0x20) == b'x';
        let start = if prefixed {
            2
        } else {
            0
        };
        if bytes.len() - start != 64 {
            panic!("block hash literal must be 64 hex digits");
        }
        let mut out = [0u8; 32];
        let mut i = 0;
        while i < 32 {
            let hi = const_nibble(bytes[start + 2 * i]);
            let lo = const_nibble(bytes[start + 2 * i + 1]);
            out[i] = (hi << 4) | lo;
            i += 1;
        }
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

const fn const_nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit in block hash literal"),
    }
}

impl FromStr for BlockHash {
    type Err = AnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let mut out = [0u8; 32];
        hex::decode_to_slice(digits, &mut out)
            .map_err(|e| AnchorError::InvalidHash(format!("'{s}': {e}")))?;
        Ok(Self(out))
    }
}

impl TryFrom<String> for BlockHash {
    type Error = AnchorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BlockHash> for String {
    fn from(hash: BlockHash) -> Self {
        hash.to_string()
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash(0x{})", hex::encode(self.0))
    }
}

// ─── Network ──────────────────────────────────────────────────────────────────

/// Which shipped checkpoint table applies to this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Main,
    Test,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Test => write!(f, "test"),
        }
    }
}

impl FromStr for Network {
    type Err = AnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(Self::Main),
            "test" | "testnet" => Ok(Self::Test),
            _ => Err(AnchorError::UnknownNetwork(s.to_string())),
        }
    }
}

// ─── Checkpoint ───────────────────────────────────────────────────────────────

/// One trusted (height, hash) row of a checkpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub height: u64,
    pub hash: BlockHash,
}

/// Summary statistics about the last checkpoint of a table, used by the
/// progress estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckpointStats {
    /// Unix timestamp of the last checkpoint block.
    pub last_checkpoint_time: i64,
    /// Transactions from genesis through the last checkpoint block, inclusive.
    pub last_checkpoint_tx_count: u64,
    /// Estimated number of transactions per day after the last checkpoint.
    pub tx_per_day: f64,
}

// ─── BlockIndexEntry ──────────────────────────────────────────────────────────

/// The view of a block-index node this crate reads. The index itself is
/// owned elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockIndexEntry {
    /// Block height.
    pub height: u64,
    /// Block hash.
    pub hash: BlockHash,
    /// Unix timestamp from the block header.
    pub timestamp: i64,
    /// Cumulative transaction count from genesis through this block.
    pub chain_tx_count: u64,
}

// ─── Tests ────────────────────────────────────────────────────────────────────
