use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use thiserror::Error;

/// Canonical ledger account/object identifier: 32 bytes, rendered as
/// `0x` followed by 64 lowercase hex characters. Parsing is
/// case-insensitive; anything else is rejected before any I/O happens.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 32]);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("address must start with 0x")]
    MissingPrefix,
    #[error("address body must be {expected} hex characters, got {actual}")]
    BadLength { expected: usize, actual: usize },
    #[error("address body must be hexadecimal")]
    BadHex,
}

impl Address {
    pub const LENGTH: usize = 32;
    /// Hex characters in the canonical text body.
    pub const BODY_LENGTH: usize = Self::LENGTH * 2;

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Builds an address whose high bytes are zero, e.g. the reserved
    /// system-package addresses `0x1`, `0x2`, `0xdee9`.
    pub const fn from_low_bytes(suffix: &[u8]) -> Self {
        let mut bytes = [0u8; 32];
        let mut i = 0;
        while i < suffix.len() {
            bytes[32 - suffix.len() + i] = suffix[i];
            i += 1;
        }
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Abbreviated form for display names: `0x1234…`.
    pub fn short(&self) -> String {
        format!("0x{}…", hex::encode(&self.0[..3]))
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_prefix("0x").ok_or(AddressParseError::MissingPrefix)?;
        if body.len() != Self::BODY_LENGTH {
            return Err(AddressParseError::BadLength {
                expected: Self::BODY_LENGTH,
                actual: body.len(),
            });
        }
        let decoded = hex::decode(body).map_err(|_| AddressParseError::BadHex)?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Identifier of a non-account ledger object. Only carried through the raw
/// change records, never graphed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owner of a raw balance/object change. The wire encodes these as an
/// externally tagged union; recipient derivation pattern-matches
/// exhaustively instead of probing properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Owner {
    AddressOwner(Address),
    ObjectOwner(ObjectId),
    Shared { object_id: ObjectId },
    Immutable,
}
