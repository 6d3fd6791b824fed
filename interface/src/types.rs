//! Identifier newtypes shared across the Pyre core.
//!
//! Accounts and assets are opaque 32-byte identifiers so the core stays
//! agnostic of the address format of any particular chain. Channels are the
//! transport's numeric chain identifiers.

use {
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    std::{
        fmt,
        sync::atomic::{AtomicU64, Ordering},
    },
};

/// Opaque 32-byte account identifier.
///
/// The all-zero value is reserved: it is never a valid recipient and marks
/// "untrusted" in the trusted-remote registry.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// The reserved all-zero identifier.
    pub const ZERO: Self = Self([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns a unique identifier for use in tests and tooling.
    ///
    /// Monotonic and process-local; never collides with `ZERO`.
    pub fn new_unique() -> Self {
        Self(unique_bytes())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({self})")
    }
}

/// Opaque 32-byte asset identifier.
///
/// [`AssetId::NATIVE`] (all zeros) marks the chain's native asset, both in
/// local balance queries and in the cross-chain settlement payload.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct AssetId(pub [u8; 32]);

impl AssetId {
    /// Marker for the chain's native asset.
    pub const NATIVE: Self = Self([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns a unique identifier for use in tests and tooling.
    pub fn new_unique() -> Self {
        Self(unique_bytes())
    }

    pub fn is_native(&self) -> bool {
        *self == Self::NATIVE
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "native")
        } else {
            write_hex(f, &self.0)
        }
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({self})")
    }
}

/// Numeric identifier of a transport channel (one per remote chain).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct ChannelId(pub u32);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Process-local counter backing `new_unique`. Starts at 1 so the zero
// identifier is never produced.
static UNIQUE_COUNTER: AtomicU64 = AtomicU64::new(1);

fn unique_bytes() -> [u8; 32] {
    let n = UNIQUE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&n.to_le_bytes());
    bytes[8] = 0xA5;
    bytes
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8; 32]) -> fmt::Result {
    for b in bytes {
        write!(f, "{b:02x}")?;
    }
    Ok(())
}
