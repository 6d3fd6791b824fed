//! Cross-chain settlement payload codec.
//!
//! This is the entire wire contract between the two ends of a settlement
//! channel and must remain byte-stable across both. Serialised with Borsh;
//! because every field is fixed-size the layout is deterministic:
//!
//! ```text
//! [32 bytes: asset marker] [8 bytes: min_out (u64-le)]
//! ```

use {
    borsh::{BorshDeserialize, BorshSerialize},
    pyre_interface::types::AssetId,
};

/// Outbound settlement payload.
///
/// `asset` is [`AssetId::NATIVE`] for native settlements, the token
/// identifier otherwise. `min_out` is the slippage floor the receiving
/// router passes to its swap adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SettlementPayload {
    pub asset: AssetId,
    pub min_out: u64,
}

impl SettlementPayload {
    /// Serialised size: asset (32) + min_out (8).
    pub const SERIALIZED_SIZE: usize = 32 + 8;

    /// Serialise to the wire representation.
    pub fn encode(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut buf = Vec::with_capacity(Self::SERIALIZED_SIZE);
        BorshSerialize::serialize(self, &mut buf)?;
        Ok(buf)
    }

    /// Deserialise from the wire representation. Rejects trailing bytes.
    pub fn decode(data: &[u8]) -> Result<Self, std::io::Error> {
        if data.len() != Self::SERIALIZED_SIZE {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "settlement payload must be {} bytes, got {}",
                    Self::SERIALIZED_SIZE,
                    data.len()
                ),
            ));
        }
        borsh::from_slice(data)
    }
}
