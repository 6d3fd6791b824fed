//! Cross-chain transport collaborator interface (outbound side).
//!
//! The transport is assumed to provide ordered, exactly-once delivery per
//! channel; the core does not deduplicate messages itself. Inbound delivery
//! is not a trait: the transport calls the router's message handler
//! directly, and the router authenticates that caller against its
//! configured endpoint identity.

use {
    crate::{
        token::{TokenError, TokenLedger},
        types::{AccountId, ChannelId},
    },
    thiserror::Error,
};

/// Errors surfaced by the transport's send primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No route to the destination channel.
    #[error("destination channel {0} unreachable")]
    Unreachable(ChannelId),

    /// The transport refused the message (oversized payload, fee underpaid,
    /// channel halted, ...).
    #[error("transport rejected message: {0}")]
    Rejected(String),

    /// Escrowing the carried value failed.
    #[error("token ledger failure during send: {0}")]
    Token(#[from] TokenError),
}

/// Outbound message channel to a paired router on another chain.
pub trait Transport {
    /// Send `payload` to `destination`, carrying `native_value` out of
    /// `sender`'s balance and hinting `gas_limit` for the destination's
    /// receive handler.
    ///
    /// Atomic: on error, no value has been escrowed.
    fn send(
        &mut self,
        tokens: &mut dyn TokenLedger,
        sender: AccountId,
        destination: ChannelId,
        payload: &[u8],
        native_value: u64,
        gas_limit: u64,
    ) -> Result<(), TransportError>;
}
