//! Error types for the fee router.

use {
    pyre_interface::{
        token::TokenError,
        transport::TransportError,
        types::{AccountId, AssetId, ChannelId},
        venue::VenueError,
    },
    pyre_staking::LedgerError,
    thiserror::Error,
};

/// Errors produced by the fee router.
///
/// Every error aborts the enclosing atomic operation and leaves all state
/// unchanged. None are retried internally; retry is the keeper's call.
/// Dust-below-floor and zero-balance-on-receive are defined no-ops, not
/// errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A zero-value operation was supplied.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// The owner supplied the zero account where a real one is required.
    #[error("address must not be the zero account")]
    ZeroAddress,

    /// Construction-time or capability configuration is invalid.
    #[error("invalid router configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The inbound handler was invoked by something other than the
    /// configured transport endpoint.
    #[error("caller {caller} is not the transport endpoint")]
    NotAuthorizedSender { caller: AccountId },

    /// Message from a channel/sender pair absent from the trusted-remote
    /// registry. No funds ever move for such a message.
    #[error("untrusted remote: sender {sender} on channel {channel}")]
    UntrustedRemote {
        channel: ChannelId,
        sender: AccountId,
    },

    /// The settlement payload did not decode.
    #[error("malformed settlement payload: {0}")]
    MalformedPayload(String),

    /// Neither a direct nor a two-hop swap route exists for the asset.
    /// Terminal for that asset until liquidity appears.
    #[error("no swap route for asset {asset}")]
    NoRoute { asset: AssetId },

    /// Realized swap output fell below the caller's floor.
    #[error("swap output {actual} below minimum {min_out}")]
    InsufficientOutput { actual: u64, min_out: u64 },

    /// A privileged operation was attempted by a non-owner.
    #[error("caller {caller} is not the router owner")]
    Unauthorized { caller: AccountId },

    /// The token ledger refused a transfer/approve/burn.
    #[error("token ledger error: {0}")]
    Token(#[from] TokenError),

    /// The transport refused the outbound message.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The staking ledger refused the reward injection.
    #[error("staking ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Arithmetic overflow in fee or sequence bookkeeping.
    #[error("arithmetic overflow")]
    Overflow,
}

impl From<VenueError> for RouterError {
    fn from(err: VenueError) -> Self {
        match err {
            VenueError::InsufficientOutput { actual, min_out } => {
                Self::InsufficientOutput { actual, min_out }
            }
            // The adapter probes pools before swapping, so a missing pool
            // surfacing from the venue means the route genuinely vanished.
            VenueError::MissingPool(asset, _, _) => Self::NoRoute { asset },
            VenueError::Token(e) => Self::Token(e),
        }
    }
}

/// Convenience result type for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
