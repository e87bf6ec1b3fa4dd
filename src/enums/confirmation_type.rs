use serde::{Serialize, Deserialize};
use strum_macros::Display;
use num_enum::FromPrimitive;

/// The type of confirmation.
#[derive(Debug, Serialize, Deserialize, Display, FromPrimitive, PartialEq, Eq, Clone, Copy)]
#[repr(u32)]
#[serde(from = "u32")]
pub enum ConfirmationType {
    /// Generic.
    Generic = 1,
    /// Confirmation to confirm trade.
    Trade = 2,
    /// Confirmation to confirm on market.
    MarketSell = 3,
    /// Confirmation for account recovery.
    AccountRecovery = 6,
    /// Unknown.
    #[num_enum(catch_all)]
    Unknown(u32),
}

impl Default for ConfirmationType {
    fn default() -> Self {
        Self::Generic
    }
}
