use crate::enums::ConfirmationType;
use crate::serialize;
use std::fmt;
use serde::{Serialize, Deserialize};

/// Mobile confirmation. Used primarily for confirming trade offers.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Confirmation {
    /// The ID of the confirmation.
    #[serde(with = "serialize::string")]
    pub id: u64,
    /// Trade offer ID or market transaction ID.
    #[serde(with = "serialize::string")]
    pub creator_id: u64,
    /// The nonce.
    #[serde(with = "serialize::string")]
    pub nonce: u64,
    /// The confirmation type.
    #[serde(default)]
    pub r#type: ConfirmationType,
    /// The headline.
    #[serde(default)]
    pub headline: String,
    /// The description.
    #[serde(default)]
    pub summary: Vec<String>,
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.r#type, self.headline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trade_offer_confirmation() {
        let confirmation: Confirmation = serde_json::from_str(include_str!("fixtures/confirmation.json")).unwrap();

        assert_eq!(confirmation.id, 13799599785);
        assert_eq!(confirmation.creator_id, 6285104391);
        assert_eq!(confirmation.nonce, 9141945700999917347);
        assert_eq!(confirmation.r#type, ConfirmationType::Trade);
    }
}
