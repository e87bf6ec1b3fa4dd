//! Models for making requests.

mod trade_offer;

pub use trade_offer::{NewTradeOffer, NewTradeOfferItem};
