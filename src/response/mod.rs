//! Models for responses.

mod asset;
mod sent_offer;
mod confirmation;

pub use asset::Asset;
pub use sent_offer::SentOffer;
pub use confirmation::Confirmation;

/// A collection of items from one inventory.
pub type Inventory = Vec<Asset>;
