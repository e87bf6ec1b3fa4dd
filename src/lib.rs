//! Keeps Steam games running for a set time and sends the contents of inventories as trade
//! offers.
//!
//! Both workflows, [`Playtime`] and [`TradeSender`], are generic over the collaborator traits in
//! [`client`] so they can be driven by the clients in this crate or by anything else which can
//! talk to Steam.

mod api;
mod mobile_api;
mod helpers;
mod serialize;
mod session;
mod steam_client;
mod web_session;
pub mod client;
pub mod config;
pub mod credentials;
pub mod enums;
pub mod error;
pub mod exit_code;
pub mod inventory;
pub mod playtime;
pub mod request;
pub mod response;
pub mod trade;
pub mod types;

#[cfg(test)]
mod testing;

pub use api::TradeOfferAPI;
pub use mobile_api::MobileAPI;
pub use steam_client::SteamClient;
pub use web_session::WebSession;
pub use client::{ClientEvent, PlatformClient, TradeManager, Confirmations};
pub use credentials::Credentials;
pub use error::{Error, ConfirmationError, ParameterError};
pub use inventory::{InventorySource, BatchKind, Batch};
pub use playtime::{Playtime, PlaytimeOutcome};
pub use trade::{TradeSender, TradeConfig, TradeOutcome, TradeError};
pub use steamid_ng::SteamID;
