//! The collaborators the workflows drive. Implementations are [`crate::SteamClient`],
//! [`crate::TradeOfferAPI`] and [`crate::MobileAPI`].

use crate::credentials::Credentials;
use crate::enums::PersonaState;
use crate::error::Result;
use crate::request::NewTradeOffer;
use crate::response::{Inventory, SentOffer};
use crate::types::{AppId, ContextId, TradeOfferId};
use std::future::Future;

/// An event pushed by a [`PlatformClient`] outside of any request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// A protocol error. The connection is no longer usable.
    Error(String),
    /// The connection was dropped.
    Disconnected {
        /// The result code given for the disconnect.
        eresult: i32,
        /// A message describing the disconnect.
        message: String,
    },
}

/// A logged-on Steam account: presence, games played and the web session.
pub trait PlatformClient {
    /// Logs on with the given credentials.
    fn log_on(&self, credentials: &Credentials) -> impl Future<Output = Result<()>>;

    /// Gets web session cookies for the logged-on account.
    fn web_session(&self) -> impl Future<Output = Result<Vec<String>>>;

    /// Requests free licenses for the apps. Resolves to the app IDs that were granted.
    fn request_free_license(&self, appids: &[AppId]) -> impl Future<Output = Result<Vec<AppId>>>;

    /// Sets the friends-list state.
    fn set_persona(&self, state: PersonaState) -> impl Future<Output = Result<()>>;

    /// Announces the apps as being played. An empty slice stops playing.
    fn games_played(&self, appids: &[AppId]) -> impl Future<Output = Result<()>>;

    /// Logs off.
    fn log_off(&self);

    /// The session ID while logged on. `None` once the session has dropped.
    fn session_id(&self) -> Option<u64>;
}

/// Reads inventories and sends trade offers.
pub trait TradeManager {
    /// Sets cookies for the web session.
    fn set_cookies(&self, cookies: &[String]) -> impl Future<Output = Result<()>>;

    /// Gets the logged-in account's inventory contents.
    fn get_inventory_contents(
        &self,
        appid: AppId,
        contextid: ContextId,
        include_untradable: bool,
    ) -> impl Future<Output = Result<Inventory>>;

    /// Sends an offer.
    fn send_offer(&self, offer: &NewTradeOffer) -> impl Future<Output = Result<SentOffer>>;
}

/// Acts on mobile confirmations.
pub trait Confirmations {
    /// Sets cookies for the web session.
    fn set_cookies(&self, cookies: &[String]) -> Result<()>;

    /// Accepts the confirmation created for the trade offer.
    fn accept_confirmation_for_object(
        &self,
        identity_secret: &str,
        tradeofferid: TradeOfferId,
    ) -> impl Future<Output = Result<()>>;

    /// Acknowledges the trade protection notice on the account. Confirmations fail with
    /// [`crate::error::ConfirmationError::CouldNotAct`] until this is done.
    fn acknowledge_trade_protection(&self) -> impl Future<Output = Result<()>>;
}
