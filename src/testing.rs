//! In-memory collaborators for tests.

use crate::client::{Confirmations, PlatformClient, TradeManager};
use crate::credentials::Credentials;
use crate::enums::PersonaState;
use crate::error::{ConfirmationError, Error, Result};
use crate::inventory::InventorySource;
use crate::request::NewTradeOffer;
use crate::response::{Asset, Inventory, SentOffer};
use crate::types::{AppId, ContextId, TradeOfferId};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

pub const COOKIES: &[&str] = &[
    "sessionid=37bf523a24034ec06c60ec61",
    "steamLoginSecure=76561198080179568%7C%7Ctoken",
];

pub fn credentials() -> Credentials {
    Credentials::new("account".into(), "password".into(), "cnOgv/KdpLoP6Nbh0GMkXkPXALQ=".into())
        .machine_name("idler".into())
        .identity_secret("identity".into())
}

pub fn asset(source: InventorySource, assetid: u64, tradable: bool) -> Asset {
    Asset {
        appid: source.appid,
        contextid: source.contextid,
        assetid,
        amount: 1,
        classid: 310777185,
        instanceid: None,
        tradable,
        market_hash_name: Some(format!("Item {assetid}")),
    }
}

/// A call made on [`MockClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCall {
    LogOn,
    WebSession,
    RequestFreeLicense(Vec<AppId>),
    SetPersona(PersonaState),
    GamesPlayed(Vec<AppId>),
    LogOff,
}

#[derive(Debug, Default)]
pub struct MockClient {
    pub fail_log_on: bool,
    pub fail_web_session: bool,
    pub fail_license: bool,
    /// How long the license request takes.
    pub license_delay: Option<Duration>,
    pub fail_games_played: bool,
    /// The session drops after this many liveness checks.
    pub session_drops_after: Option<usize>,
    pub calls: Mutex<Vec<ClientCall>>,
    pub liveness_checks: Mutex<usize>,
}

impl MockClient {
    pub fn calls(&self) -> Vec<ClientCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn liveness_checks(&self) -> usize {
        *self.liveness_checks.lock().unwrap()
    }

    fn record(&self, call: ClientCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PlatformClient for MockClient {
    async fn log_on(&self, _credentials: &Credentials) -> Result<()> {
        self.record(ClientCall::LogOn);

        if self.fail_log_on {
            return Err(Error::Response("InvalidPassword".into()));
        }

        Ok(())
    }

    async fn web_session(&self) -> Result<Vec<String>> {
        self.record(ClientCall::WebSession);

        if self.fail_web_session {
            return Err(Error::NotLoggedIn);
        }

        Ok(COOKIES.iter().map(|cookie| cookie.to_string()).collect())
    }

    async fn request_free_license(&self, appids: &[AppId]) -> Result<Vec<AppId>> {
        self.record(ClientCall::RequestFreeLicense(appids.to_vec()));

        if let Some(delay) = self.license_delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_license {
            return Err(Error::Response("Timeout".into()));
        }

        Ok(appids.to_vec())
    }

    async fn set_persona(&self, state: PersonaState) -> Result<()> {
        self.record(ClientCall::SetPersona(state));
        Ok(())
    }

    async fn games_played(&self, appids: &[AppId]) -> Result<()> {
        self.record(ClientCall::GamesPlayed(appids.to_vec()));

        if self.fail_games_played {
            return Err(Error::Response("NoConnection".into()));
        }

        Ok(())
    }

    fn log_off(&self) {
        self.record(ClientCall::LogOff);
    }

    fn session_id(&self) -> Option<u64> {
        let mut checks = self.liveness_checks.lock().unwrap();

        *checks += 1;

        match self.session_drops_after {
            Some(after) if *checks > after => None,
            _ => Some(76561198080179568),
        }
    }
}

#[derive(Debug, Default)]
pub struct MockTradeManager {
    /// Inventory contents by source. `None` makes the fetch fail; missing sources are empty.
    pub inventories: HashMap<InventorySource, Option<Inventory>>,
    /// How long each fetch takes.
    pub delays: HashMap<InventorySource, Duration>,
    pub needs_confirmation: bool,
    pub fail_send: bool,
    pub cookies: Mutex<Vec<String>>,
    pub fetched: Mutex<Vec<(InventorySource, bool)>>,
    pub sent: Mutex<Vec<NewTradeOffer>>,
}

impl MockTradeManager {
    pub fn with_inventory(mut self, source: InventorySource, inventory: Option<Inventory>) -> Self {
        self.inventories.insert(source, inventory);
        self
    }

    pub fn with_delay(mut self, source: InventorySource, delay: Duration) -> Self {
        self.delays.insert(source, delay);
        self
    }

    pub fn sent(&self) -> Vec<NewTradeOffer> {
        self.sent.lock().unwrap().clone()
    }
}

impl TradeManager for MockTradeManager {
    async fn set_cookies(&self, cookies: &[String]) -> Result<()> {
        *self.cookies.lock().unwrap() = cookies.to_vec();
        Ok(())
    }

    async fn get_inventory_contents(
        &self,
        appid: AppId,
        contextid: ContextId,
        include_untradable: bool,
    ) -> Result<Inventory> {
        let source = InventorySource::new(appid, contextid);

        if let Some(delay) = self.delays.get(&source) {
            tokio::time::sleep(*delay).await;
        }

        self.fetched.lock().unwrap().push((source, include_untradable));

        match self.inventories.get(&source) {
            Some(Some(inventory)) => Ok(inventory.clone()),
            Some(None) => Err(Error::Response("This profile is private.".into())),
            None => Ok(Vec::new()),
        }
    }

    async fn send_offer(&self, offer: &NewTradeOffer) -> Result<SentOffer> {
        let mut sent = self.sent.lock().unwrap();

        if self.fail_send {
            return Err(Error::Response("There was an error sending your trade offer. (15)".into()));
        }

        sent.push(offer.clone());

        Ok(SentOffer {
            tradeofferid: 6285104390 + sent.len() as TradeOfferId,
            needs_mobile_confirmation: self.needs_confirmation,
            needs_email_confirmation: false,
            email_domain: None,
        })
    }
}

/// What a confirmation attempt on [`MockConfirmations`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptResult {
    Ok,
    CouldNotAct,
    Rejected,
}

#[derive(Debug, Default)]
pub struct MockConfirmations {
    /// Results for successive accept calls. Accepts succeed once these run out.
    pub accept_results: Mutex<VecDeque<AcceptResult>>,
    pub fail_acknowledge: bool,
    pub accepted: Mutex<Vec<TradeOfferId>>,
    pub acknowledged: Mutex<usize>,
    pub has_cookies: Mutex<bool>,
}

impl MockConfirmations {
    pub fn with_results<T>(results: T) -> Self
    where
        T: IntoIterator<Item = AcceptResult>,
    {
        Self {
            accept_results: Mutex::new(results.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn accept_calls(&self) -> usize {
        self.accepted.lock().unwrap().len()
    }

    pub fn acknowledged(&self) -> usize {
        *self.acknowledged.lock().unwrap()
    }
}

impl Confirmations for MockConfirmations {
    fn set_cookies(&self, _cookies: &[String]) -> Result<()> {
        *self.has_cookies.lock().unwrap() = true;
        Ok(())
    }

    async fn accept_confirmation_for_object(
        &self,
        _identity_secret: &str,
        tradeofferid: TradeOfferId,
    ) -> Result<()> {
        self.accepted.lock().unwrap().push(tradeofferid);

        match self.accept_results.lock().unwrap().pop_front().unwrap_or(AcceptResult::Ok) {
            AcceptResult::Ok => Ok(()),
            AcceptResult::CouldNotAct => Err(ConfirmationError::CouldNotAct.into()),
            AcceptResult::Rejected => Err(ConfirmationError::Unsuccessful("Invalid nonce".into()).into()),
        }
    }

    async fn acknowledge_trade_protection(&self) -> Result<()> {
        *self.acknowledged.lock().unwrap() += 1;

        if self.fail_acknowledge {
            return Err(Error::Http(reqwest::StatusCode::FORBIDDEN));
        }

        Ok(())
    }
}
