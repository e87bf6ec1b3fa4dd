//! The API for mobile confirmations.

use crate::client::Confirmations;
use crate::error::{ConfirmationError, Error, Result};
use crate::helpers::{
    check_response,
    get_default_client,
    get_session_from_cookies,
    parses_response,
    COMMUNITY_HOSTNAME,
    USER_AGENT_STRING,
};
use crate::response::Confirmation;
use crate::session::Session;
use crate::types::{HttpClient, TradeOfferId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use another_steam_totp::{generate_confirmation_key, get_device_id, Tag};
use reqwest::cookie::Jar;
use serde::{Deserialize, Serialize};
use url::Url;

/// The API for mobile confirmations.
#[derive(Debug, Clone)]
pub struct MobileAPI {
    /// The time offset from Steam's servers.
    pub time_offset: i64,
    /// The session.
    session: Arc<RwLock<Option<Session>>>,
    /// The client for making requests.
    client: HttpClient,
    /// The cookies to make requests with. Since the requests are made with the provided client,
    /// the cookies should be the same as what the client uses.
    cookies: Arc<Jar>,
}

impl Default for MobileAPI {
    fn default() -> Self {
        Self::new()
    }
}

impl MobileAPI {
    /// Hostname for requests.
    const HOSTNAME: &'static str = COMMUNITY_HOSTNAME;
    /// Header the mobile app sends with confirmation requests.
    const REQUESTED_WITH: &'static str = "com.valvesoftware.android.steam.community";

    pub fn new() -> Self {
        let cookies = Arc::new(Jar::default());

        Self::with_client(
            get_default_client(Arc::clone(&cookies), USER_AGENT_STRING),
            cookies,
        )
    }

    /// Creates a [`MobileAPI`] using an existing client and the cookies connected to it.
    pub fn with_client(client: HttpClient, cookies: Arc<Jar>) -> Self {
        Self {
            time_offset: 0,
            session: Arc::new(RwLock::new(None)),
            client,
            cookies,
        }
    }

    /// Sets cookies.
    ///
    /// All requests require your cookies to be set. Make sure your cookies are set before using
    /// this API.
    pub fn set_cookies(
        &self,
        cookies: &[String],
    ) -> Result<()> {
        let mut cookies = cookies.to_vec();
        let session = get_session_from_cookies(&mut cookies)?;
        let url = Self::get_url("/").parse::<Url>()
            .map_err(|error| Error::Response(error.to_string()))?;

        for cookie_str in &cookies {
            self.cookies.add_cookie_str(cookie_str, &url);
        }

        *self.session.write().map_err(|_| Error::NotLoggedIn)? = Some(session);

        Ok(())
    }

    /// Gets the pending confirmations.
    pub async fn get_trade_confirmations(
        &self,
        identity_secret: &str,
    ) -> Result<Vec<Confirmation>> {
        let uri = Self::get_url("/mobileconf/getlist");
        let query = self.get_confirmation_query_params(identity_secret, Tag::Conf)?;
        let response = self.client.get(&uri)
            .header("X-Requested-With", Self::REQUESTED_WITH)
            .query(&query)
            .send()
            .await?;
        let body: GetConfirmationsResponse = parses_response(response).await?;

        body.into_confirmations()
    }

    /// Accepts the confirmation for the trade offer.
    pub async fn accept_confirmation_for_object(
        &self,
        identity_secret: &str,
        tradeofferid: TradeOfferId,
    ) -> Result<()> {
        let confirmation = self.get_trade_confirmations(identity_secret).await?
            .into_iter()
            .find(|confirmation| confirmation.creator_id == tradeofferid)
            .ok_or(ConfirmationError::NotFound(tradeofferid))?;

        log::debug!("Accepting confirmation {confirmation}");

        self.allow_confirmation(identity_secret, &confirmation).await
    }

    /// Acknowledges the trade protection notice on the account.
    pub async fn acknowledge_trade_protection(&self) -> Result<()> {
        #[derive(Serialize)]
        struct AcknowledgeParams<'a> {
            sessionid: &'a str,
            message: u8,
        }

        let session = self.get_session()?;
        let uri = Self::get_url("/trade/new/acknowledge");
        let response = self.client.post(&uri)
            .form(&AcknowledgeParams {
                sessionid: &session.sessionid,
                message: 1,
            })
            .send()
            .await?;

        check_response(response).await?;

        Ok(())
    }

    fn get_confirmation_query_params(
        &self,
        identity_secret: &str,
        tag: Tag,
    ) -> Result<HashMap<&'static str, String>> {
        let steamid = self.get_session()?.steamid;
        let (key, time) = generate_confirmation_key(identity_secret, tag, Some(self.time_offset))?;
        let mut params: HashMap<&'static str, String> = HashMap::new();

        params.insert("p", get_device_id(steamid));
        params.insert("a", steamid.to_string());
        params.insert("k", key);
        params.insert("t", time.to_string());
        params.insert("m", "react".into());
        params.insert("tag", tag.to_string());

        Ok(params)
    }

    async fn allow_confirmation(
        &self,
        identity_secret: &str,
        confirmation: &Confirmation,
    ) -> Result<()> {
        let mut query = self.get_confirmation_query_params(identity_secret, Tag::Conf)?;

        query.insert("op", "allow".into());
        query.insert("cid", confirmation.id.to_string());
        query.insert("ck", confirmation.nonce.to_string());

        let uri = Self::get_url("/mobileconf/ajaxop");
        let response = self.client.get(&uri)
            .header("X-Requested-With", Self::REQUESTED_WITH)
            .query(&query)
            .send()
            .await?;
        let body: SendConfirmationResponse = parses_response(response).await?;

        body.into_result()
    }

    fn get_session(&self) -> Result<Session> {
        self.session.read()
            .ok()
            .and_then(|session| session.clone())
            .ok_or(Error::NotLoggedIn)
    }

    fn get_url(pathname: &str) -> String {
        format!("https://{}{pathname}", Self::HOSTNAME)
    }
}

impl Confirmations for MobileAPI {
    fn set_cookies(&self, cookies: &[String]) -> Result<()> {
        MobileAPI::set_cookies(self, cookies)
    }

    async fn accept_confirmation_for_object(
        &self,
        identity_secret: &str,
        tradeofferid: TradeOfferId,
    ) -> Result<()> {
        MobileAPI::accept_confirmation_for_object(self, identity_secret, tradeofferid).await
    }

    async fn acknowledge_trade_protection(&self) -> Result<()> {
        MobileAPI::acknowledge_trade_protection(self).await
    }
}

#[derive(Deserialize, Debug)]
struct GetConfirmationsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    needauth: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    conf: Vec<Confirmation>,
}

impl GetConfirmationsResponse {
    fn into_confirmations(self) -> Result<Vec<Confirmation>> {
        if self.success {
            Ok(self.conf)
        } else if self.needauth {
            Err(Error::NotLoggedIn)
        } else {
            Err(Error::Response(
                self.message.unwrap_or_else(|| "Failed to get confirmations".into())
            ))
        }
    }
}

#[derive(Deserialize, Debug)]
struct SendConfirmationResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

impl SendConfirmationResponse {
    fn into_result(self) -> Result<()> {
        if self.success {
            return Ok(());
        }

        // Steam gives no message when the confirmation is blocked by trade protection.
        let error = match self.message.filter(|message| !message.is_empty()) {
            Some(message) => ConfirmationError::Unsuccessful(message),
            None => ConfirmationError::CouldNotAct,
        };

        Err(error.into())
    }
}
