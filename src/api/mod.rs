//! The underlying web API for reading inventories and sending trade offers.

mod response;

use response::{GetInventoryResponse, RawAsset, RawDescription};
use crate::client::TradeManager;
use crate::error::{Error, ParameterError, Result};
use crate::helpers::{
    get_default_client,
    get_session_from_cookies,
    parses_response,
    COMMUNITY_HOSTNAME,
    USER_AGENT_STRING,
};
use crate::request::{NewTradeOffer, NewTradeOfferItem};
use crate::response::{Asset, Inventory, SentOffer};
use crate::serialize::steamid_as_string;
use crate::session::Session;
use crate::types::{AppId, ContextId, AssetId, ClassId, InstanceId, HttpClient};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use reqwest::cookie::Jar;
use reqwest::header::REFERER;
use serde::Serialize;
use steamid_ng::SteamID;
use url::Url;

/// The API for inventories and trade offers.
#[derive(Debug, Clone)]
pub struct TradeOfferAPI {
    /// The client for making requests.
    client: HttpClient,
    /// The cookies to make requests with.
    cookies: Arc<Jar>,
    /// The session derived from the cookies.
    session: Arc<RwLock<Option<Session>>>,
    /// The language for item descriptions.
    pub language: String,
}

impl Default for TradeOfferAPI {
    fn default() -> Self {
        Self::new()
    }
}

impl TradeOfferAPI {
    /// Hostname for requests.
    const HOSTNAME: &'static str = COMMUNITY_HOSTNAME;
    /// Number of items requested per inventory page.
    const INVENTORY_PAGE_SIZE: u32 = 2000;
    /// Delay between inventory page requests.
    const INVENTORY_PAGE_DELAY: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        let cookies = Arc::new(Jar::default());

        Self {
            client: get_default_client(Arc::clone(&cookies), USER_AGENT_STRING),
            cookies,
            session: Arc::new(RwLock::new(None)),
            language: String::from("english"),
        }
    }

    /// Sets cookies. A `sessionid` cookie is added when missing.
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

    fn get_session(&self) -> Result<Session> {
        self.session.read()
            .ok()
            .and_then(|session| session.clone())
            .ok_or(Error::NotLoggedIn)
    }

    /// Gets an inventory belonging to `steamid`, reading every page.
    pub async fn get_inventory(
        &self,
        steamid: SteamID,
        appid: AppId,
        contextid: ContextId,
        include_untradable: bool,
    ) -> Result<Inventory> {
        #[derive(Serialize, Debug)]
        struct Query<'a> {
            l: &'a str,
            count: u32,
            #[serde(skip_serializing_if = "Option::is_none")]
            start_assetid: Option<AssetId>,
        }

        let sid = u64::from(steamid);
        let uri = Self::get_url(&format!("/inventory/{sid}/{appid}/{contextid}"));
        let referer = Self::get_url(&format!("/profiles/{sid}/inventory"));
        let mut responses = Vec::new();
        let mut start_assetid = None;

        loop {
            let response = self.client.get(&uri)
                .header(REFERER, &referer)
                .query(&Query {
                    l: &self.language,
                    count: Self::INVENTORY_PAGE_SIZE,
                    start_assetid,
                })
                .send()
                .await?;
            let body: GetInventoryResponse = parses_response(response).await?;

            if !body.success {
                return Err(Error::Response("Bad response".into()));
            }

            let more_items = body.more_items;
            let last_assetid = body.last_assetid;

            responses.push(body);

            if !more_items {
                break;
            }

            // shouldn't occur, but we wouldn't want to call this endlessly if it does...
            if last_assetid.is_none() || last_assetid == start_assetid {
                return Err(Error::Response("Bad response".into()));
            }

            start_assetid = last_assetid;
            // space out requests
            tokio::time::sleep(Self::INVENTORY_PAGE_DELAY).await;
        }

        into_inventory(responses, include_untradable)
    }

    /// Sends an offer.
    pub async fn send_offer(
        &self,
        offer: &NewTradeOffer,
    ) -> Result<SentOffer> {
        #[derive(Serialize, Debug)]
        struct OfferFormUser<'b> {
            assets: &'b [NewTradeOfferItem],
            currency: Vec<()>,
            ready: bool,
        }

        #[derive(Serialize, Debug)]
        struct OfferForm<'b> {
            newversion: bool,
            version: u32,
            me: OfferFormUser<'b>,
            them: OfferFormUser<'b>,
        }

        #[derive(Serialize, Debug)]
        struct TradeOfferCreateParams<'b> {
            #[serde(skip_serializing_if = "Option::is_none")]
            trade_offer_access_token: Option<&'b str>,
        }

        #[derive(Serialize, Debug)]
        struct SendOfferParams<'a> {
            sessionid: &'a str,
            serverid: u32,
            json_tradeoffer: String,
            tradeoffermessage: &'a str,
            captcha: &'static str,
            trade_offer_create_params: String,
            #[serde(serialize_with = "steamid_as_string")]
            partner: &'a SteamID,
        }

        if offer.is_empty() {
            return Err(ParameterError::EmptyOffer.into());
        }

        let session = self.get_session()?;
        let referer = {
            let mut url = Self::get_url("/tradeoffer/new/").parse::<Url>()
                .map_err(|error| Error::Response(error.to_string()))?;

            url.query_pairs_mut()
                .append_pair("partner", &offer.partner.account_id().to_string());

            if let Some(token) = &offer.token {
                url.query_pairs_mut().append_pair("token", token);
            }

            url.to_string()
        };
        let json_tradeoffer = serde_json::to_string(&OfferForm {
            newversion: true,
            version: offer.items_to_give.len() as u32 + 1,
            me: OfferFormUser {
                assets: &offer.items_to_give,
                currency: Vec::new(),
                ready: false,
            },
            them: OfferFormUser {
                assets: &[],
                currency: Vec::new(),
                ready: false,
            },
        })?;
        let trade_offer_create_params = serde_json::to_string(&TradeOfferCreateParams {
            trade_offer_access_token: offer.token.as_deref(),
        })?;
        let params = SendOfferParams {
            sessionid: &session.sessionid,
            serverid: 1,
            json_tradeoffer,
            tradeoffermessage: offer.message.as_deref().unwrap_or_default(),
            captcha: "",
            trade_offer_create_params,
            partner: &offer.partner,
        };
        let uri = Self::get_url("/tradeoffer/new/send");
        let response = self.client.post(&uri)
            .header(REFERER, referer)
            .form(&params)
            .send()
            .await?;
        let body: SentOffer = parses_response(response).await?;

        Ok(body)
    }

    fn get_url(pathname: &str) -> String {
        format!("https://{}{pathname}", Self::HOSTNAME)
    }
}

impl TradeManager for TradeOfferAPI {
    async fn set_cookies(&self, cookies: &[String]) -> Result<()> {
        TradeOfferAPI::set_cookies(self, cookies)
    }

    async fn get_inventory_contents(
        &self,
        appid: AppId,
        contextid: ContextId,
        include_untradable: bool,
    ) -> Result<Inventory> {
        let steamid = SteamID::from(self.get_session()?.steamid);

        self.get_inventory(steamid, appid, contextid, include_untradable).await
    }

    async fn send_offer(&self, offer: &NewTradeOffer) -> Result<SentOffer> {
        TradeOfferAPI::send_offer(self, offer).await
    }
}

/// Joins the assets from each inventory page with their descriptions.
fn into_inventory(
    responses: Vec<GetInventoryResponse>,
    include_untradable: bool,
) -> Result<Inventory> {
    let mut inventory = Vec::new();

    for body in responses {
        let descriptions = body.descriptions
            .into_iter()
            .map(|description| ((description.classid, description.instanceid), description))
            .collect::<HashMap<(ClassId, InstanceId), RawDescription>>();

        for item in body.assets {
            let RawAsset {
                appid,
                contextid,
                assetid,
                classid,
                instanceid,
                amount,
            } = item;
            let description = descriptions.get(&(classid, instanceid))
                .ok_or_else(|| Error::Response(format!(
                    "Missing descriptions for item {classid}:{}",
                    instanceid.unwrap_or(0),
                )))?;

            if !description.tradable && !include_untradable {
                continue;
            }

            inventory.push(Asset {
                appid,
                contextid,
                assetid,
                amount,
                classid,
                instanceid,
                tradable: description.tradable,
                market_hash_name: description.market_hash_name.clone(),
            });
        }
    }

    Ok(inventory)
}
