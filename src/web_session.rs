//! Web session cookies for an account, checked against the account they are used for.

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::helpers::{
    get_default_client,
    get_session_from_cookies,
    parses_response,
    COMMUNITY_HOSTNAME,
    USER_AGENT_STRING,
};
use crate::session::Session;
use crate::types::HttpClient;
use std::sync::Arc;
use reqwest::cookie::Jar;
use serde::Deserialize;
use url::Url;

/// Environment variable holding `&`-separated session cookies.
pub const COOKIES_ENV: &str = "STEAM_COOKIES";

/// Session cookies for a web session.
#[derive(Debug, Clone)]
pub struct WebSession {
    client: HttpClient,
    cookies: Vec<String>,
    session: Session,
}

impl WebSession {
    /// Creates a session from cookies. The cookies must include `steamLoginSecure`.
    pub fn new(mut cookies: Vec<String>) -> Result<Self> {
        let session = get_session_from_cookies(&mut cookies)?;
        let jar = Arc::new(Jar::default());
        let url = format!("https://{COMMUNITY_HOSTNAME}").parse::<Url>()
            .map_err(|error| Error::Response(error.to_string()))?;

        for cookie_str in &cookies {
            jar.add_cookie_str(cookie_str, &url);
        }

        Ok(Self {
            client: get_default_client(jar, USER_AGENT_STRING),
            cookies,
            session,
        })
    }

    /// Creates a session from the cookies in the `STEAM_COOKIES` environment variable.
    pub fn from_env() -> Result<Self> {
        let cookies = std::env::var(COOKIES_ENV)
            .map_err(|_| Error::NotLoggedIn)?
            .split('&')
            .map(str::trim)
            .filter(|cookie| !cookie.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();

        Self::new(cookies)
    }

    /// The cookies, including the `sessionid` cookie.
    pub fn cookies(&self) -> &[String] {
        &self.cookies
    }

    /// Checks the cookies are still logged in and belong to the account with `steamid`.
    pub async fn verify(&self, credentials: &Credentials, steamid: u64) -> Result<()> {
        if self.session.steamid != steamid {
            return Err(Error::Response(format!(
                "Cookies are for {} but logged on as {steamid}",
                self.session.steamid,
            )));
        }

        let uri = format!("https://{COMMUNITY_HOSTNAME}/chat/clientjstoken");
        let response = self.client.get(&uri)
            .send()
            .await?;
        let token: ClientJsToken = parses_response(response).await?;

        token.verify(credentials, &self.session)
    }
}

#[derive(Deserialize, Debug)]
struct ClientJsToken {
    #[serde(default)]
    logged_in: bool,
    #[serde(default)]
    steamid: Option<String>,
    #[serde(default)]
    account_name: Option<String>,
}

impl ClientJsToken {
    /// Checks the token belongs to the account being logged on.
    fn verify(&self, credentials: &Credentials, session: &Session) -> Result<()> {
        if !self.logged_in {
            return Err(Error::NotLoggedIn);
        }

        let account_matches = self.account_name
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(&credentials.account_name));
        let steamid_matches = self.steamid
            .as_deref()
            .is_some_and(|steamid| steamid == session.steamid.to_string());

        if !account_matches || !steamid_matches {
            return Err(Error::Response(format!(
                "Cookies do not belong to {}",
                credentials.account_name,
            )));
        }

        Ok(())
    }
}
