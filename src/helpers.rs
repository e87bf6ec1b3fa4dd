use crate::error::{Error, ParameterError, Result};
use crate::session::Session;
use crate::types::HttpClient;
use std::sync::Arc;
use reqwest::header;
use reqwest::cookie::CookieStore;
use reqwest_middleware::ClientBuilder;
use serde::de::DeserializeOwned;
use lazy_regex::{regex_captures, regex_is_match};

pub const COMMUNITY_HOSTNAME: &str = "steamcommunity.com";
pub const USER_AGENT_STRING: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.71 Safari/537.36";

/// Creates the default client for making requests using the given cookie store.
pub fn get_default_client<T>(
    cookie_store: Arc<T>,
    user_agent_string: &'static str,
) -> HttpClient
where
    T: CookieStore + 'static,
{
    let mut headers = header::HeaderMap::new();

    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(user_agent_string));

    let client = reqwest::ClientBuilder::new()
        .cookie_provider(cookie_store)
        .default_headers(headers)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());

    ClientBuilder::new(client).build()
}

/// Generates a random sessionid.
pub fn generate_sessionid() -> String {
    // Should look like "37bf523a24034ec06c60ec61"
    (0..12)
        .map(|_| {
            let b = rand::random::<u8>();

            format!("{b:02x?}")
        })
        .collect()
}

/// Extracts the session from a set of cookies. A `sessionid` cookie is generated and appended to
/// `cookies` when none is present.
pub fn get_session_from_cookies(
    cookies: &mut Vec<String>,
) -> std::result::Result<Session, ParameterError> {
    let mut sessionid = None;
    let mut login = None;

    for cookie in cookies.iter() {
        if let Some((_, value)) = regex_captures!(r#"^sessionid=([^;]+)"#, cookie) {
            sessionid = Some(value.to_string());
        } else if let Some((_, steamid, access_token)) = regex_captures!(
            r#"^steamLoginSecure=(\d{17})(?:%7C%7C|\|\|)([^;]*)"#,
            cookie,
        ) {
            if let Ok(steamid) = steamid.parse::<u64>() {
                login = Some((steamid, access_token.to_string()));
            }
        }
    }

    let (steamid, access_token) = login.ok_or(ParameterError::MissingLoginCookie)?;
    let sessionid = sessionid.unwrap_or_else(|| {
        let sessionid = generate_sessionid();

        cookies.push(format!("sessionid={sessionid}"));
        sessionid
    });

    Ok(Session {
        sessionid,
        access_token,
        steamid,
    })
}

fn is_login(location_option: Option<&header::HeaderValue>) -> bool {
    match location_option {
        Some(location) => {
            if let Ok(location_str) = location.to_str() {
                regex_is_match!("/login", location_str)
            } else {
                false
            }
        },
        None => false,
    }
}

/// Checks the status of a response and returns its body.
pub async fn check_response(response: reqwest::Response) -> Result<bytes::Bytes> {
    let status = response.status();

    match status.as_u16() {
        300..=399 if is_login(response.headers().get("location")) => {
            Err(Error::NotLoggedIn)
        },
        400..=599 => {
            Err(Error::Http(status))
        },
        _ => {
            Ok(response.bytes().await?)
        },
    }
}

/// Checks the response and deserializes its JSON body.
pub async fn parses_response<D>(response: reqwest::Response) -> Result<D>
where
    D: DeserializeOwned,
{
    let body = check_response(response).await?;

    parse_body(&body)
}

fn parse_body<D>(body: &[u8]) -> Result<D>
where
    D: DeserializeOwned,
{
    match serde_json::from_slice::<D>(body) {
        Ok(body) => Ok(body),
        Err(parse_error) => {
            // unexpected response
            let html = String::from_utf8_lossy(body);

            if regex_is_match!(r#"<h1>Sorry!</h1>"#, &html) {
                if let Some((_, message)) = regex_captures!("<h3>(.+)</h3>", &html) {
                    Err(Error::Response(message.into()))
                } else {
                    Err(Error::Response("Unexpected error".into()))
                }
            } else if regex_is_match!(r#"<h1>Sign In</h1>"#, &html) && regex_is_match!(r#"g_steamID = false;"#, &html) {
                Err(Error::NotLoggedIn)
            } else if let Some((_, message)) = regex_captures!(r#"<div id="error_msg">\s*([^<]+)\s*</div>"#, &html) {
                Err(Error::Response(message.trim().into()))
            } else {
                log::debug!("Unexpected response body: {html}");
                Err(Error::Parse(parse_error))
            }
        },
    }
}
