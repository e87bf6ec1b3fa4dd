//! A [`PlatformClient`] connected to a Steam connection manager.
//!
//! Presence, games played and free licenses go over the client connection. Web session cookies
//! cannot be minted from the connection here, so they come from an optional [`WebSession`] which
//! is checked against the connected account on log on.

use crate::client::{ClientEvent, PlatformClient};
use crate::credentials::Credentials;
use crate::enums::PersonaState;
use crate::error::{Error, Result};
use crate::types::AppId;
use crate::web_session::WebSession;
use std::sync::{Arc, RwLock};
use futures::StreamExt;
use steam_vent::auth::{AuthConfirmationHandler, DeviceConfirmationHandler, FileGuardDataStore, SharedSecretAuthConfirmationHandler};
use steam_vent::{Connection, ConnectionTrait, ServerList};
use steam_vent_proto::steammessages_clientserver::cmsg_client_games_played::GamePlayed;
use steam_vent_proto::steammessages_clientserver::CMsgClientGamesPlayed;
use steam_vent_proto::steammessages_clientserver_2::{
    CMsgClientRequestFreeLicense,
    CMsgClientRequestFreeLicenseResponse,
};
use steam_vent_proto::steammessages_clientserver_friends::CMsgClientChangeStatus;
use steam_vent_proto::steammessages_clientserver_login::CMsgClientLoggedOff;
use tokio::sync::mpsc;

/// Events are only ever a disconnect or an error, one per connection.
const EVENT_BUFFER: usize = 4;

/// A Steam account logged on through a connection manager.
pub struct SteamClient {
    connection: tokio::sync::RwLock<Option<Connection>>,
    web: Option<WebSession>,
    /// The Steam ID while the connection is up.
    session: Arc<RwLock<Option<u64>>>,
    events: mpsc::Sender<ClientEvent>,
}

impl SteamClient {
    /// Creates a client and the receiver for the events it pushes. Without a web session
    /// [`PlatformClient::web_session`] fails with [`Error::NotLoggedIn`].
    pub fn new(web: Option<WebSession>) -> (Self, mpsc::Receiver<ClientEvent>) {
        let (events, receiver) = mpsc::channel(EVENT_BUFFER);
        let client = Self {
            connection: tokio::sync::RwLock::new(None),
            web,
            session: Arc::new(RwLock::new(None)),
            events,
        };

        (client, receiver)
    }

    /// Watches for the connection being dropped. Clears the session and pushes the event.
    fn watch_logged_off(&self, connection: &Connection) {
        let mut logged_off = Box::pin(connection.on::<CMsgClientLoggedOff>());
        let session = Arc::clone(&self.session);
        let events = self.events.clone();

        tokio::spawn(async move {
            let event = match logged_off.next().await {
                Some(Ok(message)) => ClientEvent::Disconnected {
                    eresult: message.eresult(),
                    message: "Logged off by Steam".into(),
                },
                Some(Err(error)) => ClientEvent::Error(error.to_string()),
                None => ClientEvent::Disconnected {
                    eresult: 0,
                    message: "Connection closed".into(),
                },
            };

            set_session(&session, None);
            log::debug!("Connection ended: {event:?}");
            // nobody listens once the workflow has finished
            let _ = events.send(event).await;
        });
    }

    /// Marks the session dropped after a failed send.
    fn connection_error(&self, error: steam_vent::NetworkError) -> Error {
        set_session(&self.session, None);
        Error::Client(error.to_string())
    }
}

fn set_session(session: &RwLock<Option<u64>>, steamid: Option<u64>) {
    if let Ok(mut session) = session.write() {
        *session = steamid;
    }
}

fn change_status(state: PersonaState) -> CMsgClientChangeStatus {
    CMsgClientChangeStatus {
        persona_state: Some(u32::from(u8::from(state))),
        ..Default::default()
    }
}

fn games_played(appids: &[AppId]) -> CMsgClientGamesPlayed {
    CMsgClientGamesPlayed {
        games_played: appids
            .iter()
            .map(|appid| GamePlayed {
                game_id: Some(u64::from(*appid)),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

impl PlatformClient for SteamClient {
    async fn log_on(&self, credentials: &Credentials) -> Result<()> {
        let server_list = ServerList::discover().await
            .map_err(|error| Error::Client(error.to_string()))?;
        let connection = Connection::login(
            &server_list,
            &credentials.account_name,
            &credentials.password,
            FileGuardDataStore::user_cache(),
            SharedSecretAuthConfirmationHandler::new(&credentials.shared_secret)
                .or(DeviceConfirmationHandler),
        ).await
            .map_err(|error| Error::Client(error.to_string()))?;
        let steamid: u64 = connection.steam_id().into();

        if let Some(web) = &self.web {
            web.verify(credentials, steamid).await?;
        }

        self.watch_logged_off(&connection);
        *self.connection.write().await = Some(connection);
        set_session(&self.session, Some(steamid));
        log::debug!("Logged on as {} ({steamid})", credentials.account_name);

        Ok(())
    }

    async fn web_session(&self) -> Result<Vec<String>> {
        if self.session_id().is_none() {
            return Err(Error::NotLoggedIn);
        }

        self.web
            .as_ref()
            .map(|web| web.cookies().to_vec())
            .ok_or(Error::NotLoggedIn)
    }

    async fn request_free_license(&self, appids: &[AppId]) -> Result<Vec<AppId>> {
        let connection = self.connection.read().await;
        let connection = connection.as_ref().ok_or(Error::NotLoggedIn)?;
        let response: CMsgClientRequestFreeLicenseResponse = connection
            .job(CMsgClientRequestFreeLicense {
                appids: appids.to_vec(),
                ..Default::default()
            })
            .await
            .map_err(|error| self.connection_error(error))?;

        Ok(response.granted_appids)
    }

    async fn set_persona(&self, state: PersonaState) -> Result<()> {
        let connection = self.connection.read().await;
        let connection = connection.as_ref().ok_or(Error::NotLoggedIn)?;

        connection.send(change_status(state)).await
            .map_err(|error| self.connection_error(error))
    }

    async fn games_played(&self, appids: &[AppId]) -> Result<()> {
        let connection = self.connection.read().await;
        let connection = connection.as_ref().ok_or(Error::NotLoggedIn)?;

        connection.send(games_played(appids)).await
            .map_err(|error| self.connection_error(error))
    }

    fn log_off(&self) {
        set_session(&self.session, None);

        // dropping the connection closes it
        if let Ok(mut connection) = self.connection.try_write() {
            connection.take();
        }
    }

    fn session_id(&self) -> Option<u64> {
        self.session.read()
            .map(|session| *session)
            .unwrap_or(None)
    }
}
