//! Keeps a set of games running for a fixed amount of time.

use crate::client::{ClientEvent, PlatformClient};
use crate::credentials::Credentials;
use crate::enums::PersonaState;
use crate::error::Result;
use crate::types::AppId;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, sleep, timeout, Instant};

/// How long to wait after logging on before playing, so granted licenses can propagate. License
/// requests still pending when it ends are abandoned.
pub const WARMUP: Duration = Duration::from_secs(80);
/// How often the session is checked while playing.
pub const POLL_INTERVAL: Duration = Duration::from_secs(15);

/// How a playtime run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaytimeOutcome {
    /// Games were played for the full duration.
    Completed,
    /// The session dropped.
    Disconnected,
    /// Logging on failed or the client reported an error.
    Error,
}

/// Plays `appids` for a fixed duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playtime {
    appids: Vec<AppId>,
    target: Duration,
}

impl Playtime {
    pub fn new(appids: Vec<AppId>, minutes: u64) -> Self {
        Self {
            appids,
            target: Duration::from_secs(minutes.saturating_mul(60)),
        }
    }

    /// The total time to play for.
    pub fn target(&self) -> Duration {
        self.target
    }

    /// Logs on and plays until the target is reached, the session drops, or the client pushes an
    /// event. The poll timer is dropped on every return.
    pub async fn run<C>(
        &self,
        client: &C,
        credentials: &Credentials,
        mut events: mpsc::Receiver<ClientEvent>,
    ) -> PlaytimeOutcome
    where
        C: PlatformClient,
    {
        if let Err(error) = client.log_on(credentials).await {
            log::error!("Error logging on as {}: {error}", credentials.account_name);
            return PlaytimeOutcome::Error;
        }

        log::info!("Logged on as {}", credentials.account_name);

        let warmup = async {
            let (licenses, ()) = tokio::join!(
                timeout(WARMUP, client.request_free_license(&self.appids)),
                sleep(WARMUP),
            );

            match licenses {
                Ok(Ok(granted)) if !granted.is_empty() => log::info!("Granted licenses: {granted:?}"),
                Ok(Ok(_)) => {},
                Ok(Err(error)) => log::warn!("Error requesting free licenses: {error}"),
                Err(_) => log::warn!("Free license request timed out"),
            }
        };

        tokio::select! {
            _ = warmup => {},
            event = events.recv() => return on_event(event),
        }

        if let Err(error) = self.start_playing(client).await {
            log::error!("Error starting games: {error}");
            client.log_off();
            return PlaytimeOutcome::Error;
        }

        let mut timer = interval_at(Instant::now() + POLL_INTERVAL, POLL_INTERVAL);
        let mut elapsed = Duration::ZERO;

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    elapsed += POLL_INTERVAL;

                    if let Some(outcome) = self.poll(client, elapsed).await {
                        return outcome;
                    }
                },
                event = events.recv() => return on_event(event),
            }
        }
    }

    async fn start_playing<C>(&self, client: &C) -> Result<()>
    where
        C: PlatformClient,
    {
        client.set_persona(PersonaState::Online).await?;
        client.games_played(&self.appids).await?;
        log::info!("Playing {:?} for {} minutes", self.appids, self.target.as_secs() / 60);

        Ok(())
    }

    /// Checks the session after `elapsed` of play. Returns the outcome once the run is over.
    async fn poll<C>(&self, client: &C, elapsed: Duration) -> Option<PlaytimeOutcome>
    where
        C: PlatformClient,
    {
        if client.session_id().is_none() {
            log::warn!("Session dropped after {}s", elapsed.as_secs());
            client.log_off();
            return Some(PlaytimeOutcome::Disconnected);
        }

        log::debug!("Played for {}s of {}s", elapsed.as_secs(), self.target.as_secs());

        if elapsed < self.target {
            return None;
        }

        if let Err(error) = client.games_played(&[]).await {
            log::warn!("Error stopping games: {error}");
        }

        client.log_off();
        log::info!("Finished playing after {}s", elapsed.as_secs());

        Some(PlaytimeOutcome::Completed)
    }
}

fn on_event(event: Option<ClientEvent>) -> PlaytimeOutcome {
    match event {
        Some(ClientEvent::Error(message)) => {
            log::error!("Client error: {message}");
            PlaytimeOutcome::Error
        },
        Some(ClientEvent::Disconnected { eresult, message }) => {
            log::warn!("Disconnected: {message} ({eresult})");
            PlaytimeOutcome::Disconnected
        },
        None => {
            log::warn!("Client event stream closed");
            PlaytimeOutcome::Disconnected
        },
    }
}
