//! Command-line arguments for both binaries.

use crate::credentials::Credentials;
use crate::inventory::{parse_inventory_sources, DEFAULT_INVENTORIES};
use crate::trade::TradeConfig;
use crate::types::AppId;
use clap::error::ErrorKind;
use clap::Parser;
use env_logger::{Builder, Env};
use std::ffi::OsString;

/// Loads `.env` and initializes logging at `info` unless `RUST_LOG` says otherwise.
pub fn setup_env() {
    dotenvy::dotenv().ok();
    Builder::from_env(Env::default().default_filter_or("info")).init();
}

/// Plays games for a fixed number of minutes.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "playtime", version, about, long_about = None)]
pub struct PlaytimeArgs {
    /// Account name
    pub login: String,
    /// Account password
    pub password: String,
    /// Shared secret used to generate Steam Guard codes
    pub shared_secret: String,
    /// Machine name reported when logging on
    pub machine_name: String,
    /// Comma-separated app IDs to play e.g. 730,440
    #[arg(value_parser = parse_app_ids)]
    pub app_ids: AppIds,
    /// How many minutes to play for
    pub minutes: u64,
}

impl PlaytimeArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.login.clone(), self.password.clone(), self.shared_secret.clone())
            .machine_name(self.machine_name.clone())
    }
}

/// Sends the items from a set of inventories to a trade offer URL.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "send-trade", version, about, long_about = None)]
pub struct TradeArgs {
    /// Account name
    pub login: String,
    /// Account password
    pub password: String,
    /// Shared secret used to generate Steam Guard codes
    pub shared_secret: String,
    /// Identity secret used to confirm offers
    pub identity_secret: String,
    /// Trade offer URL of the recipient
    pub trade_offer_link: String,
    /// Comma-separated inventories to send from e.g. 730/2,570/2
    #[arg(default_value = DEFAULT_INVENTORIES)]
    pub inventories: String,
}

impl TradeArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.login.clone(), self.password.clone(), self.shared_secret.clone())
            .identity_secret(self.identity_secret.clone())
    }

    pub fn trade_config(&self) -> TradeConfig {
        TradeConfig {
            trade_offer_url: self.trade_offer_link.clone(),
            identity_secret: self.identity_secret.clone(),
            sources: parse_inventory_sources(&self.inventories),
        }
    }
}

/// A list of app IDs parsed from a comma-separated argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIds(pub Vec<AppId>);

fn parse_app_ids(s: &str) -> Result<AppIds, String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<AppId>().map_err(|_| format!("\"{part}\" is not an app ID")))
        .collect::<Result<Vec<_>, _>>()
        .map(AppIds)
}

/// What the arguments asked for.
#[derive(Debug)]
pub enum Invocation<T> {
    /// No arguments were given.
    Empty,
    /// Arguments parsed.
    Run(T),
    /// Help or version was requested. It should be printed and nothing else done.
    Info(clap::Error),
    /// Required arguments are missing.
    Insufficient(clap::Error),
    /// The arguments are invalid.
    Invalid(clap::Error),
}

/// Parses `args`, where the first item is the binary name.
pub fn parse<T, I>(args: I) -> Invocation<T>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    let args = args.into_iter().collect::<Vec<_>>();

    if args.len() <= 1 {
        return Invocation::Empty;
    }

    match T::try_parse_from(args) {
        Ok(parsed) => Invocation::Run(parsed),
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Invocation::Info(error),
            ErrorKind::MissingRequiredArgument => Invocation::Insufficient(error),
            _ => Invocation::Invalid(error),
        },
    }
}
