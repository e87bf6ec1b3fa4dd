use crate::types::TradeOfferId;
use reqwest_middleware;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Any range of errors encountered when making requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An input parameter is missing or invalid.
    #[error("Invalid parameter: {}", .0)]
    Parameter(#[from] ParameterError),
    /// An unexpected response containing a message was received.
    #[error("Unexpected response: {}", .0)]
    Response(String),
    /// An error was encountered making a request.
    #[error("reqwest error: {}", .0)]
    Reqwest(#[from] reqwest::Error),
    /// An error was encountered within the request middleware.
    #[error("reqwest middleware error: {}", .0)]
    ReqwestMiddleware(anyhow::Error),
    /// An error was encountered parsing a JSON response body.
    #[error("Error parsing response: {}", .0)]
    Parse(#[from] serde_json::Error),
    /// An error was encountered on response. This is a response with an HTTP code other than 200.
    #[error("Error {}", .0)]
    Http(reqwest::StatusCode),
    /// You are not logged in.
    #[error("Not logged in")]
    NotLoggedIn,
    /// An error occurred generating a Steam Guard code or confirmation key.
    #[error("TOTP error: {}", .0)]
    Totp(#[from] another_steam_totp::Error),
    /// An error was encountered acting on a mobile confirmation.
    #[error("Confirmation error: {}", .0)]
    Confirmation(#[from] ConfirmationError),
    /// The trade offer URL could not be understood.
    #[error("Invalid trade offer URL: {}", .0)]
    TradeLink(String),
    /// The client connection failed or was refused.
    #[error("Steam client error: {}", .0)]
    Client(String),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Error {
        match error {
            reqwest_middleware::Error::Reqwest(e) => Error::Reqwest(e),
            reqwest_middleware::Error::Middleware(e) => Error::ReqwestMiddleware(e),
        }
    }
}

/// Errors for missing or invalid parameters.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParameterError {
    /// Offers without items cannot be sent.
    #[error("Cannot send an empty offer.")]
    EmptyOffer,
    /// The session cookies are missing a `steamLoginSecure` cookie.
    #[error("Cookies are missing steamLoginSecure.")]
    MissingLoginCookie,
}

/// Errors from acting on a mobile confirmation.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum ConfirmationError {
    /// Steam reported it could not act on the confirmation. This usually means the account has
    /// an unacknowledged trade protection notice.
    #[error("Could not act on confirmation")]
    CouldNotAct,
    /// Steam rejected the confirmation with a message.
    #[error("{}", .0)]
    Unsuccessful(String),
    /// No pending confirmation exists for the trade offer.
    #[error("No confirmation for offer {}", .0)]
    NotFound(TradeOfferId),
}
