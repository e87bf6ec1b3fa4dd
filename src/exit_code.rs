//! Process exit codes. Every code either binary exits with is defined here.

use crate::playtime::PlaytimeOutcome;
use crate::trade::{TradeError, TradeOutcome};
use num_enum::IntoPrimitive;

/// Exit codes for the `playtime` binary.
#[derive(Debug, IntoPrimitive, PartialEq, Eq, Clone, Copy)]
#[repr(i32)]
pub enum PlaytimeExit {
    /// No arguments were given. Nothing was done.
    NoArguments = 0,
    /// The session dropped before the target time was reached.
    Disconnected = 1,
    /// Games were played for the full duration.
    Completed = 2,
    /// A login, protocol or configuration error.
    Error = 4,
}

impl From<PlaytimeOutcome> for PlaytimeExit {
    fn from(outcome: PlaytimeOutcome) -> Self {
        match outcome {
            PlaytimeOutcome::Completed => Self::Completed,
            PlaytimeOutcome::Disconnected => Self::Disconnected,
            PlaytimeOutcome::Error => Self::Error,
        }
    }
}

/// Exit codes for the `send-trade` binary.
#[derive(Debug, IntoPrimitive, PartialEq, Eq, Clone, Copy)]
#[repr(i32)]
pub enum TradeExit {
    /// Not enough arguments were given. Nothing was done.
    InsufficientArguments = 0,
    /// Any failure, including having no inventories to read.
    Failure = -1,
    /// Every batch was sent, confirmed or skipped.
    ///
    /// This is also the code for runs where every batch was skipped for lack of items.
    AllBatchesResolved = 1,
}

impl From<&TradeOutcome> for TradeExit {
    fn from(outcome: &TradeOutcome) -> Self {
        if outcome.all_resolved() {
            Self::AllBatchesResolved
        } else {
            Self::Failure
        }
    }
}

impl From<&TradeError> for TradeExit {
    fn from(_error: &TradeError) -> Self {
        Self::Failure
    }
}

/// Exits the process with `code`.
pub fn exit<T>(code: T) -> !
where
    T: Into<i32>,
{
    std::process::exit(code.into())
}
