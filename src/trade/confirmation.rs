use crate::client::Confirmations;
use crate::error::{ConfirmationError, Error, Result};
use crate::types::TradeOfferId;

/// Where a confirmation attempt is.
#[derive(Debug)]
pub enum ConfirmationState {
    /// Waiting on an accept. `recovered` is set once the trade protection notice was
    /// acknowledged, after which no further recovery is tried.
    Pending {
        recovered: bool,
    },
    /// Acknowledging the trade protection notice before the one retry.
    Recovering,
    /// The confirmation was accepted.
    Confirmed,
    /// The confirmation failed for good.
    Failed(Error),
}

/// Accepts the mobile confirmation for an offer.
///
/// A [`ConfirmationError::CouldNotAct`] failure acknowledges trade protection and retries the
/// accept once. Every other failure, and a second `CouldNotAct`, is returned.
pub async fn confirm_offer<K>(
    confirmations: &K,
    identity_secret: &str,
    tradeofferid: TradeOfferId,
) -> Result<()>
where
    K: Confirmations,
{
    let mut state = ConfirmationState::Pending {
        recovered: false,
    };

    loop {
        state = match state {
            ConfirmationState::Pending { recovered } => {
                match confirmations.accept_confirmation_for_object(identity_secret, tradeofferid).await {
                    Ok(()) => ConfirmationState::Confirmed,
                    Err(Error::Confirmation(ConfirmationError::CouldNotAct)) if !recovered => {
                        log::warn!("Could not act on confirmation for offer {tradeofferid}, acknowledging trade protection");
                        ConfirmationState::Recovering
                    },
                    Err(error) => ConfirmationState::Failed(error),
                }
            },
            ConfirmationState::Recovering => {
                match confirmations.acknowledge_trade_protection().await {
                    Ok(()) => ConfirmationState::Pending {
                        recovered: true,
                    },
                    Err(error) => ConfirmationState::Failed(error),
                }
            },
            ConfirmationState::Confirmed => return Ok(()),
            ConfirmationState::Failed(error) => return Err(error),
        };
    }
}
