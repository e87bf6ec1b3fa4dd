//! Sends the items from a set of inventories as trade offers.

mod batch;
mod completion;
mod confirmation;

pub use batch::{aggregate, BatchReport};
pub use completion::CompletionCounter;
pub use confirmation::{confirm_offer, ConfirmationState};

use crate::client::{Confirmations, PlatformClient, TradeManager};
use crate::credentials::Credentials;
use crate::error::Error;
use crate::inventory::{non_empty_batches, Batch, BatchKind, InventorySource};
use crate::request::NewTradeOffer;
use crate::types::TradeOfferId;
use futures::future::try_join_all;

/// What to send and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeConfig {
    /// The trade offer URL of the recipient.
    pub trade_offer_url: String,
    /// The identity secret used to confirm offers.
    pub identity_secret: String,
    /// The inventories to send items from.
    pub sources: Vec<InventorySource>,
}

/// How a batch was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchResolution {
    /// No items were found so nothing was sent.
    Skipped,
    /// The offer was sent and needed no confirmation.
    Sent(TradeOfferId),
    /// The offer was sent and confirmed.
    Confirmed(TradeOfferId),
}

/// A batch which has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBatch {
    pub kind: BatchKind,
    pub report: BatchReport,
    pub resolution: BatchResolution,
    /// Set on the batch which resolved last and finalized the run.
    pub finalized: bool,
}

/// The result of a run where no batch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeOutcome {
    pub batches: Vec<ResolvedBatch>,
    /// How many batches reported themselves resolved.
    pub resolved: usize,
}

impl TradeOutcome {
    /// Whether every batch was resolved and exactly one of them finalized the run.
    pub fn all_resolved(&self) -> bool {
        let finalized = self.batches
            .iter()
            .filter(|batch| batch.finalized)
            .count();

        self.resolved == self.batches.len() && finalized == 1
    }
}

/// A failure which ends the run.
#[derive(thiserror::Error, Debug)]
pub enum TradeError {
    #[error("Error logging on: {}", .0)]
    Login(Error),
    #[error("Error setting up web session: {}", .0)]
    WebSession(Error),
    #[error("No valid inventories to read")]
    NoInventories,
    #[error("[{batch}] Invalid trade offer URL: {error}")]
    TradeLink {
        batch: BatchKind,
        error: Error,
    },
    #[error("[{batch}] Error sending offer: {error}")]
    Send {
        batch: BatchKind,
        error: Error,
    },
    #[error("[{batch}] Error confirming offer {tradeofferid}: {error}")]
    Confirmation {
        batch: BatchKind,
        tradeofferid: TradeOfferId,
        error: Error,
    },
}

/// Logs on, reads inventories and sends one offer per batch.
#[derive(Debug)]
pub struct TradeSender<C, M, K> {
    client: C,
    manager: M,
    confirmations: K,
    config: TradeConfig,
}

impl<C, M, K> TradeSender<C, M, K>
where
    C: PlatformClient,
    M: TradeManager,
    K: Confirmations,
{
    pub fn new(
        client: C,
        manager: M,
        confirmations: K,
        config: TradeConfig,
    ) -> Self {
        Self {
            client,
            manager,
            confirmations,
            config,
        }
    }

    /// Runs every stage. The first fatal error drops any batch still in flight.
    pub async fn run(&self, credentials: &Credentials) -> Result<TradeOutcome, TradeError> {
        self.client.log_on(credentials).await
            .map_err(TradeError::Login)?;
        log::info!("Logged on as {}", credentials.account_name);

        let cookies = self.client.web_session().await
            .map_err(TradeError::WebSession)?;

        self.manager.set_cookies(&cookies).await
            .map_err(TradeError::WebSession)?;
        self.confirmations.set_cookies(&cookies)
            .map_err(TradeError::WebSession)?;
        log::info!("Web session established");

        let batches = non_empty_batches(&self.config.sources);

        if batches.is_empty() {
            return Err(TradeError::NoInventories);
        }

        let counter = CompletionCounter::new(batches.len());
        let batches = try_join_all(batches
            .into_iter()
            .map(|batch| self.resolve_batch(batch, &counter))
        ).await?;

        Ok(TradeOutcome {
            batches,
            resolved: counter.completed(),
        })
    }

    async fn resolve_batch(
        &self,
        batch: Batch,
        counter: &CompletionCounter,
    ) -> Result<ResolvedBatch, TradeError> {
        let report = aggregate(&self.manager, &batch).await;

        log::info!(
            "[{}] {} items from {}/{} inventories",
            batch.kind,
            report.items.len(),
            report.succeeded,
            report.processed,
        );

        let resolution = if report.items.is_empty() {
            log::info!("[{}] No items to send", batch.kind);
            BatchResolution::Skipped
        } else {
            self.send_batch(batch.kind, &report).await?
        };

        let finalized = counter.complete();

        if finalized {
            log::info!("All {} batches resolved", counter.total());
        }

        Ok(ResolvedBatch {
            kind: batch.kind,
            report,
            resolution,
            finalized,
        })
    }

    async fn send_batch(
        &self,
        kind: BatchKind,
        report: &BatchReport,
    ) -> Result<BatchResolution, TradeError> {
        let mut offer = NewTradeOffer::from_trade_offer_url(&self.config.trade_offer_url)
            .map_err(|error| TradeError::TradeLink {
                batch: kind,
                error,
            })?;

        for item in &report.items {
            offer.add_my_item(item);
        }

        let sent = self.manager.send_offer(&offer).await
            .map_err(|error| TradeError::Send {
                batch: kind,
                error,
            })?;
        let tradeofferid = sent.tradeofferid;

        log::info!("[{kind}] Sent offer {tradeofferid} with {} items", offer.items_to_give.len());

        if !sent.needs_mobile_confirmation {
            return Ok(BatchResolution::Sent(tradeofferid));
        }

        confirm_offer(&self.confirmations, &self.config.identity_secret, tradeofferid).await
            .map_err(|error| TradeError::Confirmation {
                batch: kind,
                tradeofferid,
                error,
            })?;
        log::info!("[{kind}] Confirmed offer {tradeofferid}");

        Ok(BatchResolution::Confirmed(tradeofferid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::parse_inventory_sources;
    use crate::testing::{
        asset,
        credentials,
        AcceptResult,
        ClientCall,
        MockClient,
        MockConfirmations,
        MockTradeManager,
        COOKIES,
    };

    const TRADE_URL: &str = "https://steamcommunity.com/tradeoffer/new/?partner=120145903&token=mGDJ6dTd";

    fn config(inventories: &str) -> TradeConfig {
        TradeConfig {
            trade_offer_url: TRADE_URL.into(),
            identity_secret: "identity".into(),
            sources: parse_inventory_sources(inventories),
        }
    }

    fn sender(
        client: MockClient,
        manager: MockTradeManager,
        confirmations: MockConfirmations,
        inventories: &str,
    ) -> TradeSender<MockClient, MockTradeManager, MockConfirmations> {
        TradeSender::new(client, manager, confirmations, config(inventories))
    }

    #[tokio::test]
    async fn sends_one_offer_per_batch() {
        let csgo = InventorySource::CSGO;
        let dota = InventorySource::new(570, 2);
        let manager = MockTradeManager::default()
            .with_inventory(csgo, Some(vec![asset(csgo, 1, true), asset(csgo, 2, false)]))
            .with_inventory(dota, Some(vec![asset(dota, 3, true)]));
        let sender = sender(MockClient::default(), manager, MockConfirmations::default(), "730/2,570/2");
        let outcome = sender.run(&credentials()).await.unwrap();
        let sent = sender.manager.sent();

        assert_eq!(outcome.batches.len(), 2);
        assert_eq!(outcome.batches[0].kind, BatchKind::CsGo);
        assert_eq!(outcome.batches[1].kind, BatchKind::Other);
        assert_eq!(sent.len(), 2);
        assert_eq!(sent.iter().map(|offer| offer.items_to_give.len()).sum::<usize>(), 3);
        assert!(sent.iter().all(|offer| offer.token.as_deref() == Some("mGDJ6dTd")));
        assert!(outcome.batches.iter().all(|batch| matches!(batch.resolution, BatchResolution::Sent(_))));
    }

    #[tokio::test]
    async fn passes_cookies_to_both_collaborators() {
        let sender = sender(MockClient::default(), MockTradeManager::default(), MockConfirmations::default(), "730/2");

        sender.run(&credentials()).await.unwrap();

        assert_eq!(*sender.manager.cookies.lock().unwrap(), COOKIES.to_vec());
        assert!(*sender.confirmations.has_cookies.lock().unwrap());
        assert_eq!(sender.client.calls(), vec![ClientCall::LogOn, ClientCall::WebSession]);
    }

    #[tokio::test]
    async fn empty_batch_is_skipped_but_resolved() {
        let dota = InventorySource::new(570, 2);
        let manager = MockTradeManager::default()
            .with_inventory(dota, Some(vec![asset(dota, 3, true)]));
        let sender = sender(MockClient::default(), manager, MockConfirmations::default(), "730/2,570/2");
        let outcome = sender.run(&credentials()).await.unwrap();

        assert_eq!(outcome.batches[0].resolution, BatchResolution::Skipped);
        assert!(matches!(outcome.batches[1].resolution, BatchResolution::Sent(_)));
        assert_eq!(sender.manager.sent().len(), 1);
        assert_eq!(outcome.resolved, 2);
        assert_eq!(outcome.batches.iter().filter(|batch| batch.finalized).count(), 1);
        assert!(outcome.all_resolved());
    }

    #[tokio::test]
    async fn all_sources_failing_never_sends() {
        let csgo = InventorySource::CSGO;
        let manager = MockTradeManager::default()
            .with_inventory(csgo, None);
        let sender = sender(MockClient::default(), manager, MockConfirmations::default(), "730/2");
        let outcome = sender.run(&credentials()).await.unwrap();

        assert_eq!(outcome.batches.len(), 1);
        assert_eq!(outcome.batches[0].resolution, BatchResolution::Skipped);
        assert!(outcome.batches[0].finalized);
        assert_eq!(outcome.batches[0].report.processed, 1);
        assert_eq!(outcome.batches[0].report.succeeded, 0);
        assert!(sender.manager.sent().is_empty());
    }

    #[tokio::test]
    async fn no_inventories_creates_no_offer() {
        let sender = sender(MockClient::default(), MockTradeManager::default(), MockConfirmations::default(), "");
        let result = sender.run(&credentials()).await;

        assert!(matches!(result, Err(TradeError::NoInventories)));
        assert!(sender.manager.fetched.lock().unwrap().is_empty());
        assert!(sender.manager.sent().is_empty());
    }

    #[tokio::test]
    async fn confirms_offers_needing_confirmation() {
        let csgo = InventorySource::CSGO;
        let manager = MockTradeManager {
            needs_confirmation: true,
            ..Default::default()
        }
            .with_inventory(csgo, Some(vec![asset(csgo, 1, true)]));
        let confirmations = MockConfirmations::with_results([AcceptResult::CouldNotAct, AcceptResult::Ok]);
        let sender = sender(MockClient::default(), manager, confirmations, "730/2");
        let outcome = sender.run(&credentials()).await.unwrap();

        assert!(matches!(outcome.batches[0].resolution, BatchResolution::Confirmed(_)));
        assert_eq!(sender.confirmations.acknowledged(), 1);
        assert_eq!(sender.confirmations.accept_calls(), 2);
    }

    #[tokio::test]
    async fn repeated_confirmation_failure_is_fatal() {
        let csgo = InventorySource::CSGO;
        let manager = MockTradeManager {
            needs_confirmation: true,
            ..Default::default()
        }
            .with_inventory(csgo, Some(vec![asset(csgo, 1, true)]));
        let confirmations = MockConfirmations::with_results([AcceptResult::CouldNotAct, AcceptResult::CouldNotAct]);
        let sender = sender(MockClient::default(), manager, confirmations, "730/2");
        let result = sender.run(&credentials()).await;

        assert!(matches!(result, Err(TradeError::Confirmation { batch: BatchKind::CsGo, .. })));
        assert_eq!(sender.confirmations.acknowledged(), 1);
    }

    #[tokio::test]
    async fn send_failure_is_fatal() {
        let csgo = InventorySource::CSGO;
        let manager = MockTradeManager {
            fail_send: true,
            ..Default::default()
        }
            .with_inventory(csgo, Some(vec![asset(csgo, 1, true)]));
        let sender = sender(MockClient::default(), manager, MockConfirmations::default(), "730/2");
        let result = sender.run(&credentials()).await;

        assert!(matches!(result, Err(TradeError::Send { batch: BatchKind::CsGo, .. })));
    }

    #[tokio::test]
    async fn login_failure_stops_before_web_session() {
        let client = MockClient {
            fail_log_on: true,
            ..Default::default()
        };
        let sender = sender(client, MockTradeManager::default(), MockConfirmations::default(), "730/2");
        let result = sender.run(&credentials()).await;

        assert!(matches!(result, Err(TradeError::Login(_))));
        assert_eq!(sender.client.calls(), vec![ClientCall::LogOn]);
    }

    #[tokio::test]
    async fn web_session_failure_is_fatal() {
        let client = MockClient {
            fail_web_session: true,
            ..Default::default()
        };
        let sender = sender(client, MockTradeManager::default(), MockConfirmations::default(), "730/2");
        let result = sender.run(&credentials()).await;

        assert!(matches!(result, Err(TradeError::WebSession(_))));
        assert!(sender.manager.fetched.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_trade_link_is_fatal() {
        let csgo = InventorySource::CSGO;
        let manager = MockTradeManager::default()
            .with_inventory(csgo, Some(vec![asset(csgo, 1, true)]));
        let mut config = config("730/2");

        config.trade_offer_url = "https://steamcommunity.com/tradeoffer/new/".into();

        let sender = TradeSender::new(MockClient::default(), manager, MockConfirmations::default(), config);
        let result = sender.run(&credentials()).await;

        assert!(matches!(result, Err(TradeError::TradeLink { .. })));
        assert!(sender.manager.sent().is_empty());
    }
}
