use crate::client::TradeManager;
use crate::inventory::Batch;
use crate::response::Asset;
use futures::future::join_all;

/// What reading every inventory in a batch produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Every item read, tradable or not.
    pub items: Vec<Asset>,
    /// Inventories which reported, successfully or not.
    pub processed: usize,
    /// Inventories read successfully.
    pub succeeded: usize,
    /// Items read which are not tradable right now.
    pub untradable: usize,
}

/// Reads every inventory in the batch at once and waits for all of them. Failed reads are
/// logged and contribute no items.
pub async fn aggregate<M>(manager: &M, batch: &Batch) -> BatchReport
where
    M: TradeManager,
{
    let fetches = batch.sources
        .iter()
        .map(|source| async move {
            let result = manager.get_inventory_contents(source.appid, source.contextid, true).await;

            (*source, result)
        });
    let mut report = BatchReport::default();

    for (source, result) in join_all(fetches).await {
        report.processed += 1;

        match result {
            Ok(inventory) => {
                let untradable = inventory.iter().filter(|asset| !asset.tradable).count();

                log::info!(
                    "[{}] {} items in {source} ({untradable} not tradable)",
                    batch.kind,
                    inventory.len(),
                );
                report.succeeded += 1;
                report.untradable += untradable;
                report.items.extend(inventory);
            },
            Err(error) => {
                log::warn!("[{}] Error reading inventory {source}: {error}", batch.kind);
            },
        }
    }

    report
}
