//! Inventory sources and how they are grouped into trade batches.

use crate::types::{AppId, ContextId};
use std::fmt;
use std::str::FromStr;

/// The inventory sources used when none are given.
pub const DEFAULT_INVENTORIES: &str = "730/2";

/// One inventory to read, identified by app ID and context ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InventorySource {
    /// The app ID.
    pub appid: AppId,
    /// The context ID.
    pub contextid: ContextId,
}

impl InventorySource {
    /// The Counter-Strike inventory. Items from it are always sent in their own offer.
    pub const CSGO: Self = Self {
        appid: 730,
        contextid: 2,
    };

    pub fn new(appid: AppId, contextid: ContextId) -> Self {
        Self {
            appid,
            contextid,
        }
    }
}

impl fmt::Display for InventorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.appid, self.contextid)
    }
}

/// An error parsing an [`InventorySource`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Invalid inventory \"{}\": expected appid/contextid", .0)]
pub struct ParseInventorySourceError(String);

impl FromStr for InventorySource {
    type Err = ParseInventorySourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseInventorySourceError(s.to_string());
        let (appid, contextid) = s.trim().split_once('/').ok_or_else(error)?;

        Ok(Self {
            appid: appid.trim().parse().map_err(|_| error())?,
            contextid: contextid.trim().parse().map_err(|_| error())?,
        })
    }
}

/// Parses a comma-separated list of inventory sources e.g. `"730/2,570/2"`. Blank entries are
/// skipped. Malformed entries are logged and skipped.
pub fn parse_inventory_sources(s: &str) -> Vec<InventorySource> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| match part.parse::<InventorySource>() {
            Ok(source) => Some(source),
            Err(error) => {
                log::warn!("Skipping inventory: {error}");
                None
            },
        })
        .collect()
}

/// Which offer an inventory source belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchKind {
    /// Counter-Strike items.
    CsGo,
    /// Items from every other inventory.
    Other,
}

impl BatchKind {
    /// The batch a source is placed into.
    pub fn of(source: &InventorySource) -> Self {
        if *source == InventorySource::CSGO {
            Self::CsGo
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CsGo => write!(f, "CS:GO"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A named group of inventory sources sent together as one trade offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub kind: BatchKind,
    pub sources: Vec<InventorySource>,
}

impl Batch {
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Splits sources into the [`BatchKind::CsGo`] batch and the [`BatchKind::Other`] batch, in
/// that order. Every source lands in exactly one batch and input order is kept.
pub fn partition(sources: &[InventorySource]) -> [Batch; 2] {
    let (csgo, other) = sources
        .iter()
        .copied()
        .partition::<Vec<_>, _>(|source| BatchKind::of(source) == BatchKind::CsGo);

    [
        Batch {
            kind: BatchKind::CsGo,
            sources: csgo,
        },
        Batch {
            kind: BatchKind::Other,
            sources: other,
        },
    ]
}

/// Partitions sources and keeps only the batches which have sources.
pub fn non_empty_batches(sources: &[InventorySource]) -> Vec<Batch> {
    partition(sources)
        .into_iter()
        .filter(|batch| !batch.is_empty())
        .collect()
}
