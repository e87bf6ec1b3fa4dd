mod item;

pub use item::NewTradeOfferItem;

use crate::error::Error;
use steamid_ng::SteamID;

/// Offset between a 64-bit individual [`SteamID`] and its 32-bit account ID.
const INDIVIDUAL_STEAMID_BASE: u64 = 76561197960265728;

/// Represents a trade offer not yet sent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTradeOffer {
    /// The partner receiving this offer.
    pub partner: SteamID,
    /// The items to give in this offer.
    pub items_to_give: Vec<NewTradeOfferItem>,
    /// The message to send in this offer.
    pub message: Option<String>,
    /// The access token for sending an offer if you are not friends with the partner.
    pub token: Option<String>,
}

impl NewTradeOffer {
    /// Creates an empty offer for `partner`.
    pub fn new(partner: SteamID) -> Self {
        Self {
            partner,
            items_to_give: Vec::new(),
            message: None,
            token: None,
        }
    }

    /// Creates an empty offer from a trade offer URL such as
    /// `https://steamcommunity.com/tradeoffer/new/?partner=120145903&token=mGDJ6dTd`.
    pub fn from_trade_offer_url(trade_offer_url: &str) -> Result<Self, Error> {
        let url = url::Url::parse(trade_offer_url)
            .map_err(|error| Error::TradeLink(format!("{trade_offer_url}: {error}")))?;

        if url.host_str() != Some("steamcommunity.com") {
            return Err(Error::TradeLink(format!("{trade_offer_url}: not a steamcommunity.com URL")));
        }

        let mut partner = None;
        let mut token = None;

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "partner" => partner = value.parse::<u32>().ok(),
                "token" => token = Some(value.into_owned()),
                _ => {},
            }
        }

        let account_id = partner
            .ok_or_else(|| Error::TradeLink(format!("{trade_offer_url}: missing partner")))?;
        let mut offer = Self::new(SteamID::from(INDIVIDUAL_STEAMID_BASE + u64::from(account_id)));

        offer.token = token;

        Ok(offer)
    }

    /// Adds an item from our inventory.
    pub fn add_my_item<T>(&mut self, item: T)
    where
        T: Into<NewTradeOfferItem>,
    {
        self.items_to_give.push(item.into());
    }

    /// Checks if any items are included in the offer.
    pub fn is_empty(&self) -> bool {
        self.items_to_give.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trade_offer_url() {
        let offer = NewTradeOffer::from_trade_offer_url(
            "https://steamcommunity.com/tradeoffer/new/?partner=120145903&token=mGDJ6dTd",
        ).unwrap();

        assert_eq!(u64::from(offer.partner), 76561198080411631);
        assert_eq!(offer.token.as_deref(), Some("mGDJ6dTd"));
        assert!(offer.is_empty());
    }

    #[test]
    fn rejects_url_without_partner() {
        let result = NewTradeOffer::from_trade_offer_url(
            "https://steamcommunity.com/tradeoffer/new/?token=mGDJ6dTd",
        );

        assert!(matches!(result, Err(Error::TradeLink(_))));
    }

    #[test]
    fn rejects_other_hosts() {
        let result = NewTradeOffer::from_trade_offer_url(
            "https://example.com/tradeoffer/new/?partner=120145903",
        );

        assert!(matches!(result, Err(Error::TradeLink(_))));
    }

    #[test]
    fn adds_my_items() {
        let mut offer = NewTradeOffer::new(SteamID::from(76561198080411631));

        offer.add_my_item(NewTradeOfferItem {
            appid: 730,
            contextid: 2,
            assetid: 1,
            amount: 1,
        });

        assert_eq!(offer.items_to_give.len(), 1);
        assert!(!offer.is_empty());
    }
}
