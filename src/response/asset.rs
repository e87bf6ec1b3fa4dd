use crate::types::{AppId, ContextId, AssetId, Amount, ClassId, InstanceId};
use serde::{Serialize, Deserialize};

/// An item in an inventory.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Asset {
    /// The app ID e.g. `730` for Counter-Strike.
    pub appid: AppId,
    /// The context ID.
    pub contextid: ContextId,
    /// The unique asset ID. This value is unique to the item's `appid` and `contextid`.
    pub assetid: AssetId,
    /// The amount. If this item is not stackable the amount will be `1`.
    pub amount: Amount,
    /// The ID of the classinfo describing this item.
    pub classid: ClassId,
    /// The instance ID of the classinfo.
    pub instanceid: InstanceId,
    /// Whether the item can be traded right now.
    pub tradable: bool,
    /// The market hash name of the item, if it has a description.
    pub market_hash_name: Option<String>,
}
