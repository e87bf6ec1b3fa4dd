use crate::serialize::{string, zero_as_none, from_int_to_bool, option_str_to_number};
use crate::types::{AppId, ContextId, AssetId, Amount, ClassId, InstanceId};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct GetInventoryResponse {
    #[serde(default)]
    #[serde(deserialize_with = "from_int_to_bool")]
    pub success: bool,
    #[serde(default)]
    #[serde(deserialize_with = "from_int_to_bool")]
    pub more_items: bool,
    #[serde(default)]
    pub assets: Vec<RawAsset>,
    #[serde(default)]
    pub descriptions: Vec<RawDescription>,
    #[serde(default)]
    #[serde(deserialize_with = "option_str_to_number")]
    pub last_assetid: Option<AssetId>,
    #[serde(default)]
    pub total_inventory_count: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawAsset {
    pub appid: AppId,
    #[serde(with = "string")]
    pub contextid: ContextId,
    #[serde(with = "string")]
    pub assetid: AssetId,
    #[serde(with = "string")]
    pub classid: ClassId,
    #[serde(default, deserialize_with = "zero_as_none")]
    pub instanceid: InstanceId,
    #[serde(with = "string")]
    pub amount: Amount,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawDescription {
    #[serde(with = "string")]
    pub classid: ClassId,
    #[serde(default, deserialize_with = "zero_as_none")]
    pub instanceid: InstanceId,
    #[serde(default)]
    #[serde(deserialize_with = "from_int_to_bool")]
    pub tradable: bool,
    #[serde(default)]
    pub market_hash_name: Option<String>,
}
