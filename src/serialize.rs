//! Serde helpers for the shapes Steam encodes values in.

use std::fmt::Display;
use std::str::FromStr;
use serde::{Serializer, Deserialize};
use serde::de::{self, Deserializer, Unexpected};
use steamid_ng::SteamID;

/// A value Steam sends either as a JSON number or as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

impl NumberOrString {
    fn parse<T, E>(self) -> Result<T, E>
    where
        T: FromStr,
        T::Err: Display,
        E: de::Error,
    {
        match self {
            Self::Number(n) => n.to_string().parse::<T>().map_err(E::custom),
            Self::String(s) => s.trim().parse::<T>().map_err(E::custom),
        }
    }
}

/// A flag Steam sends as `0`/`1` or as a JSON bool.
#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(u64),
}

/// Deserializes a `0`/`1` flag into a bool. JSON bools are accepted as well.
pub fn from_int_to_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Flag::deserialize(deserializer)? {
        Flag::Bool(flag) => Ok(flag),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(other) => Err(de::Error::invalid_value(
            Unexpected::Unsigned(other),
            &"zero or one",
        )),
    }
}

/// Deserializes an optional number e.g. `"last_assetid": "1234"`.
pub fn option_str_to_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(NumberOrString::parse::<T, D::Error>)
        .transpose()
}

/// Deserializes an optional number where `"0"` means there is none. Used for instance IDs.
pub fn zero_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(0)) => Ok(None),
        Some(NumberOrString::String(s)) if s == "0" => Ok(None),
        Some(value) => value.parse::<T, D::Error>().map(Some),
        None => Ok(None),
    }
}

pub fn steamid_as_string<S>(steamid: &SteamID, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.collect_str(&u64::from(*steamid))
}

/// Numbers written as strings, as Steam does for 64-bit IDs. Reading also accepts plain numbers.
pub mod string {
    use super::NumberOrString;
    use std::fmt::Display;
    use std::str::FromStr;
    use serde::{Serializer, Deserialize, Deserializer};

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        NumberOrString::deserialize(deserializer)?.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Flags {
        #[serde(deserialize_with = "from_int_to_bool")]
        tradable: bool,
        #[serde(default, deserialize_with = "option_str_to_number")]
        last_assetid: Option<u64>,
        #[serde(default, deserialize_with = "zero_as_none")]
        instanceid: Option<u64>,
    }

    #[derive(Deserialize)]
    struct Ids {
        #[serde(with = "string")]
        classid: u64,
    }

    #[test]
    fn deserializes_inventory_flags() {
        let flags: Flags = serde_json::from_str(r#"{"tradable":1,"last_assetid":"30012","instanceid":"0"}"#).unwrap();

        assert!(flags.tradable);
        assert_eq!(flags.last_assetid, Some(30012));
        assert_eq!(flags.instanceid, None);
    }

    #[test]
    fn accepts_bools_and_numbers() {
        let flags: Flags = serde_json::from_str(r#"{"tradable":false,"last_assetid":30012,"instanceid":188530139}"#).unwrap();

        assert!(!flags.tradable);
        assert_eq!(flags.last_assetid, Some(30012));
        assert_eq!(flags.instanceid, Some(188530139));
    }

    #[test]
    fn rejects_out_of_range_flag() {
        let result = serde_json::from_str::<Flags>(r#"{"tradable":2}"#);

        assert!(result.is_err());
    }

    #[test]
    fn reads_ids_from_strings_or_numbers() {
        let quoted: Ids = serde_json::from_str(r#"{"classid":"310777185"}"#).unwrap();
        let bare: Ids = serde_json::from_str(r#"{"classid":310777185}"#).unwrap();

        assert_eq!(quoted.classid, bare.classid);
        assert!(serde_json::from_str::<Ids>(r#"{"classid":"abc"}"#).is_err());
    }
}
