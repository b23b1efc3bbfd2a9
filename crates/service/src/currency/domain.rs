use serde::{Deserialize, Deserializer, Serialize};

/// Reads an explicit `null` as the type's default.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Exchange-rate snapshot as published by the currency feed.
///
/// Field names and order follow the feed's JSON. Missing text fields come
/// back as `null`, missing or `null` numbers as `0`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeResponse {
    pub head: Option<ExchangeResponseHead>,
    pub data: Option<ExchangeResponseData>,
    pub records: Option<Vec<ExchangeResponseRecord>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeResponseHead {
    pub version: Option<String>,
    pub provider: Option<String>,
    pub req_code: Option<String>,
    pub rep_code: Option<String>,
    pub rep_message: Option<String>,
    #[serde(rename = "ts", deserialize_with = "null_as_default")]
    pub timestamp: i64,
    pub producer: Option<String>,
    #[serde(rename = "tstext")]
    pub timestamp_text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExchangeResponseData {
    #[serde(deserialize_with = "null_as_default")]
    pub total: i64,
    pub start_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub page_total: i64,
    #[serde(rename = "searchlist")]
    pub search_list: Option<Vec<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub page_size: i64,
    pub end_date: Option<String>,
    pub flag_message: Option<String>,
    pub head: Option<Vec<String>>,
    pub currency: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub page_num: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeResponseRecord {
    pub date: Option<String>,
    pub values: Option<Vec<String>>,
}
