use serde::{Deserialize, Deserializer, Serialize};

/// Catalog entry describing one model offering.
///
/// Optional fields are skipped when empty (or zero for `token_limit`), the
/// remaining keys are always written. Sampling parameters stay strings so
/// the upstream text survives untouched. An explicit `null` decodes the
/// same way as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub temperature: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub top_p: String,
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub token_limit: i64,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub parameters: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub architecture: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub hf_repo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub about_content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub info_content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail_id: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub deploy_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub available: bool,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope shared by every JSON body the service writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(rename = "Code")]
    pub code: u16,
    #[serde(rename = "Data")]
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorData {
    #[serde(rename = "Message")]
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn new(code: u16, data: T) -> ApiResponse<T> {
        ApiResponse { code, data }
    }
}

impl ApiResponse<ErrorData> {
    pub fn failure(code: u16, message: &str) -> ApiResponse<ErrorData> {
        ApiResponse::new(
            code,
            ErrorData {
                message: message.to_string(),
            },
        )
    }
}
