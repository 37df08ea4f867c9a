use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub type JsonValue = serde_json::Value;

// ── GraphQL ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphQlRequest {
    pub document: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphQlRequest {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            ..Self::default()
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<JsonValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, JsonValue>,
}

/// A GraphQL response. Field-level errors travel alongside partial data and
/// are not failures of the call.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GraphQlResponse<R = JsonValue> {
    pub data: Option<R>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl<R> GraphQlResponse<R> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl GraphQlResponse<JsonValue> {
    /// Decodes the untyped `data` payload into `R`, keeping the errors.
    pub fn decode<R: DeserializeOwned>(&self) -> Result<GraphQlResponse<R>, ApiError> {
        let data = match &self.data {
            None | Some(JsonValue::Null) => None,
            Some(value) => Some(
                serde_json::from_value(value.clone()).map_err(|err| {
                    log::debug!("graphql data did not match the requested shape: {err}");
                    ApiError::Decode {
                        message: err.to_string(),
                    }
                })?,
            ),
        };
        Ok(GraphQlResponse {
            data,
            errors: self.errors.clone(),
        })
    }
}

// ── REST ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestMethod {
    Get,
    Put,
    Post,
    Delete,
    Head,
    Patch,
}

impl RestMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestOptions {
    pub path: String,
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<Vec<u8>>,
}

impl RestOptions {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the JSON body and sets the content type.
    pub fn with_json<B: Serialize>(self, value: &B) -> Result<Self, ApiError> {
        let body = serde_json::to_vec(value).map_err(|err| ApiError::Decode {
            message: err.to_string(),
        })?;
        let options = self.with_header("content-type", "application/json");
        Ok(options.with_body(body))
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Vec<u8>,
}

impl RestResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<R: DeserializeOwned>(&self) -> Result<R, ApiError> {
        serde_json::from_slice(&self.body).map_err(|err| {
            log::debug!(
                "rest body ({} bytes, status {}) is not the expected json: {err}",
                self.body.len(),
                self.status
            );
            ApiError::Decode {
                message: err.to_string(),
            }
        })
    }
}
