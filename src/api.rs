//! HTTP client for the demo API: conversation lookup, todo listing, and the
//! root ping endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// -- Error taxonomy ---------------------------------------------------------

/// Failures a fetch can surface. The views map these onto placeholder
/// states; nothing here is ever fatal to the process.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx status from the API, treated as a domain-level "not found".
    #[error("not found")]
    NotFound,
    /// Network failure or a response body that did not decode.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

// -- Wire types -------------------------------------------------------------

/// A chat message as the API and the feed deliver it. Every field is
/// optional: live events come off a shared multi-purpose feed and the view
/// decides what it can do with whatever arrived. Id fields decode through
/// [`coerce_id`], since the feed carries them as numbers or numeric
/// strings and both must behave the same.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub conversation_id: Option<i64>,
}

/// Numeric coercion for ids: accepts a JSON number or a numeric string,
/// anything else is `None`.
pub fn coerce_id(value: &serde_json::Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_id))
}

/// Conversation lookup response. `messages` arrives newest-first; the
/// chat view reverses it for display. Extra DTO fields (participant ids,
/// creation time) are ignored on decode.
#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    pub id: i64,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub due_date: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

// -- ApiClient --------------------------------------------------------------

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Look up the single conversation between two users. The API
    /// guarantees at most one per pair; a missing pair comes back non-2xx
    /// and is mapped to [`ApiError::NotFound`].
    pub async fn conversation_by_users(
        &self,
        user_a: i64,
        user_b: i64,
    ) -> Result<Conversation, ApiError> {
        let url = format!(
            "{}/conversations/by_users?user_a={}&user_b={}",
            self.base_url, user_a, user_b
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::NotFound);
        }

        Ok(response.json::<Conversation>().await?)
    }

    pub async fn todos(&self) -> Result<Vec<Todo>, ApiError> {
        let url = format!("{}/todos", self.base_url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::NotFound);
        }

        Ok(response.json::<Vec<Todo>>().await?)
    }

    /// `GET /` demo ping. Returns the status alongside whatever JSON the
    /// API felt like sending; non-2xx is not an error here since the whole
    /// point is to display the status line.
    pub async fn ping(&self) -> Result<(reqwest::StatusCode, serde_json::Value), ApiError> {
        let url = format!("{}/", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.json::<serde_json::Value>().await?;

        Ok((status, body))
    }
}
