use std::{fmt, time::Instant};

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Url};
use serde_json::Value;

use crate::constants::{DEFAULT_ORIGIN, DISHES_PATH};
use crate::data_types::dish_data_types::Dish;
use crate::errors::{ConfigError, SubmissionError};

/// Anything that can persist a dish. One call is one attempt.
#[async_trait]
pub trait DishSubmitter: Send + Sync {
    async fn submit(&self, dish: Dish) -> Result<Value, SubmissionError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL, empty to post relative to `origin`
    pub base_url: String,
    pub origin: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: String::new(),
            origin: DEFAULT_ORIGIN.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            let origin = Url::parse(&self.origin).map_err(|e| invalid(&self.origin, e))?;
            origin.join(DISHES_PATH).map_err(|e| invalid(&self.origin, e))
        } else {
            let url = format!("{}{}", base.trim_end_matches('/'), DISHES_PATH);
            Url::parse(&url).map_err(|e| invalid(&url, e))
        }
    }
}

fn invalid(url: &str, e: impl fmt::Display) -> ConfigError {
    ConfigError::InvalidEndpoint {
        url: url.to_string(),
        reason: e.to_string(),
    }
}

pub struct DishClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl DishClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(DishClient {
            client: reqwest::Client::new(),
            endpoint: config.endpoint()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl DishSubmitter for DishClient {
    async fn submit(&self, dish: Dish) -> Result<Value, SubmissionError> {
        let body = serde_json::to_vec(&dish)?;

        let now = Instant::now();
        let resp = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        log::debug!(
            "POST {} ({} '{}'): {} in {:.2?}",
            self.endpoint,
            dish.dish_type(),
            dish.name(),
            resp.status(),
            now.elapsed()
        );

        let status = resp.status();
        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) if status.is_success() => {
                log::warn!("Dish added, but its response body could not be read: {}", e);
                return Ok(Value::Null);
            }
            Err(e) => {
                return Err(SubmissionError::Unexpected(format!(
                    "Error: while adding dish (HTTP {}), response unreadable: {}",
                    status.as_u16(),
                    e
                )))
            }
        };

        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message: server_message(&text),
            });
        }

        // success bodies are opaque; non-JSON ones are passed on as text
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        match serde_json::from_str(&text) {
            Ok(body) => Ok(body),
            Err(e) => {
                log::warn!("Dish added, response is not JSON ({}): {:?}", e, text);
                Ok(Value::String(text))
            }
        }
    }
}

/// Pulls a human readable message out of an error response body: a JSON
/// `message` or `error` string if there is one, else the raw text.
fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(body) {
        return ["message", "error"]
            .iter()
            .find_map(|k| obj.get(*k).and_then(Value::as_str))
            .map(str::to_string);
    }

    Some(body.to_string())
}
