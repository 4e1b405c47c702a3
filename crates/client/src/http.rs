use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use slotbook_core::errors::{BookingError, BookingResult};
use tracing::{debug, error};

use crate::config::ClientConfig;

/// Shared request plumbing for the API clients.
#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub(crate) fn new(config: &ClientConfig) -> BookingResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.request_timeout {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http = builder.build().map_err(|e| transport_error("build client", e))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> BookingResult<T> {
        let mut request = self.request(Method::GET, path);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.send(Method::GET, path, request).await?;
        decode(path, response).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> BookingResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        let response = self.send(Method::POST, path, request).await?;
        decode(path, response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> BookingResult<()> {
        let request = self.request(Method::DELETE, path);
        self.send(Method::DELETE, path, request).await?;
        Ok(())
    }

    async fn send(&self, method: Method, path: &str, request: RequestBuilder) -> BookingResult<Response> {
        debug!("{} {}{}", method, self.base_url, path);

        let response = request.send().await.map_err(|e| {
            error!("{} {} failed: {}", method, path, e);
            transport_error(path, e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = status_error(path, status, &body);
        error!("{} {} returned {}: {}", method, path, status.as_u16(), err);
        Err(err)
    }
}

async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> BookingResult<T> {
    response.json::<T>().await.map_err(|e| {
        error!("Failed to decode response from {}: {}", path, e);
        transport_error(path, e)
    })
}

fn transport_error(context: &str, err: reqwest::Error) -> BookingError {
    BookingError::Transport(eyre::Report::new(err).wrap_err(format!("request to {} failed", context)))
}

/// Maps a non-success response to a domain error.
pub(crate) fn status_error(path: &str, status: StatusCode, body: &str) -> BookingError {
    let message = server_message(body);

    if status == StatusCode::NOT_FOUND {
        return BookingError::NotFound(message.unwrap_or_else(|| path.to_string()));
    }

    BookingError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Tries a JSON `message` field, then a JSON `error` field, then a bare JSON
/// string, then the raw text.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(fields)) => ["message", "error"]
            .iter()
            .filter_map(|key| fields.get(*key))
            .filter_map(|value| value.as_str())
            .find(|text| !text.trim().is_empty())
            .map(str::to_string),
        Ok(serde_json::Value::String(text)) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}
