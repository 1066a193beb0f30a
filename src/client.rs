//! Blocking HTTP client for the record store service.

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::contact::{Contact, ContactPatch, Message, NewContact};

/// What a client call can fail with: the request never completed, or the
/// service answered with a non-success status.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success response; `body` holds the raw response text.
    #[error("server returned {status}: {body}")]
    Api { status: StatusCode, body: String },
}

/// One typed method per service endpoint.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn list(&self) -> Result<Vec<Contact>, ClientError> {
        json_body(self.http.get(self.url("/api/contacts")).send()?)
    }

    pub fn create(&self, contact: &NewContact) -> Result<Contact, ClientError> {
        json_body(
            self.http
                .post(self.url("/api/contacts"))
                .json(contact)
                .send()?,
        )
    }

    pub fn get(&self, id: i32) -> Result<Contact, ClientError> {
        json_body(self.http.get(self.url(&format!("/api/contacts/{id}"))).send()?)
    }

    pub fn update(&self, id: i32, patch: &ContactPatch) -> Result<Message, ClientError> {
        json_body(
            self.http
                .put(self.url(&format!("/api/contacts/{id}")))
                .json(patch)
                .send()?,
        )
    }

    pub fn delete(&self, id: i32) -> Result<Message, ClientError> {
        json_body(
            self.http
                .delete(self.url(&format!("/api/contacts/{id}")))
                .send()?,
        )
    }

    pub fn filter_by_relation(&self, relation: &str) -> Result<Vec<Contact>, ClientError> {
        json_body(
            self.http
                .get(self.url("/api/contacts/filter"))
                .query(&[("relation", relation)])
                .send()?,
        )
    }

    /// The raw export payload, suitable for writing straight to a file.
    pub fn export(&self) -> Result<Vec<u8>, ClientError> {
        let resp = check(self.http.get(self.url("/api/contacts/export")).send()?)?;
        Ok(resp.bytes()?.to_vec())
    }
}

fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(ClientError::Api {
            status,
            body: resp.text().unwrap_or_default(),
        })
    }
}

fn json_body<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    Ok(check(resp)?.json()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.url("/api/contacts"), "http://localhost:8080/api/contacts");
    }
}
