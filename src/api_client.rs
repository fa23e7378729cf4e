//! Blocking HTTP client for a dashboard backend.
//!
//! Thin wrapper over `reqwest::blocking`: every call is one request,
//! errors carry the response body, and the record types double as the
//! wire format.

use std::fmt;

use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::data::provider::RecordProvider;
use crate::data::records::{
    AccountRecord, EquipmentSummary, ProfileUpdate, RentalRecord, RentalStatus, Review,
    UserProfile,
};

#[derive(Debug, Serialize)]
struct StatusChangeRequest {
    status: RentalStatus,
}

#[derive(Debug, Serialize)]
struct PasswordChangeRequest {
    current_password: String,
    new_password: String,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<set>"))
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client: Client::new(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check(response: Response, url: &str) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().unwrap_or_default();
        bail!("API error from {}: {} {}", url, status, body);
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .with_context(|| format!("request to {} failed", url))?;
        Self::check(response, &url)?
            .json()
            .with_context(|| format!("failed to decode response from {}", url))
    }

    /// POST / PUT with a JSON body, discarding any response body
    fn send_json<B: Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let url = self.url(path);
        let mut request = self.client.request(method, &url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .with_context(|| format!("request to {} failed", url))?;
        Self::check(response, &url)
    }
}

impl RecordProvider for ApiClient {
    fn fetch_rentals(&self) -> Result<Vec<RentalRecord>> {
        self.get_json("/api/rentals")
    }

    fn fetch_accounts(&self) -> Result<Vec<AccountRecord>> {
        self.get_json("/api/accounts")
    }

    fn fetch_reviews(&self) -> Result<Vec<Review>> {
        self.get_json("/api/reviews")
    }

    fn fetch_equipment(&self) -> Result<Vec<EquipmentSummary>> {
        self.get_json("/api/equipment")
    }

    fn fetch_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.get_json(&format!("/api/profiles/{}", user_id))
    }

    fn set_rental_status(&self, rental_id: &str, status: RentalStatus) -> Result<()> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/api/rentals/{}/status", rental_id),
            &StatusChangeRequest { status },
        )?;
        Ok(())
    }

    fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let response = self.send_json(
            reqwest::Method::PUT,
            &format!("/api/profiles/{}", update.user_id),
            update,
        )?;
        response.json().context("failed to decode updated profile")
    }

    fn change_password(&self, current: &str, new: &str) -> Result<()> {
        self.send_json(
            reqwest::Method::POST,
            "/api/auth/password",
            &PasswordChangeRequest {
                current_password: current.to_string(),
                new_password: new.to_string(),
            },
        )?;
        Ok(())
    }
}
