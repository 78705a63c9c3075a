//! API client for the employee management backend.
//!
//! `ApiClient` logs an admin in, keeps the resulting bearer token for the
//! life of the client, and proxies the employee CRUD calls.

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, error, info, warn};

use crate::auth::{Credentials, Session, SessionData};
use crate::models::{DeleteConfirmation, Employee};

use super::{ApiError, ClientError, FetchTarget};

// ============================================================================
// Constants
// ============================================================================

/// Base URL for all backend endpoints
pub const API_BASE_URL: &str = "https://productivity-tracker-backend-sbby.onrender.com/api";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// An employee id must name exactly one path segment below `/employees`.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".."
}

/// API client for the employee management backend.
///
/// Clone is cheap and clones share both the connection pool and the held
/// session, so a login through one clone is visible to all of them.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Arc<Session>,
}

impl ApiClient {
    /// Create a new API client for the production backend
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_BASE_URL)
    }

    /// Create a client against another backend origin (tests, staging)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid base URL {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Base URL {} cannot carry a path", base_url);
        }

        let client = Client::builder()
            .user_agent(concat!("staffdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            session: Arc::new(Session::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.is_authenticated().await
    }

    /// The held token, if a login has succeeded
    pub async fn session_token(&self) -> Option<String> {
        self.session.token().await
    }

    pub async fn session_data(&self) -> Option<SessionData> {
        self.session.data().await
    }

    /// Append path segments to the base URL, percent-encoding each one so
    /// caller-supplied ids can never escape their segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Base URL {} cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn send(request: RequestBuilder, what: &str) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send {} request", what))?;
        Self::check_response(response).await
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder, what: &str) -> Result<T> {
        Self::send(request, what)
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", what))
    }

    /// Log the full cause chain and hand back the caller-facing error
    fn fail(operation: &str, err: anyhow::Error, kind: ClientError) -> ClientError {
        error!(operation, "{}: {:#}", kind, err);
        kind
    }

    // ===== Authentication =====

    /// Log in as an admin. On success the returned token becomes the held
    /// session credential, replacing any previous one.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<String, ClientError> {
        let credentials = Credentials::new(identifier, secret);
        if !credentials.is_complete() {
            warn!("Login attempted with an empty identifier or secret");
            return Err(ClientError::AuthenticationFailed);
        }

        let token = self
            .request_token(&credentials)
            .await
            .map_err(|e| Self::fail("login", e, ClientError::AuthenticationFailed))?;

        self.session.update(SessionData::new(token.clone())).await;
        info!(identifier = %credentials.identifier, "Admin logged in");
        Ok(token)
    }

    async fn request_token(&self, credentials: &Credentials) -> Result<String> {
        let url = self.endpoint(&["auth", "login"])?;
        let request = self.client.post(url).json(credentials);
        let response: LoginResponse = Self::send_json(request, "login").await?;

        if response.token.is_empty() {
            anyhow::bail!("Login response contained an empty token");
        }
        Ok(response.token)
    }

    // ===== Employee Operations =====

    /// List all employees using the held session credential.
    /// Fails with `NotAuthenticated` before any request if no login has succeeded.
    pub async fn list_employees(&self) -> Result<Vec<Employee>, ClientError> {
        let token = self
            .session
            .token()
            .await
            .ok_or(ClientError::NotAuthenticated)?;

        let kind = ClientError::FetchFailed(FetchTarget::Employees);
        let employees = self
            .fetch_employees(&token)
            .await
            .map_err(|e| Self::fail("list_employees", e, kind))?;

        debug!(count = employees.len(), "Fetched employees");
        Ok(employees)
    }

    async fn fetch_employees(&self, token: &str) -> Result<Vec<Employee>> {
        let url = self.endpoint(&["employees"])?;
        let request = self.client.get(url).bearer_auth(token);
        Self::send_json(request, "list employees").await
    }

    /// Create an employee. The record is sent and the created record returned
    /// exactly as the backend shapes them.
    pub async fn add_employee(
        &self,
        token: &str,
        employee: &Employee,
    ) -> Result<Employee, ClientError> {
        let kind = ClientError::CreateFailed;
        if token.is_empty() {
            warn!("add_employee called without a token");
            return Err(kind);
        }

        let created = self
            .create_employee(token, employee)
            .await
            .map_err(|e| Self::fail("add_employee", e, kind))?;

        debug!(id = ?created.id(), "Created employee");
        Ok(created)
    }

    async fn create_employee(&self, token: &str, employee: &Employee) -> Result<Employee> {
        let url = self.endpoint(&["employees"])?;
        let request = self.client.post(url).bearer_auth(token).json(employee);
        Self::send_json(request, "add employee").await
    }

    /// Fetch a single employee by id
    pub async fn get_employee(&self, token: &str, id: &str) -> Result<Employee, ClientError> {
        let kind = ClientError::FetchFailed(FetchTarget::EmployeeDetails);
        if token.is_empty() || !is_valid_id(id) {
            warn!(id, "get_employee called without a token or a usable id");
            return Err(kind);
        }

        self.fetch_employee(token, id)
            .await
            .map_err(|e| Self::fail("get_employee", e, kind))
    }

    async fn fetch_employee(&self, token: &str, id: &str) -> Result<Employee> {
        let url = self.endpoint(&["employees", id])?;
        let request = self.client.get(url).bearer_auth(token);
        Self::send_json(request, "employee details").await
    }

    /// Delete an employee by id. The response body is not inspected.
    pub async fn delete_employee(
        &self,
        token: &str,
        id: &str,
    ) -> Result<DeleteConfirmation, ClientError> {
        let kind = ClientError::DeleteFailed;
        if token.is_empty() || !is_valid_id(id) {
            warn!(id, "delete_employee called without a token or a usable id");
            return Err(kind);
        }

        self.remove_employee(token, id)
            .await
            .map_err(|e| Self::fail("delete_employee", e, kind))?;

        debug!(id, "Deleted employee");
        Ok(DeleteConfirmation::deleted())
    }

    async fn remove_employee(&self, token: &str, id: &str) -> Result<()> {
        let url = self.endpoint(&["employees", id])?;
        let request = self.client.delete(url).bearer_auth(token);
        Self::send(request, "delete employee").await?;
        Ok(())
    }
}
