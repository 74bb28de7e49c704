//! Typed access to the roster HTTP API.
//!
//! [`DataGateway`] is the only way the view layer reaches the service.
//! [`HttpGateway`] implements it over `reqwest` with a fixed per-request
//! timeout and no retries; every failure surfaces as a [`GatewayError`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use roster_core::role::{CreateRole, Role, UpdateRole};
use roster_core::types::DbId;
use roster_core::user::{CreateUser, UpdateUser, User};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::GatewayError;

/// One call per CRUD operation. Each call is independent.
#[async_trait]
pub trait DataGateway: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, GatewayError>;
    async fn create_user(&self, input: &CreateUser) -> Result<User, GatewayError>;
    async fn update_user(&self, id: DbId, patch: &UpdateUser) -> Result<User, GatewayError>;
    async fn remove_user(&self, id: DbId) -> Result<(), GatewayError>;

    async fn list_roles(&self) -> Result<Vec<Role>, GatewayError>;
    async fn create_role(&self, input: &CreateRole) -> Result<Role, GatewayError>;
    async fn update_role(&self, id: DbId, patch: &UpdateRole) -> Result<Role, GatewayError>;
    async fn remove_role(&self, id: DbId) -> Result<(), GatewayError>;
}

/// Error body produced by the service: `{ "error": ..., "code": ... }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: Option<String>,
}

/// [`DataGateway`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Build a gateway whose requests all share `config.request_timeout`.
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(GatewayError::Transport)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and decode a JSON success body.
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GatewayError> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    /// Send a request whose success carries no body.
    async fn execute(&self, request: RequestBuilder) -> Result<(), GatewayError> {
        check_status(request.send().await?).await?;
        Ok(())
    }
}

/// Turn a non-success response into [`GatewayError::Status`], reading the
/// service's error body when it has one.
async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.code, body.error),
        Err(_) if text.trim().is_empty() => (
            None,
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        ),
        Err(_) => (None, text),
    };

    tracing::debug!(%status, ?code, %message, "Request rejected by service");
    Err(GatewayError::Status {
        status,
        code,
        message,
    })
}

#[async_trait]
impl DataGateway for HttpGateway {
    async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
        tracing::debug!("Listing users");
        self.fetch(self.client.get(self.url("/users"))).await
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, GatewayError> {
        tracing::debug!(email = %input.email, "Creating user");
        self.fetch(self.client.post(self.url("/users")).json(input))
            .await
    }

    async fn update_user(&self, id: DbId, patch: &UpdateUser) -> Result<User, GatewayError> {
        tracing::debug!(user_id = id, "Updating user");
        self.fetch(self.client.put(self.url(&format!("/users/{id}"))).json(patch))
            .await
    }

    async fn remove_user(&self, id: DbId) -> Result<(), GatewayError> {
        tracing::debug!(user_id = id, "Removing user");
        self.execute(self.client.delete(self.url(&format!("/users/{id}"))))
            .await
    }

    async fn list_roles(&self) -> Result<Vec<Role>, GatewayError> {
        tracing::debug!("Listing roles");
        self.fetch(self.client.get(self.url("/roles"))).await
    }

    async fn create_role(&self, input: &CreateRole) -> Result<Role, GatewayError> {
        tracing::debug!(name = %input.name, "Creating role");
        self.fetch(self.client.post(self.url("/roles")).json(input))
            .await
    }

    async fn update_role(&self, id: DbId, patch: &UpdateRole) -> Result<Role, GatewayError> {
        tracing::debug!(role_id = id, "Updating role");
        self.fetch(self.client.put(self.url(&format!("/roles/{id}"))).json(patch))
            .await
    }

    async fn remove_role(&self, id: DbId) -> Result<(), GatewayError> {
        tracing::debug!(role_id = id, "Removing role");
        self.execute(self.client.delete(self.url(&format!("/roles/{id}"))))
            .await
    }
}
