//! REST transport for the admin user endpoints.
//!
//! All calls go to `{base_url}/api/core/admin`. Responses are wrapped in a
//! `data` envelope. No timeout and no retry are applied.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{GatewayError, UserApi};
use crate::config::ConsoleConfig;
use crate::models::user::{
    CreateUserBody, Envelope, NewUser, PasswordBody, UpdateUserBody, UserPage, UserProfile,
    UserRecord, UserStatus,
};

/// Path prefix of the admin API.
pub const ADMIN_PREFIX: &str = "/api/core/admin";

/// [`UserApi`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpUserApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpUserApi {
    pub fn new(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            token,
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(Client::new(), &config.api_base_url, config.api_token.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{ADMIN_PREFIX}{path}", self.base_url)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, GatewayError> {
        let resp = self
            .authorize(req)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        decode(resp).await
    }
}

/// Check status and unwrap the `data` envelope.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, GatewayError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        return Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| GatewayError::Transport(e.to_string()))?;
    let envelope: Envelope<T> =
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))?;
    Ok(envelope.data)
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list_users(&self, statuses: &[UserStatus]) -> Result<Vec<UserRecord>, GatewayError> {
        let url = format!(
            "{}?status={}",
            self.url("/users"),
            UserStatus::query_value(statuses)
        );
        let page: UserPage = self.send(self.client.get(url)).await?;
        Ok(page.content)
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, GatewayError> {
        let req = self
            .client
            .post(self.url("/user"))
            .json(&CreateUserBody::from(user));
        self.send(req).await
    }

    async fn update_user(
        &self,
        id: &str,
        profile: &UserProfile,
    ) -> Result<UserRecord, GatewayError> {
        let req = self
            .client
            .put(self.url(&format!("/user/{id}")))
            .json(&UpdateUserBody::from(profile));
        self.send(req).await
    }

    async fn change_password(&self, id: &str, password: &str) -> Result<UserRecord, GatewayError> {
        let req = self
            .client
            .put(self.url(&format!("/user/{id}/password")))
            .json(&PasswordBody { password });
        self.send(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use httpmock::prelude::*;
    use serde_json::json;

    fn api(server: &MockServer) -> HttpUserApi {
        HttpUserApi::new(Client::new(), server.base_url(), None)
    }

    fn user_json(id: &str, status: i32) -> serde_json::Value {
        json!({
            "id": id,
            "email": format!("{id}@example.com"),
            "username": id,
            "firstName": "Ana",
            "lastName": "Cruz",
            "authorities": [{"authority": "ROLE_STAFF"}],
            "status": status,
            "timezone": 0,
            "timezoneId": null,
            "language": null,
            "areaCodes": []
        })
    }

    #[tokio::test]
    async fn list_users_requests_listed_statuses() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/core/admin/users")
                .query_param("status", "0,1,2");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"data": {"content": [user_json("u1", 0), user_json("u2", 2)]}}));
        });

        let users = api(&server)
            .list_users(&UserStatus::LISTED)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].status, UserStatus::SUSPENDED);
    }

    #[tokio::test]
    async fn create_user_posts_fixed_defaults() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/core/admin/user")
                .json_body(json!({
                    "email": "ana@example.com",
                    "username": "ana",
                    "password": "Abcdef1!",
                    "firstName": "Ana",
                    "lastName": "Cruz",
                    "roleName": "ROLE_ADMIN",
                    "areaCodes": [],
                    "timezone": 0,
                    "timezoneId": null,
                    "language": null,
                    "status": 0
                }));
            then.status(200).json_body(json!({"data": user_json("new", 0)}));
        });

        let created = api(&server)
            .create_user(&NewUser {
                email: "ana@example.com".into(),
                username: "ana".into(),
                password: "Abcdef1!".into(),
                first_name: "Ana".into(),
                last_name: "Cruz".into(),
                role: Role::Admin,
            })
            .await
            .unwrap();

        mock.assert();
        assert_eq!(created.id, "new");
    }

    #[tokio::test]
    async fn change_password_puts_only_password() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/api/core/admin/user/u1/password")
                .json_body(json!({"password": "Newpass1!"}));
            then.status(200).json_body(json!({"data": user_json("u1", 0)}));
        });

        api(&server).change_password("u1", "Newpass1!").await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn bearer_token_is_attached() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/core/admin/users")
                .header("authorization", "Bearer secret");
            then.status(200).json_body(json!({"data": {"content": []}}));
        });

        HttpUserApi::new(Client::new(), server.base_url(), Some("secret".into()))
            .list_users(&UserStatus::LISTED)
            .await
            .unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn non_success_status_carries_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/core/admin/users");
            then.status(503).body("maintenance");
        });

        let err = api(&server)
            .list_users(&UserStatus::LISTED)
            .await
            .unwrap_err();
        match err {
            GatewayError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/core/admin/users");
            then.status(200).body("not json");
        });

        let err = api(&server)
            .list_users(&UserStatus::LISTED)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)), "got {err:?}");
    }

    #[test]
    fn trailing_slash_in_base_url_is_trimmed() {
        let api = HttpUserApi::new(Client::new(), "http://host:8080/", None);
        assert_eq!(api.url("/users"), "http://host:8080/api/core/admin/users");
    }
}
