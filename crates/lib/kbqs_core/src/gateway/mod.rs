//! User data gateway: the only path to the backend.
//!
//! [`UserGateway`] wraps a [`UserApi`] transport with the directory list
//! cache and in-flight mutation tracking:
//!
//! - [`UserGateway::fetch_users`]: cached list of active, pending and suspended users
//! - [`UserGateway::add_user`]: create, then invalidate the list
//! - [`UserGateway::disable_user`]: re-submit with status `-1`, then invalidate
//! - [`UserGateway::update_user`]: re-submit edited profile fields, then invalidate
//! - [`UserGateway::change_password`]: password only, list untouched
//!
//! The remote list is the single source of truth; mutations never patch the
//! cached list locally.

pub mod cache;
pub mod http;
pub mod pending;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::models::user::{NewUser, UserProfile, UserRecord, UserStatus};
use cache::{USERS_KEY, UserListCache};
use pending::{Mutation, PendingMutations};

/// Errors surfaced by gateway calls.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Request failed with status code {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Transport seam for the admin user endpoints.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// `GET /users?status=…`
    async fn list_users(&self, statuses: &[UserStatus]) -> Result<Vec<UserRecord>, GatewayError>;

    /// `POST /user`
    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, GatewayError>;

    /// `PUT /user/{id}` with the full profile.
    async fn update_user(&self, id: &str, profile: &UserProfile)
    -> Result<UserRecord, GatewayError>;

    /// `PUT /user/{id}/password`
    async fn change_password(&self, id: &str, password: &str) -> Result<UserRecord, GatewayError>;
}

/// Cached, invalidating front for a [`UserApi`]. Cheap to clone; clones
/// share the cache and pending counters.
#[derive(Clone)]
pub struct UserGateway {
    api: Arc<dyn UserApi>,
    cache: Arc<RwLock<UserListCache>>,
    pending: PendingMutations,
}

impl std::fmt::Debug for UserGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserGateway")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl UserGateway {
    pub fn new(api: Arc<dyn UserApi>) -> Self {
        Self {
            api,
            cache: Arc::new(RwLock::new(UserListCache::new())),
            pending: PendingMutations::new(),
        }
    }

    pub fn pending(&self) -> &PendingMutations {
        &self.pending
    }

    /// Users with a listed status. Served from cache until invalidated.
    ///
    /// Failures are returned as-is and leave the cache untouched.
    /// A list that was in flight when a mutation invalidated is returned to
    /// its caller but not served again.
    pub async fn fetch_users(&self) -> Result<Arc<Vec<UserRecord>>, GatewayError> {
        let generation = {
            let cache = self.cache.read().await;
            if let Some(users) = cache.get(USERS_KEY) {
                debug!(count = users.len(), "user list served from cache");
                return Ok(users);
            }
            cache.generation()
        };

        debug!("user list stale, fetching");
        let users = self.api.list_users(&UserStatus::LISTED).await?;
        let mut cache = self.cache.write().await;
        let users = cache.store(USERS_KEY, users, generation);
        if cache.generation() == generation {
            debug!(count = users.len(), "user list cached");
        } else {
            debug!(count = users.len(), "user list invalidated while fetching, kept stale");
        }
        Ok(users)
    }

    /// Last fetched list, fresh or not.
    pub async fn cached_users(&self) -> Option<Arc<Vec<UserRecord>>> {
        self.cache.read().await.peek(USERS_KEY)
    }

    /// Mark the user list stale.
    pub async fn invalidate_users(&self) {
        self.cache.write().await.invalidate(USERS_KEY);
    }

    /// Create a user with status `0` and no area codes.
    pub async fn add_user(&self, user: &NewUser) -> Result<UserRecord, GatewayError> {
        let _guard = self.pending.begin(Mutation::AddUser);
        match self.api.create_user(user).await {
            Ok(created) => {
                info!(user_id = %created.id, username = %created.username, "user created");
                self.invalidate_users().await;
                Ok(created)
            }
            Err(e) => {
                warn!(username = %user.username, error = %e, "create user failed");
                Err(e)
            }
        }
    }

    /// Disable a user: same update call, original fields, status `-1`.
    pub async fn disable_user(&self, user: &UserRecord) -> Result<UserRecord, GatewayError> {
        let _guard = self.pending.begin(Mutation::DisableUser);
        let profile = UserProfile {
            status: UserStatus::DISABLED,
            ..UserProfile::from(user)
        };
        match self.api.update_user(&user.id, &profile).await {
            Ok(updated) => {
                info!(user_id = %user.id, "user disabled");
                self.invalidate_users().await;
                Ok(updated)
            }
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "disable user failed");
                Err(e)
            }
        }
    }

    /// Re-submit a full profile for `id`.
    pub async fn update_user(
        &self,
        id: &str,
        profile: &UserProfile,
    ) -> Result<UserRecord, GatewayError> {
        let _guard = self.pending.begin(Mutation::UpdateUser);
        match self.api.update_user(id, profile).await {
            Ok(updated) => {
                info!(user_id = %id, "user updated");
                self.invalidate_users().await;
                Ok(updated)
            }
            Err(e) => {
                warn!(user_id = %id, error = %e, "update user failed");
                Err(e)
            }
        }
    }

    /// Set a new password. The list is not invalidated.
    pub async fn change_password(
        &self,
        id: &str,
        new_password: &str,
    ) -> Result<UserRecord, GatewayError> {
        let _guard = self.pending.begin(Mutation::ChangePassword);
        match self.api.change_password(id, new_password).await {
            Ok(updated) => {
                info!(user_id = %id, "password changed");
                Ok(updated)
            }
            Err(e) => {
                warn!(user_id = %id, error = %e, "change password failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing;
