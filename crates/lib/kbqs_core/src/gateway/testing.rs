//! In-memory [`UserApi`] used by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{GatewayError, UserApi};
use crate::models::user::{Authority, NewUser, UserProfile, UserRecord, UserStatus};

pub fn user(id: &str) -> UserRecord {
    UserRecord {
        id: id.into(),
        email: format!("{id}@example.com"),
        username: id.into(),
        first_name: "Ana".into(),
        last_name: "Cruz".into(),
        authorities: vec![Authority {
            authority: "ROLE_STAFF".into(),
        }],
        status: UserStatus::ACTIVE,
        timezone: None,
        timezone_id: None,
        language: None,
        area_codes: Vec::new(),
    }
}

/// Mutating call received by the fake.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(NewUser),
    Update(String, UserProfile),
    Password(String, String),
}

type Hook = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
pub struct FakeUserApi {
    users: Mutex<Vec<UserRecord>>,
    calls: Mutex<Vec<Call>>,
    list_calls: AtomicUsize,
    fail_next: Mutex<Option<GatewayError>>,
    hook: Mutex<Option<Hook>>,
}

impl FakeUserApi {
    pub fn with_users(users: Vec<UserRecord>) -> Arc<Self> {
        Arc::new(Self {
            users: Mutex::new(users),
            ..Self::default()
        })
    }

    /// Fail the next call (of any kind) with `err`.
    pub fn fail_next(&self, err: GatewayError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    /// Run `hook` at the start of every mutating call.
    pub fn on_mutation(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.hook.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_matching(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn mutation(&self, call: Call) -> Result<(), GatewayError> {
        if let Some(hook) = self.hook.lock().unwrap().as_ref() {
            hook();
        }
        self.calls.lock().unwrap().push(call);
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserApi for FakeUserApi {
    async fn list_users(&self, statuses: &[UserStatus]) -> Result<Vec<UserRecord>, GatewayError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_next.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| statuses.contains(&u.status))
            .cloned()
            .collect())
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<UserRecord, GatewayError> {
        self.mutation(Call::Create(new_user.clone()))?;
        let mut users = self.users.lock().unwrap();
        let created = UserRecord {
            id: format!("new-{}", users.len()),
            email: new_user.email.clone(),
            username: new_user.username.clone(),
            first_name: new_user.first_name.clone(),
            last_name: new_user.last_name.clone(),
            authorities: vec![Authority {
                authority: new_user.role.authority().into(),
            }],
            ..user("")
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update_user(
        &self,
        id: &str,
        profile: &UserProfile,
    ) -> Result<UserRecord, GatewayError> {
        self.mutation(Call::Update(id.into(), profile.clone()))?;
        let mut users = self.users.lock().unwrap();
        let existing = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| GatewayError::Status {
                status: 404,
                body: format!("user {id} not found"),
            })?;
        existing.email = profile.email.clone();
        existing.username = profile.username.clone();
        existing.first_name = profile.first_name.clone();
        existing.last_name = profile.last_name.clone();
        existing.status = profile.status;
        existing.authorities = vec![Authority {
            authority: profile.role.authority().into(),
        }];
        Ok(existing.clone())
    }

    async fn change_password(&self, id: &str, password: &str) -> Result<UserRecord, GatewayError> {
        self.mutation(Call::Password(id.into(), password.into()))?;
        let users = self.users.lock().unwrap();
        users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| GatewayError::Status {
                status: 404,
                body: format!("user {id} not found"),
            })
    }
}
