//! User directory domain models.
//!
//! Wire shapes for `/api/core/admin/user*` plus the typed [`Role`] and
//! [`UserStatus`] the rest of the crate branches on.

use serde::{Deserialize, Serialize};

/// Authority string granted to administrators.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Authority string granted to regular staff.
pub const ROLE_STAFF: &str = "ROLE_STAFF";

/// Console role, the closed set the backend authorities map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Admin,
    #[default]
    Staff,
}

impl Role {
    /// Map a backend authority string. Anything but `ROLE_ADMIN` is staff.
    pub fn from_authority(authority: &str) -> Self {
        if authority == ROLE_ADMIN {
            Role::Admin
        } else {
            Role::Staff
        }
    }

    /// Backend authority string sent as `roleName`.
    pub fn authority(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Staff => ROLE_STAFF,
        }
    }

    /// Label shown on user cards.
    pub fn card_label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Staff => "Staff",
        }
    }

    /// Label shown on the dialog's user-type toggle.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Staff => "Employee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.card_label())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" | "role_admin" => Ok(Role::Admin),
            "staff" | "employee" | "role_staff" => Ok(Role::Staff),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Backend-owned lifecycle marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserStatus(pub i32);

impl UserStatus {
    pub const ACTIVE: UserStatus = UserStatus(0);
    pub const PENDING: UserStatus = UserStatus(1);
    pub const SUSPENDED: UserStatus = UserStatus(2);
    /// Soft-deleted. There is no hard delete.
    pub const DISABLED: UserStatus = UserStatus(-1);

    /// Statuses requested by the directory listing.
    pub const LISTED: [UserStatus; 3] = [Self::ACTIVE, Self::PENDING, Self::SUSPENDED];

    pub fn is_disabled(&self) -> bool {
        *self == Self::DISABLED
    }

    /// Comma-joined query value, e.g. `0,1,2`.
    pub fn query_value(statuses: &[UserStatus]) -> String {
        statuses
            .iter()
            .map(|s| s.0.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A single role grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    pub authority: String,
}

/// User record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub authorities: Vec<Authority>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub timezone: Option<serde_json::Value>,
    #[serde(default)]
    pub timezone_id: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub area_codes: Vec<String>,
}

impl UserRecord {
    /// Role derived from the first authority grant.
    pub fn role(&self) -> Role {
        self.authorities
            .first()
            .map(|a| Role::from_authority(&a.authority))
            .unwrap_or_default()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// `data` envelope wrapping every backend response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Paged list payload. Only `content` is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub content: Vec<UserRecord>,
}

/// Input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Profile fields re-submitted on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub status: UserStatus,
}

impl From<&UserRecord> for UserProfile {
    fn from(user: &UserRecord) -> Self {
        Self {
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role(),
            status: user.status,
        }
    }
}

/// `POST /user` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub role_name: &'static str,
    pub area_codes: [&'a str; 0],
    pub timezone: i32,
    pub timezone_id: Option<&'a str>,
    pub language: Option<&'a str>,
    pub status: UserStatus,
}

impl<'a> From<&'a NewUser> for CreateUserBody<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            email: &user.email,
            username: &user.username,
            password: &user.password,
            first_name: &user.first_name,
            last_name: &user.last_name,
            role_name: user.role.authority(),
            area_codes: [],
            timezone: 0,
            timezone_id: None,
            language: None,
            status: UserStatus::ACTIVE,
        }
    }
}

/// `PUT /user/{id}` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub status: UserStatus,
    pub timezone: i32,
    pub timezone_id: Option<&'a str>,
    pub language: Option<&'a str>,
    pub role_name: &'static str,
}

impl<'a> From<&'a UserProfile> for UpdateUserBody<'a> {
    fn from(profile: &'a UserProfile) -> Self {
        Self {
            email: &profile.email,
            username: &profile.username,
            first_name: &profile.first_name,
            last_name: &profile.last_name,
            status: profile.status,
            timezone: 0,
            timezone_id: None,
            language: None,
            role_name: profile.role.authority(),
        }
    }
}

/// `PUT /user/{id}/password` body.
#[derive(Debug, Serialize)]
pub struct PasswordBody<'a> {
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_maps_unknown_authorities_to_staff() {
        assert_eq!(Role::from_authority("ROLE_ADMIN"), Role::Admin);
        assert_eq!(Role::from_authority("ROLE_STAFF"), Role::Staff);
        assert_eq!(Role::from_authority("ROLE_AUDITOR"), Role::Staff);
    }

    #[test]
    fn role_parses_cli_spellings() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("Employee".parse::<Role>(), Ok(Role::Staff));
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn record_decodes_camel_case_with_missing_optionals() {
        let user: UserRecord = serde_json::from_value(json!({
            "id": "u1",
            "email": "ana@example.com",
            "username": "ana",
            "firstName": "Ana",
            "lastName": "Cruz",
            "authorities": [{"authority": "ROLE_ADMIN"}],
            "status": 2
        }))
        .unwrap();

        assert_eq!(user.role(), Role::Admin);
        assert_eq!(user.status, UserStatus::SUSPENDED);
        assert!(user.area_codes.is_empty());
        assert!(user.language.is_none());
        assert_eq!(user.full_name(), "Ana Cruz");
    }

    #[test]
    fn record_without_authorities_is_staff() {
        let user: UserRecord = serde_json::from_value(json!({
            "id": "u2",
            "email": "b@example.com",
            "username": "b",
            "firstName": "B",
            "lastName": "C"
        }))
        .unwrap();
        assert_eq!(user.role(), Role::Staff);
    }

    #[test]
    fn create_body_fixes_status_and_area_codes() {
        let new_user = NewUser {
            email: "ana@example.com".into(),
            username: "ana".into(),
            password: "Abcdef1!".into(),
            first_name: "Ana".into(),
            last_name: "Cruz".into(),
            role: Role::Staff,
        };
        let body = serde_json::to_value(CreateUserBody::from(&new_user)).unwrap();
        assert_eq!(
            body,
            json!({
                "email": "ana@example.com",
                "username": "ana",
                "password": "Abcdef1!",
                "firstName": "Ana",
                "lastName": "Cruz",
                "roleName": "ROLE_STAFF",
                "areaCodes": [],
                "timezone": 0,
                "timezoneId": null,
                "language": null,
                "status": 0
            })
        );
    }

    #[test]
    fn listed_statuses_query_value() {
        assert_eq!(UserStatus::query_value(&UserStatus::LISTED), "0,1,2");
    }
}
