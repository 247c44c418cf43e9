//! User form validation: required fields, password policy, e-mail format.
//!
//! Every failing rule contributes its own message, so one field can carry
//! several errors at once (e.g. a password missing both a digit and a symbol).

use std::sync::LazyLock;

use regex::Regex;

use crate::models::user::UserProfile;

pub const REQUIRED: &str = "This field is required.";
pub const PASSWORD_TOO_SHORT: &str = "Must be more than 8 characters.";
pub const PASSWORD_NO_UPPERCASE: &str = "Must contain uppercase letter/s.";
pub const PASSWORD_NO_LOWERCASE: &str = "Must contain lowercase letter/s.";
pub const PASSWORD_NO_DIGIT: &str = "Must contain number/s.";
pub const PASSWORD_NO_SYMBOL: &str = "Must contain special character/s.";
pub const INVALID_EMAIL: &str = "Not a valid e-mail address.";
pub const PASSWORD_MISMATCH: &str = "Passwords does not match.";
pub const TOO_LONG: &str = "Must be at most 30 characters.";

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum characters accepted per input.
pub const MAX_INPUT_LEN: usize = 30;

// Leading dots and consecutive dots are rejected separately; the regex
// crate has no lookahead.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("email regex is valid")
});

/// Form field an error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Username,
    Password,
    ConfirmPassword,
    Email,
}

impl Field {
    /// Form key, as the backend and the form layer name it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Username => "userName",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::Email => "email",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(Field, &'static str)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, message: &'static str) {
        self.errors.push((field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Messages raised against `field`.
    pub fn for_field(&self, field: Field) -> Vec<&'static str> {
        self.errors
            .iter()
            .filter(|(f, _)| *f == field)
            .map(|(_, m)| *m)
            .collect()
    }

    pub fn has(&self, field: Field) -> bool {
        self.errors.iter().any(|(f, _)| *f == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().copied()
    }

    /// `Ok(())` when no rule failed.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Values collected by the user action dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
}

impl UserForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
            Field::Email => &self.email,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
            Field::Email => &mut self.email,
        }
    }
}

/// Check a password against the policy.
/// Returns one message per failing rule (empty = valid).
pub fn password_policy(password: &str) -> Vec<&'static str> {
    let mut errors = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(PASSWORD_TOO_SHORT);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push(PASSWORD_NO_UPPERCASE);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push(PASSWORD_NO_LOWERCASE);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(PASSWORD_NO_DIGIT);
    }
    if !password.chars().any(|c| c.is_ascii_punctuation()) {
        errors.push(PASSWORD_NO_SYMBOL);
    }

    errors
}

/// Whether `email` is a well-formed address.
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

/// Required and length checks for one input. True when both pass.
fn require(errors: &mut FieldErrors, field: Field, value: &str) -> bool {
    if value.is_empty() {
        errors.push(field, REQUIRED);
        false
    } else {
        check_length(errors, field, value)
    }
}

fn check_length(errors: &mut FieldErrors, field: Field, value: &str) -> bool {
    if value.chars().count() > MAX_INPUT_LEN {
        errors.push(field, TOO_LONG);
        false
    } else {
        true
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if require(errors, Field::Email, email) && !is_valid_email(email) {
        errors.push(Field::Email, INVALID_EMAIL);
    }
}

fn check_password_pair(errors: &mut FieldErrors, password: &str, confirm: &str) {
    if password.is_empty() {
        errors.push(Field::Password, REQUIRED);
    } else {
        check_length(errors, Field::Password, password);
        for message in password_policy(password) {
            errors.push(Field::Password, message);
        }
    }

    if require(errors, Field::ConfirmPassword, confirm) && confirm != password {
        errors.push(Field::ConfirmPassword, PASSWORD_MISMATCH);
    }
}

/// Reject any value longer than [`MAX_INPUT_LEN`]. Nothing is truncated.
pub fn validate_lengths(values: &[(Field, &str)]) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for (field, value) in values {
        check_length(&mut errors, *field, value);
    }
    errors.into_result()
}

/// Validate an "add user" submission.
pub fn validate_new_user(form: &UserForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    require(&mut errors, Field::FirstName, &form.first_name);
    require(&mut errors, Field::LastName, &form.last_name);
    require(&mut errors, Field::Username, &form.username);
    check_password_pair(&mut errors, &form.password, &form.confirm_password);
    check_email(&mut errors, &form.email);

    errors.into_result()
}

/// Validate profile fields re-submitted on update.
pub fn validate_profile(profile: &UserProfile) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    require(&mut errors, Field::FirstName, &profile.first_name);
    require(&mut errors, Field::LastName, &profile.last_name);
    require(&mut errors, Field::Username, &profile.username);
    check_email(&mut errors, &profile.email);

    errors.into_result()
}

/// Validate a new password and its confirmation.
pub fn validate_password_change(password: &str, confirm: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_password_pair(&mut errors, password, confirm);
    errors.into_result()
}
