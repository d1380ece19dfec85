//! # Login API Types

use serde::Deserialize;

/// Form body posted to `/login`
///
/// Missing fields deserialize as empty strings so an incomplete form is
/// treated like wrong credentials (redirect) instead of a rejected body.
///
/// ## Example body
/// ```text
/// username=user&password=password
/// ```
#[derive(Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Query flags understood by the login page (`/login?error`, `/login?logout`)
#[derive(Debug, Default, Deserialize)]
pub struct LoginPageParams {
    pub error: Option<String>,
    pub logout: Option<String>,
}
