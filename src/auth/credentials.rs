//! # Credential Store
//!
//! Holds the one username/password/roles tuple the service authenticates
//! against. It is built once at startup from [`Config`] and never changes.

use crate::config::Config;
use std::collections::BTreeSet;
use std::fmt;

/// The single stored credential
///
/// The password is opaque and compared verbatim: no hashing, no trimming,
/// no case folding.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    username: String,
    password: String,
    roles: BTreeSet<String>,
}

impl Credential {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    /// Exact, case-sensitive match on both username and password.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("roles", &self.roles)
            .finish()
    }
}

/// Read-only holder for the process-wide credential
///
/// There is no way to add a second credential or replace the first one;
/// the store is immutable for its whole lifetime.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    credential: Credential,
}

impl CredentialStore {
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Credential::new(
            config.username.clone(),
            config.password.clone(),
            config.roles.iter().cloned(),
        ))
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Look up the credential for a username/password pair.
    pub fn verify(&self, username: &str, password: &str) -> Option<&Credential> {
        self.credential
            .matches(username, password)
            .then_some(&self.credential)
    }
}
