//! API key references: literal keys or `$ENV_VAR` indirection

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GaapError, Result};

/// An API key as written in the config file.
///
/// Resolution happens at read time and never caches.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretRef(String);

impl SecretRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Variable name when this is a `$NAME` reference
    pub fn env_name(&self) -> Option<&str> {
        self.0.strip_prefix('$')
    }

    /// Resolve against the process environment
    pub fn resolve(&self) -> Option<String> {
        resolve_secret(&self.0)
    }

    pub fn resolve_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        resolve_secret_with(&self.0, lookup)
    }

    /// Like [`SecretRef::resolve`] but reports what failed
    pub fn try_resolve(&self) -> Result<String> {
        self.resolve()
            .ok_or_else(|| GaapError::SecretUnresolved(self.describe()))
    }

    /// Printable form that never contains a literal key
    pub fn describe(&self) -> String {
        match self.env_name() {
            Some(name) => format!("${}", name),
            None if self.0.is_empty() => "<empty>".to_string(),
            None => "<literal>".to_string(),
        }
    }
}

impl fmt::Debug for SecretRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretRef").field(&self.describe()).finish()
    }
}

/// Resolve `$NAME` from the environment, or return a literal unchanged.
///
/// Empty input and empty or unset variables resolve to `None`.
pub fn resolve_secret(reference: &str) -> Option<String> {
    resolve_secret_with(reference, |name| std::env::var(name).ok())
}

pub fn resolve_secret_with<F>(reference: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match reference.strip_prefix('$') {
        Some("") => return None,
        Some(name) => lookup(name)?,
        None => reference.to_string(),
    };
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
