use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A permission/role that identities are granted (e.g. `space_developer`).
///
/// Opaque at this layer; the role API decides what holding it means.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const SPACE_DEVELOPER: Role = Role(Cow::Borrowed("space_developer"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::SPACE_DEVELOPER
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
