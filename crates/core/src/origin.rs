use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identity-source tag of a directory record (e.g. the name of a SAML provider).
///
/// The same username may exist under several origins; each (username, origin)
/// pair is a distinct identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Origin(Cow<'static, str>);

impl Origin {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Like [`Origin::new`], but rejects blank tags.
    pub fn parse(name: impl Into<Cow<'static, str>>) -> DomainResult<Self> {
        let origin = Self::new(name);
        if origin.as_str().trim().is_empty() {
            return Err(DomainError::validation("origin cannot be empty"));
        }
        Ok(origin)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Origin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Origin {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Origin {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
