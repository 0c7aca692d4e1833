/*!
Stable identifiers for deprecation sites
*/

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespaced token that names one deprecation site, e.g. `app.component.behavior`.
///
/// Downstream allow-lists key on this value, so once published it must never
/// change. The value is stored exactly as given: no trimming, no case folding,
/// no format checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeprecationId(Cow<'static, str>);

impl DeprecationId {
    /// Build an identifier from a string literal, usable in `const` items
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dot-separated segments of the identifier
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Leading segment, usually the owning product or plugin
    pub fn namespace(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }
}

impl fmt::Display for DeprecationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DeprecationId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&'static str> for DeprecationId {
    fn from(id: &'static str) -> Self {
        Self::from_static(id)
    }
}

impl From<String> for DeprecationId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}
