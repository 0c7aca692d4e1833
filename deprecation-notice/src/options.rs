/*!
Call-site options accepted alongside a deprecation message
*/

use crate::{identifier::DeprecationId, notice::Severity};

/// Second argument of a deprecation report.
///
/// The identifier is required to construct the options at all; everything
/// else is optional. A bare identifier converts directly, so
/// `report("msg", "app.component.behavior")` works at call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationOptions {
    pub id: DeprecationId,
    pub severity: Severity,
    pub since: Option<String>,
    pub drop_from: Option<String>,
    pub url: Option<String>,
}

impl DeprecationOptions {
    pub fn new(id: impl Into<DeprecationId>) -> Self {
        Self {
            id: id.into(),
            severity: Severity::default(),
            since: None,
            drop_from: None,
            url: None,
        }
    }

    pub fn since(mut self, version: impl Into<String>) -> Self {
        self.since = Some(version.into());
        self
    }

    pub fn drop_from(mut self, version: impl Into<String>) -> Self {
        self.drop_from = Some(version.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl From<DeprecationId> for DeprecationOptions {
    fn from(id: DeprecationId) -> Self {
        Self::new(id)
    }
}

impl From<&'static str> for DeprecationOptions {
    fn from(id: &'static str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DeprecationOptions {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}
