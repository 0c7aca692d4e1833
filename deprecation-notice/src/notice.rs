/*!
The notice handed to sinks each time a deprecated path is hit
*/

use serde::{Deserialize, Serialize};

use crate::{identifier::DeprecationId, options::DeprecationOptions};

/// How urgent a deprecation is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Announced ahead of time; the old path still works without caveats
    Pending,
    /// Deprecated now and scheduled for removal
    #[default]
    Warning,
}

/// Optional details carried next to the message and identifier.
///
/// New fields may be added in later releases, so it cannot be built with a
/// struct literal outside this crate; start from `NoticeMetadata::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct NoticeMetadata {
    #[serde(default)]
    pub severity: Severity,
    /// Version that introduced the deprecation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// Version that removes the deprecated API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_from: Option<String>,
    /// Migration guide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A single deprecation report.
///
/// Built fresh for every call and never cached: two reports with identical
/// inputs produce two equal notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecationNotice {
    message: String,
    identifier: DeprecationId,
    #[serde(flatten)]
    metadata: NoticeMetadata,
}

impl DeprecationNotice {
    pub fn new(message: impl Into<String>, identifier: impl Into<DeprecationId>) -> Self {
        Self {
            message: message.into(),
            identifier: identifier.into(),
            metadata: NoticeMetadata::default(),
        }
    }

    /// Build a notice from the `(message, options)` pair used at call sites
    pub fn from_options(message: impl Into<String>, options: DeprecationOptions) -> Self {
        let DeprecationOptions {
            id,
            severity,
            since,
            drop_from,
            url,
        } = options;

        Self {
            message: message.into(),
            identifier: id,
            metadata: NoticeMetadata {
                severity,
                since,
                drop_from,
                url,
            },
        }
    }

    pub fn with_metadata(mut self, metadata: NoticeMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn identifier(&self) -> &DeprecationId {
        &self.identifier
    }

    pub fn metadata(&self) -> &NoticeMetadata {
        &self.metadata
    }

    pub fn severity(&self) -> Severity {
        self.metadata.severity
    }
}
