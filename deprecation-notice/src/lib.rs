/*!
Data model for deprecation notices reported by legacy extension code
*/

pub mod identifier;
pub mod notice;
pub mod options;

pub use identifier::DeprecationId;
pub use notice::{DeprecationNotice, NoticeMetadata, Severity};
pub use options::DeprecationOptions;
