/*!
Reporter, sinks and their configuration
*/

pub mod config;
pub mod error;
pub mod reporter;
pub mod sinks;
