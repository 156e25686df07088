//! Account Factory domain primitives.
//!
//! This crate owns account discovery, tag filtering, and the request/event
//! contracts shared by the provisioning pipeline. It has no AWS SDK or Lambda
//! runtime dependency; every remote capability is reached through the traits
//! in [`providers`].

pub mod arns;
pub mod directory;
pub mod discovery;
pub mod error;
pub mod events;
pub mod model;
pub mod pagination;
pub mod params;
pub mod providers;
pub mod provisioning;
pub mod tagging;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use error::{AftError, AftResult};
