//! Core types for the Floe coupled-model kernel.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! fundamental vocabulary used throughout the Floe workspace: array
//! identities and their semantic categories, dimension tags, the timestep
//! interval type, the configuration store, and the error types shared
//! across crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod id;
pub mod time;

pub use config::{ConfigStore, ConfigValue};
pub use error::{ConfigError, UpdateError};
pub use id::{ArrayId, Category, DimTag};
pub use time::TimestepTime;
