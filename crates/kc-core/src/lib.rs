//! # kc-core
//!
//! Core utilities, configuration, and error handling for the Keycloak
//! file store.
//!
//! This crate provides foundational types shared by the storage crates:
//! store configuration, the configuration error type and tracing setup.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::FileStoreConfig;
pub use error::{Error, Result};
