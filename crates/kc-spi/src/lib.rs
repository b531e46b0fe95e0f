//! # kc-spi
//!
//! Service Provider Interface (SPI) types shared by storage providers.
//!
//! ## Design
//!
//! - [`Provider`] - Base trait for all provider implementations
//! - [`KeycloakSession`] - Unit of work that dispatches invalidation events
//! - [`InvalidationListener`] - Hook notified before and after removals

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod invalidation;
pub mod provider;
pub mod session;

pub use invalidation::{InvalidationEvent, InvalidationListener};
pub use provider::Provider;
pub use session::KeycloakSession;
