//! # kc-model
//!
//! Domain models for the Keycloak file store.
//!
//! This crate defines the entities the storage providers hand out:
//! client scopes, groups and roles. Identifiers are plain strings scoped
//! by realm, so a client scope may be addressed by its name.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod client_scope;
pub mod group;
pub mod role;

pub use client_scope::ClientScope;
pub use group::Group;
pub use role::Role;
