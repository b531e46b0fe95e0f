//! # kc-storage
//!
//! Storage abstraction traits for the Keycloak file store.
//!
//! This crate defines the storage provider interfaces implemented by
//! concrete backends, and the key-value store contract those backends
//! consume.
//!
//! ## Provider Traits
//!
//! - [`ClientScopeProvider`] - Realm-scoped client scope directory
//! - [`GroupProvider`] - CRUD operations for groups
//! - [`RoleProvider`] - CRUD operations for roles
//!
//! ## Store Contract
//!
//! - [`EntityStore`] - Entities keyed by `(id, realm_id)`

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod client_scope;
pub mod error;
pub mod group;
pub mod role;
pub mod store;

pub use client_scope::ClientScopeProvider;
pub use error::{StorageError, StorageResult};
pub use group::{GroupProvider, GroupSearchCriteria};
pub use role::RoleProvider;
pub use store::{Entity, EntityStore};
