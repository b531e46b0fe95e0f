//! # kc-storage-file
//!
//! File-backed storage for Keycloak client scopes, groups and roles.
//!
//! Every entity is a JSON document below a configurable root directory,
//! partitioned by realm. Providers read documents on demand and write them
//! back explicitly: client scopes through
//! [`ClientScopeProvider::update`](kc_storage::ClientScopeProvider::update),
//! groups through [`GroupAdapter::save`].
//!
//! ## Providers
//!
//! - [`FileClientScopeProvider`] - Client scope directory
//! - [`FileGroupProvider`] - Group documents
//! - [`FileRoleProvider`] - Role documents
//! - [`GroupAdapter`] - Parent, child and role inheritance navigation

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod client_scope;
mod convert;
pub mod entities;
pub mod error;
pub mod group;
pub mod hierarchy;
pub mod providers;
pub mod role;
pub mod store;

pub use client_scope::FileClientScopeProvider;
pub use entities::{ClientScopeEntity, FileEntity, GroupEntity, RoleEntity};
pub use group::FileGroupProvider;
pub use hierarchy::GroupAdapter;
pub use providers::FileStorageProviders;
pub use role::FileRoleProvider;
pub use store::FileEntityStore;
