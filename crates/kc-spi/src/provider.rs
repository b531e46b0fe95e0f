//! Provider base trait.

use std::any::Any;
use std::fmt::Debug;

/// Base trait for all providers.
///
/// Providers are the building blocks the host server looks up per session.
/// Each provider implements one capability (client scopes, groups, ...).
pub trait Provider: Send + Sync + Debug + Any {
    /// Called when the provider is being closed.
    ///
    /// Use this to clean up any resources held by the provider.
    fn close(&self) {}

    /// Returns a reference to self as Any for downcasting.
    fn as_any(&self) -> &dyn Any;
}
