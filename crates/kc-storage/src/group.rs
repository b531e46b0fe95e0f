//! Group storage provider trait.

use async_trait::async_trait;
use kc_model::Group;

use crate::error::StorageResult;

/// Provider for group storage operations.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait GroupProvider: Send + Sync {
    /// Creates a new group.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if the ID is taken, or a group with
    /// the same name exists at the same level (same parent or top-level).
    async fn create(&self, group: &Group) -> StorageResult<()>;

    /// Updates an existing group.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the group doesn't exist.
    async fn update(&self, group: &Group) -> StorageResult<()>;

    /// Deletes a group by ID together with all of its descendants.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the group doesn't exist.
    async fn delete(&self, realm_id: &str, id: &str) -> StorageResult<()>;

    /// Gets a group by ID.
    async fn get_by_id(&self, realm_id: &str, id: &str) -> StorageResult<Option<Group>>;

    /// Lists all groups in a realm, sorted by name.
    async fn list(&self, realm_id: &str) -> StorageResult<Vec<Group>>;

    /// Lists top-level groups in a realm.
    async fn list_top_level(&self, realm_id: &str) -> StorageResult<Vec<Group>> {
        self.search(realm_id, &GroupSearchCriteria::top_level()).await
    }

    /// Lists child groups of a parent group.
    async fn list_children(&self, realm_id: &str, parent_id: &str) -> StorageResult<Vec<Group>> {
        self.search(realm_id, &GroupSearchCriteria::new().parent(parent_id))
            .await
    }

    /// Searches for groups matching criteria.
    async fn search(
        &self,
        realm_id: &str,
        criteria: &GroupSearchCriteria,
    ) -> StorageResult<Vec<Group>>;

    /// Counts groups in a realm.
    async fn count(&self, realm_id: &str) -> StorageResult<u64>;

    /// Drops every group of a realm that is itself being removed.
    async fn pre_remove_realm(&self, realm_id: &str) -> StorageResult<()>;
}

/// Search criteria for groups.
#[derive(Debug, Default, Clone)]
pub struct GroupSearchCriteria {
    /// Search string (case-insensitive substring of the group name).
    pub search: Option<String>,
    /// Filter by exact name.
    pub name: Option<String>,
    /// Filter to top-level groups only.
    pub top_level_only: bool,
    /// Filter by parent group ID.
    pub parent_id: Option<String>,
    /// Maximum results to return.
    pub max_results: Option<usize>,
    /// Offset for pagination.
    pub offset: Option<usize>,
}

impl GroupSearchCriteria {
    /// Creates a new search criteria.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            search: None,
            name: None,
            top_level_only: false,
            parent_id: None,
            max_results: None,
            offset: None,
        }
    }

    /// Creates criteria for top-level groups only.
    #[must_use]
    pub fn top_level() -> Self {
        Self {
            top_level_only: true,
            ..Self::new()
        }
    }

    /// Sets the search string.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Filters by exact name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Filters by parent group.
    #[must_use]
    pub fn parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Sets maximum results.
    #[must_use]
    pub const fn max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Sets offset for pagination.
    #[must_use]
    pub const fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Checks whether a group passes the filters (pagination excluded).
    #[must_use]
    pub fn matches(&self, group: &Group) -> bool {
        if self.top_level_only && !group.is_top_level() {
            return false;
        }
        if let Some(parent_id) = &self.parent_id {
            if group.parent_id.as_ref() != Some(parent_id) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if &group.name != name {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !group.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }

    /// Applies offset and limit to an already filtered list.
    #[must_use]
    pub fn paginate(&self, groups: Vec<Group>) -> Vec<Group> {
        let offset = self.offset.unwrap_or(0);
        let limit = self.max_results.unwrap_or(usize::MAX);
        groups.into_iter().skip(offset).take(limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_filter() {
        let criteria = GroupSearchCriteria::top_level();
        assert!(criteria.matches(&Group::new("desert", "nomads")));
        assert!(!criteria.matches(&Group::new_child("desert", "nomads", "riders")));
    }

    #[test]
    fn top_level_leaves_other_filters_unset() {
        let criteria = GroupSearchCriteria::top_level();
        assert!(criteria.top_level_only);
        assert!(criteria.search.is_none());
        assert!(criteria.name.is_none());
        assert!(criteria.parent_id.is_none());
        assert_eq!(criteria.max_results, None);
        assert_eq!(criteria.offset, None);
    }

    #[test]
    fn parent_and_search_filters() {
        let criteria = GroupSearchCriteria::new().parent("nomads").search("RID");
        assert!(criteria.matches(&Group::new_child("desert", "nomads", "camel-riders")));
        assert!(!criteria.matches(&Group::new_child("desert", "nomads", "traders")));
        assert!(!criteria.matches(&Group::new_child("desert", "tribes", "riders")));
    }

    #[test]
    fn exact_name_filter() {
        let criteria = GroupSearchCriteria::new().name("nomads");
        assert!(criteria.matches(&Group::new("desert", "nomads")));
        assert!(!criteria.matches(&Group::new("desert", "nomads-2")));
    }

    #[test]
    fn pagination() {
        let groups: Vec<Group> = ["a", "b", "c", "d"]
            .iter()
            .map(|n| Group::new("desert", *n))
            .collect();

        let page = GroupSearchCriteria::new().offset(1).max_results(2).paginate(groups);
        let names: Vec<&str> = page.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
    }
}
