//! Content Repository
//!
//! Client-side cache of the remote post collection: a mapping keyed by
//! post id, the original fetch order, and the currently selected post id.
//! `replace_all` is the only mutator of the mapping; the consistency
//! policy is refetch-after-mutation, never partial patching. Selection is
//! an id pointer into the mapping, so selecting a post never forks its
//! data.

use std::collections::HashMap;

use tracing::warn;

use crate::shared::post::Post;

#[derive(Debug, Default)]
pub struct PostRepository {
    posts: HashMap<i64, Post>,
    order: Vec<i64>,
    selected: Option<i64>,
}

impl PostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection with a freshly fetched one.
    /// Duplicate ids keep the first occurrence. A selection pointing at a
    /// post that no longer exists is cleared.
    pub fn replace_all(&mut self, posts: Vec<Post>) {
        self.posts.clear();
        self.order.clear();
        for post in posts {
            if self.posts.contains_key(&post.id) {
                warn!(id = post.id, "dropping duplicate post id from fetch");
                continue;
            }
            self.order.push(post.id);
            self.posts.insert(post.id, post);
        }
        if let Some(id) = self.selected {
            if !self.posts.contains_key(&id) {
                self.selected = None;
            }
        }
    }

    /// Point the selection at a post, or clear it with `None`.
    /// Selecting an id that is not in the collection is a no-op.
    pub fn select(&mut self, id: Option<i64>) -> bool {
        match id {
            None => {
                self.selected = None;
                true
            }
            Some(id) if self.posts.contains_key(&id) => {
                self.selected = Some(id);
                true
            }
            Some(id) => {
                warn!(id, "cannot select unknown post");
                false
            }
        }
    }

    pub fn get(&self, id: i64) -> Option<&Post> {
        self.posts.get(&id)
    }

    pub fn selected(&self) -> Option<&Post> {
        self.selected.and_then(|id| self.posts.get(&id))
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    /// All posts in original fetch order.
    pub fn all(&self) -> Vec<&Post> {
        self.order.iter().filter_map(|id| self.posts.get(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(id: i64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            content: format!("content of {title}"),
            author_id: 1,
            author_name: "alice".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn test_replace_all_is_total_replacement() {
        let mut repo = PostRepository::new();
        repo.replace_all(vec![post(1, "one"), post(2, "two")]);
        repo.replace_all(vec![post(3, "three")]);

        let titles: Vec<_> = repo.all().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["three"]);
        assert!(repo.get(1).is_none());
    }

    #[test]
    fn test_all_preserves_fetch_order() {
        let mut repo = PostRepository::new();
        repo.replace_all(vec![post(9, "c"), post(2, "a"), post(5, "b")]);
        let ids: Vec<_> = repo.all().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9, 2, 5]);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let mut repo = PostRepository::new();
        repo.replace_all(vec![post(1, "first"), post(1, "second")]);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get(1).unwrap().title, "first");
    }

    #[test]
    fn test_select_and_clear() {
        let mut repo = PostRepository::new();
        repo.replace_all(vec![post(1, "one")]);

        assert!(repo.select(Some(1)));
        assert_eq!(repo.selected().unwrap().id, 1);

        assert!(repo.select(None));
        assert!(repo.selected().is_none());
    }

    #[test]
    fn test_select_unknown_id_is_noop() {
        let mut repo = PostRepository::new();
        repo.replace_all(vec![post(1, "one")]);
        repo.select(Some(1));

        assert!(!repo.select(Some(42)));
        assert_eq!(repo.selected_id(), Some(1));
    }

    #[test]
    fn test_replace_all_clears_vanished_selection() {
        let mut repo = PostRepository::new();
        repo.replace_all(vec![post(1, "one"), post(2, "two")]);
        repo.select(Some(1));

        repo.replace_all(vec![post(2, "two")]);
        assert!(repo.selected().is_none());
    }

    #[test]
    fn test_replace_all_keeps_surviving_selection() {
        let mut repo = PostRepository::new();
        repo.replace_all(vec![post(1, "one"), post(2, "two")]);
        repo.select(Some(2));

        repo.replace_all(vec![post(2, "two"), post(3, "three")]);
        assert_eq!(repo.selected_id(), Some(2));
    }

    #[test]
    fn test_empty_repository() {
        let repo = PostRepository::new();
        assert!(repo.is_empty());
        assert_eq!(repo.len(), 0);
        assert!(repo.all().is_empty());
    }
}
