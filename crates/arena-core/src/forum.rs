use arena_types::Post;
use tracing::debug;

use crate::Result;
use crate::sanitize;
use crate::store::ForumStore;

/// Forum access: list and add posts.
pub struct Forum<S> {
    store: S,
}

impl<S: ForumStore> Forum<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All posts, most recent first.
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        self.store.list_posts()
    }

    /// Sanitize `content` and append it with the current timestamp.
    pub fn add_post(&self, content: &str) -> Result<()> {
        let content = sanitize::clean_required("post content", content)?;
        self.store.insert_post(&content)?;
        debug!(len = content.len(), "post added");
        Ok(())
    }
}
