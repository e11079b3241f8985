//! Collaborator traits describing the host content platform.

use thiserror::Error;

use crate::domain::entities::{Article, ArticleId, Term};
use crate::domain::types::{ContentType, PostStatus, Taxonomy};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("lookup timed out")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Query constraints derived from caller options.
///
/// Results are always unbounded; there is no page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFilter {
    pub content_type: ContentType,
    pub status: PostStatus,
    pub exclude_ids: Vec<ArticleId>,
    pub category: Option<String>,
    pub keyword: Option<String>,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self {
            content_type: ContentType::Article,
            status: PostStatus::Published,
            exclude_ids: Vec::new(),
            category: None,
            keyword: None,
        }
    }
}

impl ContentFilter {
    pub fn excludes(&self, id: ArticleId) -> bool {
        self.exclude_ids.contains(&id)
    }

    pub fn term_for(&self, taxonomy: Taxonomy) -> Option<&str> {
        match taxonomy {
            Taxonomy::Category => self.category.as_deref(),
            Taxonomy::Keyword => self.keyword.as_deref(),
        }
    }
}

/// Resolves taxonomy terms by their display name.
pub trait TermLookup: Send + Sync {
    fn find_term_by_name(
        &self,
        name: &str,
        taxonomy: Taxonomy,
    ) -> Result<Option<Term>, RepoError>;
}

/// Fetches every article matching a filter, in the store's natural order.
pub trait ContentQuery: Send + Sync {
    fn fetch(&self, filter: &ContentFilter) -> Result<Vec<Article>, RepoError>;
}
