//! Domain entities handed back by the content collaborators.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a stored article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub u64);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ArticleId {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse().map(ArticleId)
    }
}

impl From<u64> for ArticleId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A published knowledge-base article as returned by a content query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub permalink: String,
}

impl Article {
    pub fn new(
        id: impl Into<ArticleId>,
        title: impl Into<String>,
        permalink: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            permalink: permalink.into(),
        }
    }
}

/// A named value within a taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub name: String,
}

impl Term {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
