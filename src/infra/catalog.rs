//! File-backed content catalog.
//!
//! Serves both collaborator traits from a TOML document so lists can be
//! rendered without a live content platform:
//!
//! ```toml
//! [[terms]]
//! taxonomy = "category"
//! name = "Guides"
//!
//! [[articles]]
//! id = 3
//! title = "Installing"
//! permalink = "https://kb.example/installing"
//! categories = ["Guides"]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use slug::slugify;
use tracing::{debug, info};

use crate::application::repos::{ContentFilter, ContentQuery, RepoError, TermLookup};
use crate::domain::entities::{Article, ArticleId, Term};
use crate::domain::types::{ContentType, PostStatus, Taxonomy};

use super::error::InfraError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TermEntry {
    pub taxonomy: Taxonomy,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleEntry {
    pub id: ArticleId,
    pub title: String,
    pub permalink: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ArticleEntry {
    fn terms(&self, taxonomy: Taxonomy) -> &[String] {
        match taxonomy {
            Taxonomy::Category => &self.categories,
            Taxonomy::Keyword => &self.keywords,
        }
    }

    fn to_article(&self) -> Article {
        Article {
            id: self.id,
            title: self.title.clone(),
            permalink: self.permalink.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    terms: Vec<TermEntry>,
    articles: Vec<ArticleEntry>,
}

/// Articles and terms held in file order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    terms: Vec<TermEntry>,
    articles: Vec<ArticleEntry>,
}

impl InMemoryCatalog {
    pub fn new(terms: Vec<TermEntry>, articles: Vec<ArticleEntry>) -> Self {
        Self { terms, articles }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        let CatalogFile { terms, articles } = toml::from_str(source)?;
        Ok(Self::new(terms, articles))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InfraError> {
        let path = path.as_ref();
        let source =
            fs::read_to_string(path).map_err(|err| InfraError::catalog_read(path, err))?;
        let catalog =
            Self::from_toml_str(&source).map_err(|err| InfraError::catalog_parse(path, err))?;
        info!(
            path = %path.display(),
            terms = catalog.terms.len(),
            articles = catalog.articles.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }
}

impl TermLookup for InMemoryCatalog {
    fn find_term_by_name(
        &self,
        name: &str,
        taxonomy: Taxonomy,
    ) -> Result<Option<Term>, RepoError> {
        let name = name.trim();
        Ok(self
            .terms
            .iter()
            .find(|term| term.taxonomy == taxonomy && term.name.trim().eq_ignore_ascii_case(name))
            .map(|term| Term::new(term.name.clone())))
    }
}

impl ContentQuery for InMemoryCatalog {
    fn fetch(&self, filter: &ContentFilter) -> Result<Vec<Article>, RepoError> {
        let articles: Vec<Article> = self
            .articles
            .iter()
            .filter(|entry| entry.content_type == filter.content_type)
            .filter(|entry| entry.status == filter.status)
            .filter(|entry| !filter.excludes(entry.id))
            .filter(|entry| {
                [Taxonomy::Category, Taxonomy::Keyword]
                    .into_iter()
                    .all(|taxonomy| matches_terms(entry.terms(taxonomy), filter.term_for(taxonomy)))
            })
            .map(ArticleEntry::to_article)
            .collect();
        debug!(
            content_type = filter.content_type.as_str(),
            status = filter.status.as_str(),
            matched = articles.len(),
            "catalog query"
        );
        Ok(articles)
    }
}

/// A comma-separated query value matches when any listed term is assigned.
/// Names are compared by slug, so `Getting Started` matches `getting-started`.
fn matches_terms(assigned: &[String], wanted: Option<&str>) -> bool {
    let Some(wanted) = wanted else {
        return true;
    };

    let assigned: Vec<String> = assigned.iter().map(slugify).collect();
    wanted
        .split(',')
        .map(slugify)
        .filter(|slug| !slug.is_empty())
        .any(|slug| assigned.contains(&slug))
}
