//! Knowledge-base article lists.
//!
//! [`ListRenderer`] turns caller options into a [`ContentFilter`], resolves a
//! heading from taxonomy terms when no explicit title was given, and renders
//! the matching articles through the `article_list.html` template.

use std::collections::BTreeMap;
use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::application::repos::{ContentFilter, ContentQuery, RepoError, TermLookup};
use crate::config::ListSettings;
use crate::domain::class_names::{sanitize_class_list, trim_class_list};
use crate::domain::entities::{Article, ArticleId};
use crate::domain::types::Taxonomy;
use crate::presentation::views::{
    ArticleListItemView, ArticleListTemplate, TemplateRenderError, render_template,
};

pub const DEFAULT_EMPTY_MESSAGE: &str = "No documentation articles.";

/// Caller-supplied list options. Every field defaults to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub category: String,
    pub keyword: String,
    pub title: String,
    pub css_classes: String,
    pub exclude: String,
}

impl ListOptions {
    /// Build options from shortcode attributes, ignoring unknown names.
    pub fn from_attributes(attributes: &BTreeMap<String, String>) -> Self {
        let mut options = Self::default();
        for (name, value) in attributes {
            let slot = match name.to_ascii_lowercase().as_str() {
                "category" => &mut options.category,
                "keyword" => &mut options.keyword,
                "title" => &mut options.title,
                "css_classes" => &mut options.css_classes,
                "exclude" => &mut options.exclude,
                _ => continue,
            };
            slot.clone_from(value);
        }
        options
    }

    /// Derive the content filter for these options.
    pub fn to_filter(&self) -> ContentFilter {
        let mut filter = ContentFilter {
            exclude_ids: parse_exclude(&self.exclude),
            ..ContentFilter::default()
        };
        if !self.category.is_empty() {
            filter.category = Some(self.category.clone());
        }
        if !self.keyword.is_empty() {
            filter.keyword = Some(self.keyword.clone());
        }
        filter
    }
}

fn parse_exclude(raw: &str) -> Vec<ArticleId> {
    if raw.is_empty() {
        return Vec::new();
    }

    raw.split(',')
        .filter_map(|token| match token.parse::<ArticleId>() {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(token, error = %err, "ignoring unparseable exclude entry");
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ListRendererConfig {
    pub empty_message: String,
    pub escape_item_titles: bool,
}

impl Default for ListRendererConfig {
    fn default() -> Self {
        Self {
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            escape_item_titles: false,
        }
    }
}

impl From<&ListSettings> for ListRendererConfig {
    fn from(settings: &ListSettings) -> Self {
        Self {
            empty_message: settings.empty_message.clone(),
            escape_item_titles: settings.escape_item_titles,
        }
    }
}

#[derive(Debug, Error)]
pub enum ListError {
    #[error(transparent)]
    Lookup(#[from] RepoError),
    #[error(transparent)]
    Template(#[from] TemplateRenderError),
}

#[derive(Clone)]
pub struct ListRenderer {
    terms: Arc<dyn TermLookup>,
    content: Arc<dyn ContentQuery>,
    config: ListRendererConfig,
}

impl ListRenderer {
    pub fn new(
        terms: Arc<dyn TermLookup>,
        content: Arc<dyn ContentQuery>,
        config: ListRendererConfig,
    ) -> Self {
        Self {
            terms,
            content,
            config,
        }
    }

    /// Render the list fragment for `options`.
    #[instrument(
        skip(self, options),
        fields(category = %options.category, keyword = %options.keyword)
    )]
    pub fn render(&self, options: &ListOptions) -> Result<String, ListError> {
        let filter = options.to_filter();
        let mut title = options.title.clone();
        let mut css_classes = options.css_classes.clone();

        if !options.category.is_empty() {
            if title.is_empty() {
                title = self.term_title(&options.category, Taxonomy::Category)?;
            }
            css_classes.push_str(" wpkb-list-category-");
            css_classes.push_str(&options.category);
            css_classes = sanitize_class_list(&css_classes);
        }

        if !options.keyword.is_empty() {
            if title.is_empty() {
                title = self.term_title(&options.keyword, Taxonomy::Keyword)?;
            }
            // Keyword suffix is appended after sanitizing and is never sanitized itself.
            css_classes.push_str(" wpkb-list-keyword-");
            css_classes.push_str(&options.keyword);
        }

        let articles = self.content.fetch(&filter)?;
        debug!(count = articles.len(), "fetched articles");

        counter!("wpkb_list_render_total").increment(1);
        if articles.is_empty() {
            counter!("wpkb_list_empty_total").increment(1);
        }

        let template = ArticleListTemplate {
            css_classes: trim_class_list(&css_classes).to_string(),
            title,
            empty_message: self.config.empty_message.clone(),
            escape_item_titles: self.config.escape_item_titles,
            items: build_items(&articles),
        };

        Ok(render_template(&template)?)
    }

    fn term_title(&self, name: &str, taxonomy: Taxonomy) -> Result<String, RepoError> {
        let term = self.terms.find_term_by_name(name, taxonomy)?;
        debug!(%taxonomy, name, found = term.is_some(), "resolved title term");
        Ok(term.map(|term| term.name).unwrap_or_default())
    }
}

fn build_items(articles: &[Article]) -> Vec<ArticleListItemView> {
    let total = articles.len();
    articles
        .iter()
        .enumerate()
        .map(|(index, article)| ArticleListItemView {
            css_classes: item_classes(article.id, index, total),
            title: article.title.clone(),
            permalink: article.permalink.clone(),
        })
        .collect()
}

/// Classes for the item at zero-based `index` of `total`.
///
/// `first` marks index 1, not index 0. Existing stylesheets target that.
pub fn item_classes(id: ArticleId, index: usize, total: usize) -> String {
    let mut classes = format!("wpkb-article-{id}");
    classes.push_str(if index % 2 == 1 {
        " wpkb-odd"
    } else {
        " wpkb-even"
    });
    if index == 1 {
        classes.push_str(" wpkb-first");
    }
    // `last` does not yield to `first`: the second of two items carries both,
    // where older list markup emitted only `wpkb-first`.
    if index + 1 == total {
        classes.push_str(" wpkb-last");
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_attributes_ignores_unknown_names() {
        let attributes = BTreeMap::from([
            ("category".to_string(), "Guides".to_string()),
            ("CSS_Classes".to_string(), "wide".to_string()),
            ("limit".to_string(), "5".to_string()),
        ]);

        let options = ListOptions::from_attributes(&attributes);
        assert_eq!(
            options,
            ListOptions {
                category: "Guides".to_string(),
                css_classes: "wide".to_string(),
                ..ListOptions::default()
            }
        );
    }

    #[test]
    fn filter_always_targets_published_articles() {
        let filter = ListOptions::default().to_filter();
        assert_eq!(filter, ContentFilter::default());
        assert!(filter.exclude_ids.is_empty());
        assert!(filter.category.is_none());
        assert!(filter.keyword.is_none());
    }

    #[test]
    fn exclude_list_is_split_on_commas() {
        let options = ListOptions {
            exclude: "3,7".to_string(),
            ..ListOptions::default()
        };
        assert_eq!(options.to_filter().exclude_ids, vec![ArticleId(3), ArticleId(7)]);
    }

    #[test]
    fn exclude_list_skips_garbage_tokens() {
        let options = ListOptions {
            exclude: " 4, ,x,12".to_string(),
            ..ListOptions::default()
        };
        assert_eq!(options.to_filter().exclude_ids, vec![ArticleId(4), ArticleId(12)]);
    }

    #[test]
    fn item_classes_mark_parity_and_positions() {
        let classes: Vec<String> = (0..3)
            .map(|index| item_classes(ArticleId(10 + index as u64), index, 3))
            .collect();
        assert_eq!(
            classes,
            vec![
                "wpkb-article-10 wpkb-even",
                "wpkb-article-11 wpkb-odd wpkb-first",
                "wpkb-article-12 wpkb-even wpkb-last",
            ]
        );
    }

    #[test]
    fn single_item_is_even_and_last() {
        assert_eq!(item_classes(ArticleId(5), 0, 1), "wpkb-article-5 wpkb-even wpkb-last");
    }

    #[test]
    fn second_of_two_is_first_and_last() {
        assert_eq!(
            item_classes(ArticleId(2), 1, 2),
            "wpkb-article-2 wpkb-odd wpkb-first wpkb-last"
        );
    }
}
