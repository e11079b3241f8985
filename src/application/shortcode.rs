//! Shortcode registry and expansion.
//!
//! Handlers are registered explicitly by the composing application. The
//! registry then replaces `[tag attr="value"]`, `[tag /]` and
//! `[tag]inner[/tag]` occurrences in a document with handler output.
//! `[[tag]]` escapes to the literal `[tag]`.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, trace};

use crate::application::list::{ListError, ListOptions, ListRenderer};

/// Identifier the article list is registered under.
pub const SHORTCODE: &str = "wpkb_list";

/// Attribute names are lowercased; positional values are keyed `"0"`, `"1"`, …
pub type Attributes = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum ShortcodeError {
    #[error("no shortcode registered under `{tag}`")]
    UnknownTag { tag: String },
    #[error(transparent)]
    List(#[from] ListError),
}

pub trait ShortcodeHandler: Send + Sync {
    fn handle(
        &self,
        attributes: &Attributes,
        content: Option<&str>,
    ) -> Result<String, ShortcodeError>;
}

#[derive(Default, Clone)]
pub struct ShortcodeRegistry {
    handlers: BTreeMap<String, Arc<dyn ShortcodeHandler>>,
}

impl ShortcodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `tag`, replacing any previous handler.
    pub fn register(&mut self, tag: impl Into<String>, handler: Arc<dyn ShortcodeHandler>) {
        let tag = tag.into();
        debug!(%tag, "registered shortcode");
        self.handlers.insert(tag, handler);
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn invoke(
        &self,
        tag: &str,
        attributes: &Attributes,
        content: Option<&str>,
    ) -> Result<String, ShortcodeError> {
        let handler = self
            .handlers
            .get(tag)
            .ok_or_else(|| ShortcodeError::UnknownTag {
                tag: tag.to_string(),
            })?;
        handler.handle(attributes, content)
    }

    /// Replace every registered shortcode in `text` with its rendered output.
    pub fn expand(&self, text: &str) -> Result<String, ShortcodeError> {
        let mut output = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find('[') {
            output.push_str(&rest[..open]);
            let candidate = &rest[open..];

            if let Some(consumed) = self.escaped_occurrence(candidate) {
                // Drop the outer brackets, keep the tag text verbatim.
                output.push_str(&candidate[1..consumed - 1]);
                rest = &candidate[consumed..];
                continue;
            }

            match self.occurrence(candidate) {
                Some(found) => {
                    trace!(tag = found.tag, "expanding shortcode");
                    let attributes = parse_attributes(found.raw_attributes);
                    output.push_str(&self.invoke(found.tag, &attributes, found.content)?);
                    rest = &candidate[found.len..];
                }
                None => {
                    output.push('[');
                    rest = &candidate[1..];
                }
            }
        }

        output.push_str(rest);
        Ok(output)
    }

    fn escaped_occurrence(&self, candidate: &str) -> Option<usize> {
        let inner = candidate.strip_prefix('[')?;
        let found = self.occurrence(inner)?;
        inner[found.len..].starts_with(']').then_some(found.len + 2)
    }

    fn occurrence<'a>(&self, candidate: &'a str) -> Option<Occurrence<'a>> {
        let open = parse_open_tag(candidate)?;
        if !self.contains(open.tag) {
            return None;
        }

        if !open.self_closing {
            let closing = format!("[/{}]", open.tag);
            let after_open = &candidate[open.len..];
            if let Some(close) = after_open.find(&closing) {
                return Some(Occurrence {
                    tag: open.tag,
                    raw_attributes: open.raw_attributes,
                    content: Some(&after_open[..close]),
                    len: open.len + close + closing.len(),
                });
            }
        }

        Some(Occurrence {
            tag: open.tag,
            raw_attributes: open.raw_attributes,
            content: None,
            len: open.len,
        })
    }
}

struct OpenTag<'a> {
    tag: &'a str,
    raw_attributes: &'a str,
    self_closing: bool,
    len: usize,
}

struct Occurrence<'a> {
    tag: &'a str,
    raw_attributes: &'a str,
    content: Option<&'a str>,
    len: usize,
}

fn is_tag_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

fn parse_open_tag(candidate: &str) -> Option<OpenTag<'_>> {
    let body = candidate.strip_prefix('[')?;
    let name_len = body.find(|ch: char| !is_tag_char(ch))?;
    if name_len == 0 {
        return None;
    }

    let tag = &body[..name_len];
    let after_name = &body[name_len..];
    if !after_name.starts_with(|ch: char| ch.is_whitespace() || ch == ']' || ch == '/') {
        return None;
    }

    let close = after_name.find(']')?;
    let attributes = &after_name[..close];
    if attributes.contains('[') {
        return None;
    }

    let (raw_attributes, self_closing) = match attributes.trim_end().strip_suffix('/') {
        Some(stripped) => (stripped, true),
        None => (attributes, false),
    };

    Some(OpenTag {
        tag,
        raw_attributes,
        self_closing,
        len: 1 + name_len + close + 1,
    })
}

/// Parse a shortcode attribute string.
///
/// Accepts `name="value"`, `name='value'`, `name=value` and bare positional
/// values. Whitespace around `=` is allowed.
pub fn parse_attributes(raw: &str) -> Attributes {
    let mut attributes = Attributes::new();
    let mut positional = 0usize;
    let mut rest = raw.trim_start();

    while !rest.is_empty() {
        if let Some((value, remaining)) = take_quoted(rest) {
            attributes.insert(positional.to_string(), value.to_string());
            positional += 1;
            rest = remaining.trim_start();
            continue;
        }

        let token_end = rest
            .find(|ch: char| ch.is_whitespace() || ch == '=')
            .unwrap_or(rest.len());
        let token = &rest[..token_end];
        let after_token = rest[token_end..].trim_start();

        if let Some(after_eq) = after_token.strip_prefix('=')
            && !token.is_empty()
        {
            let after_eq = after_eq.trim_start();
            let (value, remaining) = take_quoted(after_eq).unwrap_or_else(|| {
                let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                (&after_eq[..end], &after_eq[end..])
            });
            attributes.insert(token.to_ascii_lowercase(), value.to_string());
            rest = remaining.trim_start();
            continue;
        }

        if token.is_empty() {
            // A stray `=`; skip it.
            rest = rest[1..].trim_start();
            continue;
        }

        attributes.insert(positional.to_string(), token.to_string());
        positional += 1;
        rest = rest[token_end..].trim_start();
    }

    attributes
}

fn take_quoted(input: &str) -> Option<(&str, &str)> {
    let quote = input.chars().next().filter(|ch| *ch == '"' || *ch == '\'')?;
    let body = &input[1..];
    let end = body.find(quote)?;
    Some((&body[..end], &body[end + 1..]))
}

/// Adapts [`ListRenderer`] to the shortcode surface. Inner content is ignored.
pub struct ArticleListShortcode {
    renderer: ListRenderer,
}

impl ArticleListShortcode {
    pub fn new(renderer: ListRenderer) -> Self {
        Self { renderer }
    }
}

impl ShortcodeHandler for ArticleListShortcode {
    fn handle(
        &self,
        attributes: &Attributes,
        _content: Option<&str>,
    ) -> Result<String, ShortcodeError> {
        let options = ListOptions::from_attributes(attributes);
        Ok(self.renderer.render(&options)?)
    }
}

/// Register the article list under [`SHORTCODE`].
pub fn register_article_list(registry: &mut ShortcodeRegistry, renderer: ListRenderer) {
    registry.register(SHORTCODE, Arc::new(ArticleListShortcode::new(renderer)));
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl ShortcodeHandler for Echo {
        fn handle(
            &self,
            attributes: &Attributes,
            content: Option<&str>,
        ) -> Result<String, ShortcodeError> {
            let pairs: Vec<String> = attributes
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            Ok(format!("<{}|{}>", pairs.join(","), content.unwrap_or("-")))
        }
    }

    fn registry() -> ShortcodeRegistry {
        let mut registry = ShortcodeRegistry::new();
        registry.register("echo", Arc::new(Echo));
        registry
    }

    #[test]
    fn parses_every_attribute_form() {
        let attributes = parse_attributes(
            r#"Category="Guides" keyword='setup' title=Intro  css_classes = "a b" lone "quoted pos""#,
        );
        assert_eq!(attributes.get("category").map(String::as_str), Some("Guides"));
        assert_eq!(attributes.get("keyword").map(String::as_str), Some("setup"));
        assert_eq!(attributes.get("title").map(String::as_str), Some("Intro"));
        assert_eq!(attributes.get("css_classes").map(String::as_str), Some("a b"));
        assert_eq!(attributes.get("0").map(String::as_str), Some("lone"));
        assert_eq!(attributes.get("1").map(String::as_str), Some("quoted pos"));
    }

    #[test]
    fn empty_attribute_string_yields_nothing() {
        assert!(parse_attributes("   ").is_empty());
    }

    #[test]
    fn expands_self_closing_forms() {
        let registry = registry();
        let expanded = registry
            .expand(r#"a [echo x="1"] b [echo /] c"#)
            .expect("expand");
        assert_eq!(expanded, "a <x=1|-> b <|-> c");
    }

    #[test]
    fn enclosing_form_passes_inner_content() {
        let registry = registry();
        let expanded = registry
            .expand("[echo y=2]inner [b]text[/b][/echo] tail")
            .expect("expand");
        assert_eq!(expanded, "<y=2|inner [b]text[/b]> tail");
    }

    #[test]
    fn leaves_unknown_and_malformed_tags_alone() {
        let registry = registry();
        let text = "[other a=1] [echo [echoes] [ ] [echo";
        assert_eq!(registry.expand(text).expect("expand"), text);
    }

    #[test]
    fn double_brackets_escape_a_tag() {
        let registry = registry();
        assert_eq!(
            registry.expand("see [[echo a=1]] and [echo]").expect("expand"),
            "see [echo a=1] and <|->"
        );
    }

    #[test]
    fn invoke_rejects_unregistered_tags() {
        let err = registry()
            .invoke(SHORTCODE, &Attributes::new(), None)
            .expect_err("not registered");
        assert!(matches!(err, ShortcodeError::UnknownTag { tag } if tag == SHORTCODE));
    }
}
