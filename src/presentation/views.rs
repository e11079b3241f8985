use askama::{Error as AskamaError, Template};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }

    /// Module path of the code that attempted the render.
    pub fn origin(&self) -> &'static str {
        self.source
    }
}

pub fn render_template<T: Template>(template: &T) -> Result<String, TemplateRenderError> {
    template.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
    })
}

/// One `<li>` of an article list.
#[derive(Debug, Clone)]
pub struct ArticleListItemView {
    pub css_classes: String,
    pub title: String,
    pub permalink: String,
}

#[derive(Debug, Clone, Template)]
#[template(path = "article_list.html")]
pub struct ArticleListTemplate {
    pub css_classes: String,
    pub title: String,
    pub empty_message: String,
    pub escape_item_titles: bool,
    pub items: Vec<ArticleListItemView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(items: Vec<ArticleListItemView>, escape_item_titles: bool) -> ArticleListTemplate {
        ArticleListTemplate {
            css_classes: "extra".to_string(),
            title: "Guides & <Tips>".to_string(),
            empty_message: "Nothing here.".to_string(),
            escape_item_titles,
            items,
        }
    }

    #[test]
    fn empty_list_renders_message_without_markup() {
        let html = render_template(&template(Vec::new(), false)).expect("render");
        insta::assert_snapshot!(html, @r#"<div class="wpkb-list extra"><h3 class="wpkb-list-title">Guides &#38; &#60;Tips&#62;</h3><div class="wpkb-list-content"><p>Nothing here.</p></div></div>"#);
    }

    #[test]
    fn item_titles_follow_escape_setting() {
        let item = ArticleListItemView {
            css_classes: "wpkb-article-1 wpkb-even wpkb-last".to_string(),
            title: "<em>Setup</em>".to_string(),
            permalink: "https://kb.example/setup".to_string(),
        };

        let raw = render_template(&template(vec![item.clone()], false)).expect("render");
        assert!(raw.contains(
            "<li class=\"wpkb-article-1 wpkb-even wpkb-last\"><a href=\"https://kb.example/setup\"><em>Setup</em></a></li>"
        ));

        let escaped = render_template(&template(vec![item], true)).expect("render");
        insta::assert_snapshot!(escaped, @r#"<div class="wpkb-list extra"><h3 class="wpkb-list-title">Guides &#38; &#60;Tips&#62;</h3><div class="wpkb-list-content"><ul><li class="wpkb-article-1 wpkb-even wpkb-last"><a href="https://kb.example/setup">&#60;em&#62;Setup&#60;/em&#62;</a></li></ul></div></div>"#);
    }
}
