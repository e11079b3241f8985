use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

use crate::application::list::ListOptions;

/// Command-line arguments for the wpkb binary.
#[derive(Debug, Parser)]
#[command(name = "wpkb", version, about = "Knowledge-base article list renderer")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "WPKB_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render one article list and print the HTML fragment.
    Render(RenderArgs),
    /// Expand `wpkb_list` shortcodes embedded in a document.
    Expand(ExpandArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct CatalogOverride {
    /// Override the catalog file articles and terms are read from.
    #[arg(long = "catalog", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ListOverrides {
    /// Override the message shown when no article matches.
    #[arg(long = "empty-message", value_name = "TEXT")]
    pub empty_message: Option<String>,

    /// HTML-escape article titles inside list items.
    #[arg(
        long = "escape-item-titles",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub escape_item_titles: Option<bool>,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub catalog: CatalogOverride,

    #[command(flatten)]
    pub list: ListOverrides,

    /// Category name to list.
    #[arg(long, default_value = "")]
    pub category: String,

    /// Keyword name to list.
    #[arg(long, default_value = "")]
    pub keyword: String,

    /// Heading text; falls back to the matching term name.
    #[arg(long, default_value = "")]
    pub title: String,

    /// Extra classes for the list wrapper.
    #[arg(long = "css-classes", default_value = "")]
    pub css_classes: String,

    /// Comma-separated article ids to leave out.
    #[arg(long, default_value = "")]
    pub exclude: String,
}

impl RenderArgs {
    pub fn to_options(&self) -> ListOptions {
        ListOptions {
            category: self.category.clone(),
            keyword: self.keyword.clone(),
            title: self.title.clone(),
            css_classes: self.css_classes.clone(),
            exclude: self.exclude.clone(),
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct ExpandArgs {
    #[command(flatten)]
    pub catalog: CatalogOverride,

    #[command(flatten)]
    pub list: ListOverrides,

    /// Document to expand; `-` reads standard input.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,
}
