use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    application::{list::ListError, shortcode::ShortcodeError},
    config::LoadError,
    infra::error::InfraError,
};

/// Error chain flattened into displayable lines, outermost first.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    List(#[from] ListError),
    #[error(transparent)]
    Shortcode(#[from] ShortcodeError),
}

impl AppError {
    /// Flatten the error chain, attributing template failures to the code
    /// that attempted the render.
    pub fn report(&self) -> ErrorReport {
        let source = match self {
            AppError::List(ListError::Template(err))
            | AppError::Shortcode(ShortcodeError::List(ListError::Template(err))) => err.origin(),
            _ => "application::error::AppError",
        };
        ErrorReport::from_error(source, self)
    }
}
