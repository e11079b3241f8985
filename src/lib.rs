//! Knowledge-base article lists for the `wpkb_list` shortcode.
//!
//! The [`application::list::ListRenderer`] builds a content filter from
//! caller options, asks the content platform for matching articles through
//! the [`application::repos`] traits, and renders an HTML fragment.
//! [`application::shortcode`] exposes the renderer to documents that embed
//! `[wpkb_list ...]` tags.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
