//! Application services layer.

pub mod error;
pub mod list;
pub mod repos;
pub mod shortcode;
