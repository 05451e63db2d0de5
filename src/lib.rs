//! hoshi: a file-backed, versioned phrase store for localization projects.
//!
//! A project directory holds packages; each package holds an ordered history
//! of versions, and each version maps phrase keys to per-language text.
//! [`store::ProjectStore`] reads and writes that tree, [`repository::Repository`]
//! adds editor policy on top, and [`api`] serves it over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod repository;
pub mod store;

pub use error::{Error, Result};
