//! Domain models for hoshi.
//!
//! # Core Concepts
//!
//! - [`Project`]: The root of a localization repository, one per storage root.
//! - [`Package`]: A named subdivision of a project holding an ordered version history.
//! - [`Version`]: A snapshot of phrase translations within a package, identified by a
//!   sortable string id derived from its file name.
//! - [`Phrases`]: Phrase key to per-language text ([`Translations`]).
//!
//! Every on-disk document carries a [`DocumentKind`] discriminator. Metadata is an
//! open map that the store never inspects.

pub(crate) mod document;
mod package;
mod phrase;
mod project;
mod version;

pub use document::*;
pub use package::*;
pub use phrase::*;
pub use project::*;
pub use version::*;
