//! Post catalog for folio.
//!
//! Loads a directory of MDX posts, keeps the published ones in date order
//! and answers tag and pagination queries over them.

pub mod catalog;
pub mod page;
pub mod tags;

pub use catalog::{CatalogConfig, CatalogError, Post, PostCatalog, PostIssue};
pub use page::{paginate, Page};
pub use tags::TagInfo;
