//! # Scraping "specs" module
//!
//! Page-specific extraction: *where the ground truth lives in the HTML* and
//! *how to read it tolerantly*. Specs are pure: they take a document string and
//! return a record or a [`ParseError`](crate::error::ParseError). Fetching,
//! storage and output live elsewhere.
//!
//! ## Conventions
//! - Locate things structurally (class, id, header label), never by absolute position.
//! - A missing single-value field is `None`, never an error.
//! - Only a missing anchor that makes the whole record meaningless is an error.
//! - Testable offline against fixtures in `tests/fixtures/`.
//!
//! ## Current specs
//! - `property`: parcel details page (owners table + six labelled spans).
pub mod property;

pub use property::{PropertyRecord, PropertySpec};
