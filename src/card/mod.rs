//! Card model
//!
//! Typed card attributes, ingestion of identifier output, and validation

mod ingest;
mod types;
mod validate;

pub use ingest::RawCardAttributes;
pub use types::{Autograph, CardAttributes, GradeCompany, Sport};
pub use validate::{ValidationError, MIN_YEAR};
