//! Static reference vocabularies for the provider-directory pipeline.
//!
//! Tables live in code rather than behind process-wide globals; the parser
//! receives a [`Vocabulary`] at construction time, and the disjointness of
//! the degree and credential acronym spaces is checked exactly once, when
//! the vocabulary is built.

pub mod credentials;
pub mod degrees;
pub mod error;
pub mod registry;
pub mod tables;

pub use degrees::{Degree, EducationLevel};
pub use error::{Result, VocabError};
pub use registry::Vocabulary;
