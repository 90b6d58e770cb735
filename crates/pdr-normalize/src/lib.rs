//! Normalization of the free-text signals the resolver matches on: license
//! numbers, credential strings, and person names.

pub mod credential;
pub mod license;
pub mod names;

pub use credential::{CredentialParser, required_degree_violations};
pub use license::{NormalizedLicense, normalize};
pub use names::normalize_name;
