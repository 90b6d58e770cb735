//! Intra-batch identity resolution: collapse raw directory rows into
//! canonical identities, assign stable ids, and persist the row→canonical
//! map for downstream stages.

pub mod registry;
pub mod report;
pub mod repository;
pub mod resolver;

pub use registry::assign;
pub use report::{ResolutionReport, SkipReason, SkippedRow};
pub use repository::{JsonFileStore, RowMapStore, StoredBatch};
pub use resolver::{ResolveConfig, Resolver, ZipLookup, is_same_person, split_addresses};
