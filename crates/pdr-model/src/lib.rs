pub mod credential;
pub mod identity;
pub mod record;
pub mod rowmap;

pub use credential::CredentialParse;
pub use identity::{CanonicalId, CanonicalIdentity, IdentityCandidate};
pub use record::{RawRecord, RowId};
pub use rowmap::RowMap;
