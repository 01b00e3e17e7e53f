//! Identity domain module.
//!
//! Caller identities come from an external `IdentityProvider`; the profile
//! core trusts them verbatim. `UserDirectory` resolves an owner id to the
//! minimal public user fields that are joined into profile reads.
//!
//! # Module Structure
//!
//! - `model`: `UserId`, `CallerIdentity`, `UserSummary`
//! - `provider`: `IdentityProvider` and `UserDirectory` traits

mod model;
mod provider;

// Re-export public API
pub use model::{CallerIdentity, UserId, UserSummary};
pub use provider::{IdentityProvider, UserDirectory};
