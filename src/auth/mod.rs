//! Credential authentication and role authorization core.
//!
//! Four components, composed bottom-up:
//!
//! - [`password`] derives and verifies one-way password hashes.
//! - [`authenticator`] turns email+password into an [`Identity`], or a
//!   uniform failure that does not reveal which part was wrong.
//! - [`claims`] issues the [`SessionClaim`] a session carries and refreshes
//!   it when profile fields change.
//! - [`gate`] is the one predicate every protected surface consults.
//!
//! Persistence is reached only through the [`UserStore`] trait. The core
//! holds no shared mutable state of its own; each call stands alone.

pub mod authenticator;
pub mod claims;
pub mod error;
pub mod gate;
pub mod models;
pub mod password;
pub mod store;

pub use authenticator::CredentialAuthenticator;
pub use claims::{issue, refresh, ClaimPatch, SessionClaim};
pub use error::AuthError;
pub use gate::{authorize, Decision, DenyReason, AUTHORING_MIN_ROLE};
pub use models::{role_name, Identity, Role, User, ROLE_ADMIN, ROLE_AUTHOR, ROLE_USER};
pub use store::{MemoryUserStore, NewUser, StoreError, UserPatch, UserStore};
