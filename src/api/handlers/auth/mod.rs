//! Auth handlers and supporting modules.
//!
//! Signup, credential login, session probe/logout, and the session-claim
//! carrier (server-side session rows keyed by token hash). Principal
//! extraction for protected handlers lives in [`principal`].
//!
//! There is no rate limiting or lockout on repeated failed logins; the
//! uniform 401 and the fixed-cost verification path are the only protections
//! here. Operationally that gap belongs in front of this service.

pub(crate) mod login;
pub(crate) mod principal;
pub(crate) mod session;
pub(crate) mod signup;
mod state;
mod storage;
pub(crate) mod types;
mod utils;

pub use state::{AuthConfig, AuthState};
pub(crate) use storage::{delete_sessions_for_user, refresh_session_username};
