//! The single authorization decision point.
//!
//! Every protected surface (dashboard, account mutation, navigation data)
//! calls [`authorize`]; nothing compares `role_id` inline anywhere else, so
//! what the UI hides and what the API enforces cannot drift apart.

use crate::auth::claims::SessionClaim;
use crate::auth::models::ROLE_AUTHOR;

/// Minimum role for the authoring dashboard and author-only surfaces.
pub const AUTHORING_MIN_ROLE: i32 = ROLE_AUTHOR;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenyReason {
    NotAuthenticated,
    InsufficientRole,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied(DenyReason),
}

/// Decide whether a claim clears a privilege threshold.
#[must_use]
pub fn authorize(claim: Option<&SessionClaim>, min_role: i32) -> Decision {
    match claim {
        None => Decision::Denied(DenyReason::NotAuthenticated),
        Some(claim) if claim.role_id < min_role => Decision::Denied(DenyReason::InsufficientRole),
        Some(_) => Decision::Allowed,
    }
}
