//! Session claims: the identity+privilege data a session carries.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::models::Identity;

/// The claim embedded in every issued session. The username is denormalized
/// here so request handling needs no per-request account lookup; it must be
/// re-synchronized via [`refresh`] whenever the username changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionClaim {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub username: String,
    pub role_id: i32,
}

/// Profile fields a live session may absorb without re-authentication.
/// `role_id` is absent on purpose: privilege changes require a fresh
/// authentication and re-issuance.
#[derive(Clone, Debug, Default)]
pub struct ClaimPatch {
    pub username: Option<String>,
}

/// Issue a claim from a freshly authenticated identity.
#[must_use]
pub fn issue(identity: &Identity) -> SessionClaim {
    SessionClaim {
        id: identity.id,
        username: identity.username.clone(),
        role_id: identity.role_id,
    }
}

/// Produce the updated claim after a profile mutation. The caller persists
/// the result into whatever carries the session.
#[must_use]
pub fn refresh(claim: &SessionClaim, patch: &ClaimPatch) -> SessionClaim {
    SessionClaim {
        id: claim.id,
        username: patch
            .username
            .clone()
            .unwrap_or_else(|| claim.username.clone()),
        role_id: claim.role_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::ROLE_AUTHOR;

    fn identity() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            username: "alice".to_string(),
            role_id: ROLE_AUTHOR,
        }
    }

    #[test]
    fn issue_copies_fields_verbatim() {
        let identity = identity();
        let claim = issue(&identity);
        assert_eq!(claim.id, identity.id);
        assert_eq!(claim.username, identity.username);
        assert_eq!(claim.role_id, identity.role_id);
    }

    #[test]
    fn refresh_rewrites_username_only() {
        let claim = issue(&identity());
        let updated = refresh(
            &claim,
            &ClaimPatch {
                username: Some("alicia".to_string()),
            },
        );
        assert_eq!(updated.id, claim.id);
        assert_eq!(updated.username, "alicia");
        assert_eq!(updated.role_id, claim.role_id);
    }

    #[test]
    fn refresh_with_empty_patch_is_identity() {
        let claim = issue(&identity());
        let same = refresh(&claim, &ClaimPatch::default());
        assert_eq!(same, claim);
    }

    #[test]
    fn claim_round_trips_through_json() {
        let claim = issue(&identity());
        let value = serde_json::to_value(&claim).expect("serialize");
        let decoded: SessionClaim = serde_json::from_value(value).expect("deserialize");
        assert_eq!(decoded, claim);
    }
}
