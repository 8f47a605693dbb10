//! End-to-end exercise of the auth core over the in-memory store:
//! registration, login, claim issuance, gate checks, profile rename, and
//! account deletion.

use std::sync::Arc;

use secrecy::SecretString;

use kleidi::auth::{
    authorize, issue, password, refresh, AuthError, ClaimPatch, CredentialAuthenticator, Decision,
    DenyReason, MemoryUserStore, NewUser, UserPatch, UserStore, AUTHORING_MIN_ROLE, ROLE_USER,
};

async fn register(store: &MemoryUserStore, email: &str, username: &str, plaintext: &str) {
    let hash = password::hash(plaintext).expect("hash");
    store
        .create(NewUser {
            email: email.to_string(),
            username: username.to_string(),
            password_hash: Some(hash),
            role_id: None,
        })
        .await
        .expect("create");
}

#[tokio::test]
async fn fresh_account_authenticates_but_cannot_author() {
    let store = Arc::new(MemoryUserStore::new());
    register(&store, "alice@x.com", "alice", "abc12").await;

    let authenticator = CredentialAuthenticator::new(store.clone());
    let identity = authenticator
        .authenticate("alice@x.com", &SecretString::from("abc12".to_string()))
        .await
        .expect("authenticate");

    assert_eq!(identity.role_id, ROLE_USER);

    let claim = issue(&identity);
    assert_eq!(
        authorize(Some(&claim), AUTHORING_MIN_ROLE),
        Decision::Denied(DenyReason::InsufficientRole)
    );
    assert_eq!(authorize(Some(&claim), ROLE_USER), Decision::Allowed);
    assert_eq!(
        authorize(None, ROLE_USER),
        Decision::Denied(DenyReason::NotAuthenticated)
    );
}

#[tokio::test]
async fn rename_refreshes_the_claim_but_not_the_role() {
    let store = Arc::new(MemoryUserStore::new());
    register(&store, "alice@x.com", "alice", "abc12").await;

    let authenticator = CredentialAuthenticator::new(store.clone());
    let identity = authenticator
        .authenticate("alice@x.com", &SecretString::from("abc12".to_string()))
        .await
        .expect("authenticate");
    let claim = issue(&identity);

    let updated = store
        .update(
            identity.id,
            UserPatch {
                username: Some("alicia".to_string()),
            },
        )
        .await
        .expect("update");

    let refreshed = refresh(
        &claim,
        &ClaimPatch {
            username: Some(updated.username),
        },
    );

    assert_eq!(refreshed.id, claim.id);
    assert_eq!(refreshed.username, "alicia");
    assert_eq!(refreshed.role_id, claim.role_id);
}

#[tokio::test]
async fn role_changes_only_apply_on_reauthentication() {
    let store = Arc::new(MemoryUserStore::new());
    register(&store, "alice@x.com", "alice", "abc12").await;

    let authenticator = CredentialAuthenticator::new(store.clone());
    let identity = authenticator
        .authenticate("alice@x.com", &SecretString::from("abc12".to_string()))
        .await
        .expect("authenticate");
    let old_claim = issue(&identity);

    // Administrative promotion happens outside this core; simulate it by
    // rebuilding the stored row with a higher role.
    let user = store
        .find_by_id(identity.id)
        .await
        .expect("lookup")
        .expect("present");
    store.delete(user.id).await.expect("delete");
    store
        .create(NewUser {
            email: user.email.clone(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            role_id: Some(AUTHORING_MIN_ROLE),
        })
        .await
        .expect("recreate");

    // The already-issued claim keeps its old privilege level.
    assert_eq!(
        authorize(Some(&old_claim), AUTHORING_MIN_ROLE),
        Decision::Denied(DenyReason::InsufficientRole)
    );

    // A fresh authentication picks the new role up.
    let identity = authenticator
        .authenticate("alice@x.com", &SecretString::from("abc12".to_string()))
        .await
        .expect("authenticate");
    let new_claim = issue(&identity);
    assert_eq!(
        authorize(Some(&new_claim), AUTHORING_MIN_ROLE),
        Decision::Allowed
    );
}

#[tokio::test]
async fn deletion_ends_authentication_for_the_account() {
    let store = Arc::new(MemoryUserStore::new());
    register(&store, "alice@x.com", "alice", "abc12").await;

    let authenticator = CredentialAuthenticator::new(store.clone());
    let identity = authenticator
        .authenticate("alice@x.com", &SecretString::from("abc12".to_string()))
        .await
        .expect("authenticate");

    // The deletion flow verifies the password before removing the account.
    let user = store
        .find_by_id(identity.id)
        .await
        .expect("lookup")
        .expect("present");
    let stored_hash = user.password_hash.expect("credential");
    assert!(password::verify("abc12", &stored_hash));

    store.delete(identity.id).await.expect("delete");

    let gone = store.find_by_email("alice@x.com").await.expect("lookup");
    assert!(gone.is_none());

    // The carrier can no longer resolve the old claim to an account, so the
    // next check sees an anonymous caller.
    let resolved = store.find_by_id(identity.id).await.expect("lookup");
    let carried_claim = resolved
        .as_ref()
        .map(|user| issue(&kleidi::auth::Identity::from(user)));
    assert_eq!(
        authorize(carried_claim.as_ref(), ROLE_USER),
        Decision::Denied(DenyReason::NotAuthenticated)
    );

    // And re-authentication fails like any unknown account.
    let outcome = authenticator
        .authenticate("alice@x.com", &SecretString::from("abc12".to_string()))
        .await
        .expect_err("must fail");
    assert!(matches!(outcome, AuthError::Unauthenticated));
}
