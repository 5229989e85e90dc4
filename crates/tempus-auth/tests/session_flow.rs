//! Integration tests for the session flows, running against the
//! in-memory ledger and directory.

use std::sync::Arc;

use chrono::Utc;

use tempus_auth::directory::MemoryPrincipalDirectory;
use tempus_auth::jwt::{TokenDecoder, TokenEncoder};
use tempus_auth::ledger::{MemoryTokenLedger, TokenLedger};
use tempus_auth::password::PasswordHasher;
use tempus_auth::session::SessionManager;
use tempus_core::ErrorKind;
use tempus_core::config::auth::{AuthConfig, KeyMaterial};
use tempus_entity::company::Company;
use tempus_entity::principal::{Principal, SubjectRef};
use tempus_entity::token::TokenKind;
use tempus_entity::user::{Role, User};

const PRIVATE_PEM: &str = include_str!("fixtures/test_rsa_private.pem");
const PUBLIC_PEM: &str = include_str!("fixtures/test_rsa_public.pem");

const USER_PASSWORD: &str = "correct horse battery";
const COMPANY_PASSWORD: &str = "tenant-passw0rd";

struct Harness {
    manager: SessionManager,
    ledger: Arc<MemoryTokenLedger>,
    directory: Arc<MemoryPrincipalDirectory>,
    decoder: Arc<TokenDecoder>,
}

async fn harness() -> Harness {
    let config = AuthConfig {
        private_key_path: "unused".into(),
        public_key_path: "unused".into(),
        access_ttl_minutes: 15,
        refresh_ttl_days: 7,
        password_min_length: 8,
    };
    let keys = KeyMaterial {
        private_pem: PRIVATE_PEM.to_string(),
        public_pem: PUBLIC_PEM.to_string(),
    };
    let encoder = Arc::new(TokenEncoder::new(&config, &keys).unwrap());
    let decoder = Arc::new(TokenDecoder::new(&keys).unwrap());
    let ledger = Arc::new(MemoryTokenLedger::new());
    let directory = Arc::new(MemoryPrincipalDirectory::new());

    let hasher = PasswordHasher::new();
    directory
        .insert(Principal::User(User {
            id: 1,
            company_id: 10,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@example.com".into(),
            phone: None,
            password_hash: hasher.hash_password(USER_PASSWORD).unwrap(),
            role: Role::Admin,
            created_at: Utc::now(),
        }))
        .await;
    directory
        .insert(Principal::Company(Company {
            id: 10,
            name: "Example Corp".into(),
            industry: None,
            email_domain: "example.com".into(),
            contact_email: "admin@example.com".into(),
            contact_number: None,
            address: None,
            password_hash: Some(hasher.hash_password(COMPANY_PASSWORD).unwrap()),
            created_at: Utc::now(),
        }))
        .await;

    let manager = SessionManager::new(
        &config,
        encoder,
        decoder.clone(),
        ledger.clone(),
        directory.clone(),
    );

    Harness {
        manager,
        ledger,
        directory,
        decoder,
    }
}

#[tokio::test]
async fn test_login_records_a_live_token_pair() {
    let h = harness().await;
    let session = h
        .manager
        .login("grace@example.com", USER_PASSWORD)
        .await
        .unwrap();

    assert_eq!(session.access.kind, TokenKind::Access);
    assert_eq!(session.refresh.kind, TokenKind::Refresh);
    assert!(!h.ledger.is_revoked(session.access.jti).await.unwrap());
    assert!(!h.ledger.is_revoked(session.refresh.jti).await.unwrap());
    assert_eq!(h.ledger.active_count_for("user:1").await, 2);

    let claims = h.decoder.decode(&session.access.token).unwrap();
    assert_eq!(claims.sub, "user:1");
    assert_eq!(claims.company_id, 10);
    assert_eq!(claims.role, Some(Role::Admin));
}

#[tokio::test]
async fn test_company_login_by_contact_email() {
    let h = harness().await;
    let session = h
        .manager
        .login("admin@example.com", COMPANY_PASSWORD)
        .await
        .unwrap();

    let claims = h.decoder.decode(&session.access.token).unwrap();
    assert_eq!(claims.subject().unwrap(), SubjectRef::Company(10));
    assert_eq!(claims.role, None);
}

#[tokio::test]
async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
    let h = harness().await;

    let unknown = h
        .manager
        .login("nobody@example.com", USER_PASSWORD)
        .await
        .unwrap_err();
    let wrong = h
        .manager
        .login("grace@example.com", "wrong password")
        .await
        .unwrap_err();

    assert_eq!(unknown.kind, ErrorKind::InvalidCredentials);
    assert_eq!(wrong.kind, unknown.kind);
    assert_eq!(wrong.message, unknown.message);
    // Nothing reaches the ledger on a failed login.
    assert_eq!(h.ledger.active_count_for("user:1").await, 0);
}

#[tokio::test]
async fn test_logout_revokes_and_is_idempotent() {
    let h = harness().await;
    let session = h
        .manager
        .login("grace@example.com", USER_PASSWORD)
        .await
        .unwrap();

    let claims = h.decoder.decode(&session.access.token).unwrap();
    h.manager.logout(&claims).await.unwrap();
    assert!(h.ledger.is_revoked(claims.jti).await.unwrap());

    // A second logout with the same token is still a success.
    h.manager.logout(&claims).await.unwrap();

    // The refresh token is untouched.
    assert!(!h.ledger.is_revoked(session.refresh.jti).await.unwrap());
}

#[tokio::test]
async fn test_refresh_mints_and_records_a_new_access_token() {
    let h = harness().await;
    let session = h
        .manager
        .login("grace@example.com", USER_PASSWORD)
        .await
        .unwrap();

    let access = h.manager.refresh(&session.refresh.token).await.unwrap();
    assert_eq!(access.kind, TokenKind::Access);
    assert_ne!(access.jti, session.access.jti);
    assert!(!h.ledger.is_revoked(access.jti).await.unwrap());
    assert_eq!(h.ledger.kind_of(access.jti).await, Some(TokenKind::Access));
    assert_eq!(h.ledger.active_count_for("user:1").await, 3);
}

#[tokio::test]
async fn test_refresh_rejects_access_tokens_without_ledger_writes() {
    let h = harness().await;
    let session = h
        .manager
        .login("grace@example.com", USER_PASSWORD)
        .await
        .unwrap();

    let err = h.manager.refresh(&session.access.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Malformed);
    assert_eq!(h.ledger.active_count_for("user:1").await, 2);
}

#[tokio::test]
async fn test_refresh_rejects_revoked_refresh_tokens() {
    let h = harness().await;
    let session = h
        .manager
        .login("grace@example.com", USER_PASSWORD)
        .await
        .unwrap();

    h.ledger.revoke(session.refresh.jti).await.unwrap();
    let err = h.manager.refresh(&session.refresh.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Revoked);
}

#[tokio::test]
async fn test_change_password_rotates_the_credential() {
    let h = harness().await;
    h.manager
        .change_password(SubjectRef::User(1), USER_PASSWORD, "brand new passphrase")
        .await
        .unwrap();

    // Old password no longer works, new one does.
    let err = h
        .manager
        .login("grace@example.com", USER_PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCredentials);
    h.manager
        .login("grace@example.com", "brand new passphrase")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_change_password_validations() {
    let h = harness().await;

    let too_short = h
        .manager
        .change_password(SubjectRef::User(1), USER_PASSWORD, "short")
        .await
        .unwrap_err();
    assert_eq!(too_short.kind, ErrorKind::Validation);

    let unchanged = h
        .manager
        .change_password(SubjectRef::User(1), USER_PASSWORD, USER_PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(unchanged.kind, ErrorKind::Validation);

    let wrong_current = h
        .manager
        .change_password(SubjectRef::User(1), "not the password", "a fine new password")
        .await
        .unwrap_err();
    assert_eq!(wrong_current.kind, ErrorKind::InvalidCredentials);

    let missing = h
        .manager
        .change_password(SubjectRef::User(99), USER_PASSWORD, "a fine new password")
        .await
        .unwrap_err();
    assert_eq!(missing.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_change_password_leaves_existing_sessions_alive() {
    let h = harness().await;
    let session = h
        .manager
        .login("grace@example.com", USER_PASSWORD)
        .await
        .unwrap();

    h.manager
        .change_password(SubjectRef::User(1), USER_PASSWORD, "brand new passphrase")
        .await
        .unwrap();

    assert!(!h.ledger.is_revoked(session.access.jti).await.unwrap());
    assert!(h.manager.refresh(&session.refresh.token).await.is_ok());
}

#[tokio::test]
async fn test_revoke_all_sweeps_only_the_subject() {
    let h = harness().await;
    h.manager
        .login("grace@example.com", USER_PASSWORD)
        .await
        .unwrap();
    h.manager
        .login("grace@example.com", USER_PASSWORD)
        .await
        .unwrap();
    let company_session = h
        .manager
        .login("admin@example.com", COMPANY_PASSWORD)
        .await
        .unwrap();

    let swept = h
        .manager
        .revoke_all_for(SubjectRef::User(1))
        .await
        .unwrap();
    assert_eq!(swept, 4);
    assert_eq!(h.ledger.active_count_for("user:1").await, 0);
    assert!(
        !h.ledger
            .is_revoked(company_session.access.jti)
            .await
            .unwrap()
    );

    // Second sweep finds nothing left.
    assert_eq!(
        h.manager
            .revoke_all_for(SubjectRef::User(1))
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_refresh_fails_when_the_subject_is_gone() {
    let h = harness().await;
    let session = h
        .manager
        .login("grace@example.com", USER_PASSWORD)
        .await
        .unwrap();

    // Fresh directory without the user, same ledger and keys.
    let config = AuthConfig {
        private_key_path: "unused".into(),
        public_key_path: "unused".into(),
        access_ttl_minutes: 15,
        refresh_ttl_days: 7,
        password_min_length: 8,
    };
    let keys = KeyMaterial {
        private_pem: PRIVATE_PEM.to_string(),
        public_pem: PUBLIC_PEM.to_string(),
    };
    let manager = SessionManager::new(
        &config,
        Arc::new(TokenEncoder::new(&config, &keys).unwrap()),
        Arc::new(TokenDecoder::new(&keys).unwrap()),
        h.ledger.clone(),
        Arc::new(MemoryPrincipalDirectory::new()),
    );

    let err = manager.refresh(&session.refresh.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    let _ = h.directory;
}
