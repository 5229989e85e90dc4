//! Integration tests for the RS256 token codec.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use tempus_auth::jwt::{Claims, TokenDecoder, TokenEncoder};
use tempus_core::ErrorKind;
use tempus_core::config::auth::{AuthConfig, KeyMaterial};
use tempus_entity::principal::{Principal, SubjectRef};
use tempus_entity::token::TokenKind;
use tempus_entity::user::{Role, User};

const PRIVATE_PEM: &str = include_str!("fixtures/test_rsa_private.pem");
const PUBLIC_PEM: &str = include_str!("fixtures/test_rsa_public.pem");
const OTHER_PRIVATE_PEM: &str = include_str!("fixtures/other_rsa_private.pem");

fn test_config() -> AuthConfig {
    AuthConfig {
        private_key_path: "unused".into(),
        public_key_path: "unused".into(),
        access_ttl_minutes: 15,
        refresh_ttl_days: 7,
        password_min_length: 8,
    }
}

fn test_keys() -> KeyMaterial {
    KeyMaterial {
        private_pem: PRIVATE_PEM.to_string(),
        public_pem: PUBLIC_PEM.to_string(),
    }
}

fn codec() -> (TokenEncoder, TokenDecoder) {
    let keys = test_keys();
    let encoder = TokenEncoder::new(&test_config(), &keys).unwrap();
    let decoder = TokenDecoder::new(&keys).unwrap();
    (encoder, decoder)
}

fn test_user() -> Principal {
    Principal::User(User {
        id: 42,
        company_id: 7,
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        phone: None,
        password_hash: "unused".into(),
        role: Role::Manager,
        created_at: Utc::now(),
    })
}

#[test]
fn test_round_trip_with_extra_claims() {
    let (encoder, decoder) = codec();
    let mut extra = serde_json::Map::new();
    extra.insert("full_name".into(), serde_json::json!("Ada Lovelace"));

    let issued = encoder
        .issue(TokenKind::Access, &test_user(), extra)
        .unwrap();
    let claims = decoder.decode(&issued.token).unwrap();

    assert_eq!(claims.sub, "user:42");
    assert_eq!(claims.subject().unwrap(), SubjectRef::User(42));
    assert_eq!(claims.company_id, 7);
    assert_eq!(claims.role, Some(Role::Manager));
    assert_eq!(claims.kind, TokenKind::Access);
    assert_eq!(claims.jti, issued.jti);
    assert_eq!(claims.extra["full_name"], "Ada Lovelace");
    assert!(!claims.is_expired());
}

#[test]
fn test_each_issuance_gets_a_fresh_jti() {
    let (encoder, _) = codec();
    let principal = test_user();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..20 {
        let issued = encoder
            .issue(TokenKind::Refresh, &principal, serde_json::Map::new())
            .unwrap();
        assert!(seen.insert(issued.jti));
    }
}

#[test]
fn test_pair_shares_nothing_but_subject() {
    let (encoder, decoder) = codec();
    let (access, refresh) = encoder
        .issue_pair(&test_user(), serde_json::Map::new())
        .unwrap();

    assert_eq!(access.kind, TokenKind::Access);
    assert_eq!(refresh.kind, TokenKind::Refresh);
    assert_ne!(access.jti, refresh.jti);
    assert!(refresh.expires_at > access.expires_at);

    let a = decoder.decode(&access.token).unwrap();
    let r = decoder.decode(&refresh.token).unwrap();
    assert_eq!(a.sub, r.sub);
}

#[test]
fn test_expired_token_reports_expired() {
    let (_, decoder) = codec();
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "user:42".into(),
        company_id: 7,
        role: None,
        iat: now - 7200,
        exp: now - 3600,
        jti: Uuid::new_v4(),
        kind: TokenKind::Access,
        extra: serde_json::Map::new(),
    };
    let key = EncodingKey::from_rsa_pem(PRIVATE_PEM.as_bytes()).unwrap();
    let token = encode(&Header::new(Algorithm::RS256), &claims, &key).unwrap();

    let err = decoder.decode(&token).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Expired);
}

#[test]
fn test_foreign_key_reports_bad_signature() {
    let (_, decoder) = codec();
    let foreign_config = test_config();
    let foreign_keys = KeyMaterial {
        private_pem: OTHER_PRIVATE_PEM.to_string(),
        public_pem: PUBLIC_PEM.to_string(),
    };
    let foreign_encoder = TokenEncoder::new(&foreign_config, &foreign_keys).unwrap();

    let issued = foreign_encoder
        .issue(TokenKind::Access, &test_user(), serde_json::Map::new())
        .unwrap();
    let err = decoder.decode(&issued.token).unwrap_err();
    assert_eq!(err.kind, ErrorKind::BadSignature);
}

#[test]
fn test_garbage_reports_malformed() {
    let (_, decoder) = codec();
    for garbage in ["", "not.a.jwt", "aaaa.bbbb.cccc"] {
        let err = decoder.decode(garbage).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Malformed, "input: {garbage:?}");
    }
}

#[test]
fn test_kind_mismatch_reports_malformed() {
    let (encoder, decoder) = codec();
    let access = encoder
        .issue(TokenKind::Access, &test_user(), serde_json::Map::new())
        .unwrap();

    let err = decoder
        .decode_kind(&access.token, TokenKind::Refresh)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Malformed);

    // The right kind still decodes.
    assert!(decoder.decode_kind(&access.token, TokenKind::Access).is_ok());
}
