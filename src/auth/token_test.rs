use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use super::*;

fn jwt(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}

// =============================================================================
// cookie_value
// =============================================================================

#[test]
fn cookie_value_finds_named_cookie() {
    let header = "theme=dark; access_token=abc.def.ghi; locale=id-ID";
    assert_eq!(cookie_value(header, "access_token"), Some("abc.def.ghi"));
    assert_eq!(cookie_value(header, "locale"), Some("id-ID"));
}

#[test]
fn cookie_value_requires_exact_name() {
    assert_eq!(cookie_value("my_token=1; token=2", "token"), Some("2"));
    assert_eq!(cookie_value("my_token=1", "token"), None);
    assert_eq!(cookie_value("token=", "token"), None);
    assert_eq!(cookie_value("", "token"), None);
}

// =============================================================================
// decode_jwt
// =============================================================================

#[test]
fn decodes_access_token_claims() {
    let token = jwt(&serde_json::json!({ "userId": 7, "permissions": [1, 4], "iat": 100, "exp": 1000 }));
    let claims: AccessTokenPayload = decode_jwt(&token).unwrap();
    assert_eq!(claims.user_id, 7);
    assert_eq!(claims.permissions, vec![PermissionId(1), PermissionId(4)]);
    assert_eq!(claims.exp, 1000);
}

#[test]
fn decodes_refresh_token_claims() {
    let token = jwt(&serde_json::json!({ "userId": 7, "iat": 100, "exp": 5000 }));
    let claims: RefreshTokenPayload = decode_jwt(&token).unwrap();
    assert_eq!(claims, RefreshTokenPayload { user_id: 7, iat: 100, exp: 5000 });
}

#[test]
fn padded_payload_is_accepted() {
    let header = URL_SAFE_NO_PAD.encode(b"{}");
    let body = base64::engine::general_purpose::URL_SAFE.encode(br#"{"exp":1}"#);
    let token = format!("{header}.{body}.sig");
    let value: serde_json::Value = decode_jwt(&token).unwrap();
    assert_eq!(value["exp"], 1);
}

#[test]
fn malformed_tokens_are_rejected() {
    assert_eq!(decode_jwt::<serde_json::Value>("only.two"), Err(TokenError::Malformed));
    assert_eq!(decode_jwt::<serde_json::Value>("a.b.c.d"), Err(TokenError::Malformed));
    assert!(matches!(decode_jwt::<serde_json::Value>("a.!!!.c"), Err(TokenError::Encoding(_))));

    let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode(b"not json"));
    assert!(matches!(decode_jwt::<serde_json::Value>(&not_json), Err(TokenError::Payload(_))));
}

// =============================================================================
// is_token_expired
// =============================================================================

#[test]
fn expiry_uses_thirty_second_buffer() {
    let token = jwt(&serde_json::json!({ "exp": 1_000 }));
    assert!(!is_token_expired(&token, 900));
    assert!(!is_token_expired(&token, 970));
    assert!(is_token_expired(&token, 971));
    assert!(is_token_expired(&token, 2_000));
}

#[test]
fn expiry_check_saturates_near_clock_max() {
    let token = jwt(&serde_json::json!({ "exp": 1 }));
    assert!(is_token_expired(&token, u64::MAX));
    assert!(is_token_expired(&token, u64::MAX - 10));
}

#[test]
fn missing_exp_or_garbage_counts_as_expired() {
    assert!(is_token_expired(&jwt(&serde_json::json!({ "userId": 1 })), 0));
    assert!(is_token_expired("garbage", 0));
}
