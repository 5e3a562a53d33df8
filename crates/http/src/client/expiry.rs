//! Unverified access-token expiry check
//!
//! The client never validates signatures (that is the backend's job); it
//! only needs to know whether the access token is worth presenting. Any
//! token it cannot decode is treated as expired.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

#[derive(Deserialize)]
struct ExpiryClaims {
    exp: i64,
}

/// Whether the token's `exp` claim is in the past
///
/// Decodes the middle segment of a three-part token as base64url JSON and
/// compares `exp` (seconds since epoch) against the current time. Malformed
/// tokens are reported expired, never usable.
pub fn is_expired(token: &str) -> bool {
    match decode_exp(token) {
        Some(exp) => chrono::Utc::now().timestamp_millis() >= exp * 1000,
        None => true,
    }
}

fn decode_exp(token: &str) -> Option<i64> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if segments.next().is_none() => payload,
        _ => return None,
    };

    let decoded = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: ExpiryClaims = serde_json::from_slice(&decoded).ok()?;
    Some(claims.exp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn token_with_payload(payload: &str) -> String {
        let encode = |s: &str| URL_SAFE_NO_PAD.encode(s.as_bytes());
        format!(
            "{}.{}.{}",
            encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            encode(payload),
            encode("signature")
        )
    }

    fn token_with_exp(exp: i64) -> String {
        token_with_payload(&format!(r#"{{"exp":{exp}}}"#))
    }

    #[test]
    fn test_future_exp_is_not_expired() {
        let exp = chrono::Utc::now().timestamp() + 3600;
        assert!(!is_expired(&token_with_exp(exp)));
    }

    #[test]
    fn test_past_exp_is_expired() {
        let exp = chrono::Utc::now().timestamp() - 3600;
        assert!(is_expired(&token_with_exp(exp)));
    }

    #[test]
    fn test_malformed_tokens_are_expired() {
        assert!(is_expired(""));
        assert!(is_expired("not-a-token"));
        assert!(is_expired("only.two"));
        assert!(is_expired("one.two.three.four"));
        assert!(is_expired("a.!!!not-base64!!!.c"));
    }

    #[test]
    fn test_non_json_payload_is_expired() {
        let encode = |s: &str| URL_SAFE_NO_PAD.encode(s.as_bytes());
        let token = format!("{}.{}.{}", encode("h"), encode("plain text"), encode("s"));
        assert!(is_expired(&token));
    }

    #[test]
    fn test_missing_exp_is_expired() {
        assert!(is_expired(&token_with_payload(r#"{"sub":"alice"}"#)));
    }
}
