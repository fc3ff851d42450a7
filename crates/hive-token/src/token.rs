//! Token issuance and verification.

use crate::claims::Claims;
use crate::error::TokenError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Issues signed RS512 tokens.
///
/// Constructed with `None` for the key on verification-only deployments, in
/// which case every `issue` call fails with [`TokenError::SigningKeyMissing`].
pub struct TokenIssuer {
    key: Option<EncodingKey>,
    issuer: String,
}

impl TokenIssuer {
    pub fn new(key: Option<EncodingKey>, issuer: impl Into<String>) -> Self {
        Self {
            key,
            issuer: issuer.into(),
        }
    }

    /// Whether this deployment holds issuance capability.
    pub fn can_issue(&self) -> bool {
        self.key.is_some()
    }

    /// Issue a signed token for the given subject with the given permission
    /// labels, valid for `ttl` from now.
    pub fn issue(
        &self,
        subject: &str,
        permissions: &[String],
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let key = self.key.as_ref().ok_or(TokenError::SigningKeyMissing)?;

        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            permissions: permissions.to_vec(),
            iss: self.issuer.clone(),
            iat: now.timestamp().max(0) as u64,
            exp: (now + ttl).timestamp().max(0) as u64,
        };

        encode(&Header::new(Algorithm::RS512), &claims, key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

/// Verifies RS512 tokens against a public key and a required issuer.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(key: DecodingKey, issuer: &str) -> Self {
        let mut validation = Validation::new(Algorithm::RS512);
        validation.set_issuer(&[issuer]);
        // No leeway: a token expires the moment its exp passes.
        validation.leeway = 0;
        Self { key, validation }
    }

    /// Verify a token and return its claims.
    ///
    /// Tokens signed with any algorithm other than RS512 are rejected as
    /// invalid, as are bad signatures and malformed tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        use jsonwebtoken::errors::ErrorKind;

        match decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => match err.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                ErrorKind::InvalidIssuer => Err(TokenError::WrongIssuer),
                _ => Err(TokenError::Invalid),
            },
        }
    }
}

/// Extract a bearer token from an `Authorization: Bearer <token>` header
/// value, falling back to a `token` query-string parameter.
///
/// The query parameter exists for contexts that cannot set headers (embedded
/// links). It is the weaker channel: the token can leak through access logs
/// and referrers, so callers should prefer the header wherever possible.
pub fn extract_token(authorization: Option<&str>, query: Option<&str>) -> Option<String> {
    if let Some(value) = authorization {
        if let Some(rest) = value.strip_prefix("Bearer ") {
            let rest = rest.trim();
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }
    }

    if let Some(query) = query {
        for pair in query.split('&') {
            if let Some(value) = pair.strip_prefix("token=") {
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{private_key_from_pem, public_key_from_pem};

    const TEST_PRIVATE_PEM: &str = include_str!("../testdata/jwt_test.pem");
    const TEST_PUBLIC_PEM: &str = include_str!("../testdata/jwt_test.pub.pem");
    const OTHER_PRIVATE_PEM: &str = include_str!("../testdata/jwt_other.pem");

    fn issuer() -> TokenIssuer {
        let key = private_key_from_pem(TEST_PRIVATE_PEM.as_bytes()).unwrap();
        TokenIssuer::new(Some(key), "hive-test")
    }

    fn verifier() -> TokenVerifier {
        let key = public_key_from_pem(TEST_PUBLIC_PEM.as_bytes()).unwrap();
        TokenVerifier::new(key, "hive-test")
    }

    #[test]
    fn roundtrip_preserves_subject_permissions_and_issuer() {
        let permissions = vec!["admin".to_string(), "super".to_string()];
        let token = issuer()
            .issue("admin-1", &permissions, Duration::days(30))
            .unwrap();

        let claims = verifier().verify(&token).unwrap();
        assert_eq!(claims.sub, "admin-1");
        assert_eq!(claims.permissions, permissions);
        assert_eq!(claims.iss, "hive-test");
    }

    #[test]
    fn tampered_signature_is_invalid() {
        let token = issuer()
            .issue("admin-1", &["admin".to_string()], Duration::days(1))
            .unwrap();

        // Flip one byte inside the signature segment.
        let mut bytes = token.into_bytes();
        let sig_start = bytes
            .iter()
            .rposition(|&b| b == b'.')
            .expect("jwt has three segments")
            + 1;
        bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(verifier().verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn zero_ttl_token_expires() {
        let token = issuer()
            .issue("admin-1", &[], Duration::zero())
            .unwrap();

        // exp has second granularity; step past it.
        std::thread::sleep(std::time::Duration::from_millis(1500));
        assert_eq!(verifier().verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn negative_ttl_token_is_already_expired() {
        let token = issuer()
            .issue("admin-1", &[], Duration::seconds(-60))
            .unwrap();
        assert_eq!(verifier().verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let token = issuer()
            .issue("admin-1", &[], Duration::days(1))
            .unwrap();

        let key = public_key_from_pem(TEST_PUBLIC_PEM.as_bytes()).unwrap();
        let other_verifier = TokenVerifier::new(key, "someone-else");
        assert_eq!(other_verifier.verify(&token), Err(TokenError::WrongIssuer));
    }

    #[test]
    fn token_signed_with_other_key_is_invalid() {
        let key = private_key_from_pem(OTHER_PRIVATE_PEM.as_bytes()).unwrap();
        let other_issuer = TokenIssuer::new(Some(key), "hive-test");
        let token = other_issuer
            .issue("admin-1", &[], Duration::days(1))
            .unwrap();

        assert_eq!(verifier().verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn hs256_token_is_rejected() {
        // Algorithm confusion: a symmetric token must never pass RS512
        // validation, whatever its payload says.
        let claims = Claims {
            sub: "admin-1".into(),
            permissions: vec!["super".into()],
            iss: "hive-test".into(),
            iat: Utc::now().timestamp() as u64,
            exp: (Utc::now() + Duration::days(1)).timestamp() as u64,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"guessable"),
        )
        .unwrap();

        assert_eq!(verifier().verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn issuance_without_private_key_is_a_configuration_error() {
        let issuer = TokenIssuer::new(None, "hive-test");
        assert!(!issuer.can_issue());
        assert_eq!(
            issuer.issue("admin-1", &[], Duration::days(1)),
            Err(TokenError::SigningKeyMissing)
        );
    }

    #[test]
    fn extracts_bearer_header_before_query_fallback() {
        assert_eq!(
            extract_token(Some("Bearer abc.def.ghi"), Some("token=zzz")),
            Some("abc.def.ghi".to_string())
        );
        assert_eq!(
            extract_token(None, Some("limit=10&token=abc.def.ghi")),
            Some("abc.def.ghi".to_string())
        );
        assert_eq!(extract_token(Some("Basic dXNlcg=="), None), None);
        assert_eq!(extract_token(Some("Bearer "), Some("token=")), None);
        assert_eq!(extract_token(None, None), None);
    }
}
