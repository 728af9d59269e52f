use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("auth token secret is too short (min {MIN_SECRET_LEN} bytes)")]
    SecretTooShort,

    #[error("invalid auth token format")]
    InvalidFormat,

    #[error("auth token signature is invalid")]
    InvalidSignature,

    #[error("auth token is expired")]
    Expired,

    #[error("failed to decode auth token payload")]
    PayloadDecode,

    #[error("failed to parse auth token payload")]
    PayloadParse,
}

/// Who a bearer token speaks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Faculty,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Student or teacher id, depending on `role`.
    pub subject: Uuid,
    pub role: Role,
    pub full_name: String,
    pub issued_at_ms: u64,
    pub expires_at_ms: u64,
}

impl Claims {
    pub fn is_expired(&self, reference_ms: u64) -> bool {
        reference_ms >= self.expires_at_ms
    }
}

/// Issues and verifies HMAC-SHA256 signed bearer tokens.
///
/// Token format: `base64url(claims_json) . base64url(signature)`. Tokens are
/// stateless; expiry is the only revocation mechanism.
#[derive(Clone)]
pub struct TokenService {
    secret: Arc<[u8]>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: Vec<u8>, ttl: Duration) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::SecretTooShort);
        }

        Ok(Self {
            secret: Arc::<[u8]>::from(secret),
            ttl,
        })
    }

    pub fn issue(
        &self,
        subject: Uuid,
        role: Role,
        full_name: &str,
        issued_at_ms: u64,
    ) -> Result<String, TokenError> {
        let expires_at_ms = issued_at_ms.saturating_add(self.ttl.as_millis() as u64);
        let claims = Claims {
            subject,
            role,
            full_name: full_name.to_string(),
            issued_at_ms,
            expires_at_ms,
        };

        let payload = serde_json::to_vec(&claims).map_err(|_| TokenError::PayloadParse)?;
        let payload_b64 = URL_SAFE_NO_PAD.encode(payload);
        let signature = self.sign(payload_b64.as_bytes())?;
        let signature_b64 = URL_SAFE_NO_PAD.encode(signature);
        Ok(format!("{payload_b64}.{signature_b64}"))
    }

    pub fn verify(&self, token: &str, reference_ms: u64) -> Result<Claims, TokenError> {
        let (payload_b64, signature_b64) =
            token.split_once('.').ok_or(TokenError::InvalidFormat)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::InvalidFormat)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| TokenError::InvalidSignature)?;
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::PayloadDecode)?;

        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::PayloadParse)?;

        if claims.is_expired(reference_ms) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, bytes: &[u8]) -> Result<Vec<u8>, TokenError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| TokenError::InvalidSignature)?;
        mac.update(bytes);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> TokenService {
        TokenService::new(
            b"01234567890123456789012345678901".to_vec(),
            Duration::from_secs(30),
        )
        .expect("valid service")
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let service = test_service();
        let id = Uuid::new_v4();
        let token = service
            .issue(id, Role::Student, "Asha Rao", 1_000)
            .expect("issue token");

        let claims = service.verify(&token, 1_500).expect("verify token");
        assert_eq!(claims.subject, id);
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.full_name, "Asha Rao");
    }

    #[test]
    fn rejects_tampered_token() {
        let service = test_service();
        let token = service
            .issue(Uuid::new_v4(), Role::Faculty, "P. Iyer", 10)
            .expect("issue token");
        let (payload, signature) = token.split_once('.').expect("token split");
        let mut chars: Vec<char> = payload.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let tampered_payload: String = chars.into_iter().collect();
        let tampered = format!("{tampered_payload}.{signature}");

        assert!(matches!(
            service.verify(&tampered, 20),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let service = test_service();
        let token = service
            .issue(Uuid::new_v4(), Role::Student, "Asha Rao", 1_000)
            .expect("issue token");

        assert!(matches!(
            service.verify(&token, 35_000),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn rejects_garbage() {
        let service = test_service();
        assert!(matches!(
            service.verify("not-a-token", 0),
            Err(TokenError::InvalidFormat)
        ));
    }

    #[test]
    fn rejects_short_secret() {
        assert!(matches!(
            TokenService::new(b"short".to_vec(), Duration::from_secs(1)),
            Err(TokenError::SecretTooShort)
        ));
    }
}
