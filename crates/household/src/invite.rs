use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use models::{InviteValidation, Role};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{HouseholdError, Result};

pub const DEFAULT_VALIDITY_DAYS: i64 = 7;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize)]
struct InvitePayload {
    household_id: String,
    role: Role,
    issued_at: i64, // epoch millis
    nonce: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssuedInvite {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and checks household invitation tokens.
///
/// A token is `base64url(json payload) "." base64url(hmac-sha256(payload))`.
/// Tokens that fail to decode, parse or verify are reported as invalid,
/// never as errors.
#[derive(Clone)]
pub struct InviteService {
    mac: HmacSha256,
    validity: Duration,
}

impl std::fmt::Debug for InviteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InviteService")
            .field("validity", &self.validity)
            .finish_non_exhaustive()
    }
}

impl InviteService {
    pub fn new(secret: impl AsRef<[u8]>, validity_days: i64) -> Result<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(HouseholdError::InvalidInput("invite secret must not be empty".to_string()));
        }
        if validity_days <= 0 {
            return Err(HouseholdError::InvalidInput(format!(
                "invite validity must be at least one day, got {}",
                validity_days
            )));
        }
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| HouseholdError::InvalidInput(format!("invalid invite secret: {}", e)))?;

        Ok(Self {
            mac,
            validity: Duration::days(validity_days),
        })
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    pub fn generate(&self, household_id: &str, role: Role) -> Result<IssuedInvite> {
        self.generate_at(household_id, role, Utc::now())
    }

    pub fn generate_at(&self, household_id: &str, role: Role, issued_at: DateTime<Utc>) -> Result<IssuedInvite> {
        if household_id.trim().is_empty() {
            return Err(HouseholdError::InvalidInput("household id must not be empty".to_string()));
        }
        if role == Role::Owner {
            return Err(HouseholdError::InvalidInput("owner role cannot be granted by invitation".to_string()));
        }

        let payload = InvitePayload {
            household_id: household_id.to_string(),
            role,
            issued_at: issued_at.timestamp_millis(),
            nonce: uuid::Uuid::new_v4().simple().to_string(),
        };
        let json = serde_json::to_vec(&payload)
            .map_err(|e| HouseholdError::InvalidInput(format!("cannot encode invite: {}", e)))?;
        let body = URL_SAFE_NO_PAD.encode(json);
        let signature = URL_SAFE_NO_PAD.encode(self.sign(&body));

        tracing::debug!(household_id, role = %role, "invite token issued");
        Ok(IssuedInvite {
            token: format!("{}.{}", body, signature),
            expires_at: issued_at + self.validity,
        })
    }

    pub fn validate(&self, token: &str) -> InviteValidation {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> InviteValidation {
        let Some(payload) = self.decode(token) else {
            tracing::warn!("rejected malformed or forged invite token");
            return InviteValidation::default();
        };

        let elapsed = now.timestamp_millis() - payload.issued_at;
        if elapsed < 0 {
            tracing::warn!(household_id = %payload.household_id, "rejected invite token issued in the future");
            return InviteValidation::default();
        }
        if elapsed > self.validity.num_milliseconds() {
            return InviteValidation {
                expired: true,
                ..InviteValidation::default()
            };
        }

        InviteValidation {
            valid: true,
            household_id: Some(payload.household_id),
            role: Some(payload.role),
            expired: false,
        }
    }

    fn decode(&self, token: &str) -> Option<InvitePayload> {
        let (body, signature) = token.trim().split_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(body.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let json = URL_SAFE_NO_PAD.decode(body).ok()?;
        serde_json::from_slice(&json).ok()
    }

    fn sign(&self, body: &str) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(body.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> InviteService {
        InviteService::new("test-secret", DEFAULT_VALIDITY_DAYS).unwrap()
    }

    #[test]
    fn test_fresh_token_is_valid() {
        let svc = service();
        let issued = svc.generate("house-42", Role::Member).unwrap();
        let result = svc.validate(&issued.token);

        assert!(result.valid);
        assert!(!result.expired);
        assert_eq!(result.household_id.as_deref(), Some("house-42"));
        assert_eq!(result.role, Some(Role::Member));
    }

    #[test]
    fn test_expires_after_seven_days() {
        let svc = service();
        let now = Utc::now();
        let issued = svc.generate_at("house-42", Role::Child, now - Duration::days(8)).unwrap();

        let result = svc.validate_at(&issued.token, now);
        assert_eq!(
            result,
            InviteValidation {
                valid: false,
                household_id: None,
                role: None,
                expired: true,
            }
        );
    }

    #[test]
    fn test_still_valid_at_the_window_edge() {
        let svc = service();
        let now = Utc::now();
        let issued = svc.generate_at("house-42", Role::Viewer, now - Duration::days(7)).unwrap();
        assert!(svc.validate_at(&issued.token, now).valid);
        assert_eq!(issued.expires_at, now);
    }

    #[test]
    fn test_corrupted_tokens_are_invalid() {
        let svc = service();
        let issued = svc.generate("house-42", Role::Admin).unwrap();

        for token in [
            String::new(),
            "not-a-token".to_string(),
            "%%%.%%%".to_string(),
            issued.token[..issued.token.len() / 2].to_string(),
            format!("x{}", issued.token),
        ] {
            let result = svc.validate(&token);
            assert!(!result.valid, "accepted {:?}", token);
            assert!(!result.expired);
        }
    }

    #[test]
    fn test_forged_tokens_are_invalid() {
        let svc = service();
        let other = InviteService::new("someone-else", DEFAULT_VALIDITY_DAYS).unwrap();
        let forged = other.generate("house-42", Role::Admin).unwrap();
        assert!(!svc.validate(&forged.token).valid);

        // well-formed payload with an upgraded role but the original signature
        let issued = svc.generate("house-42", Role::Child).unwrap();
        let (_, signature) = issued.token.split_once('.').unwrap();
        let payload = InvitePayload {
            household_id: "house-42".to_string(),
            role: Role::Admin,
            issued_at: Utc::now().timestamp_millis(),
            nonce: "n".to_string(),
        };
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
        assert!(!svc.validate(&format!("{}.{}", body, signature)).valid);
    }

    #[test]
    fn test_future_tokens_are_invalid() {
        let svc = service();
        let now = Utc::now();
        let issued = svc.generate_at("house-42", Role::Member, now + Duration::hours(1)).unwrap();
        assert!(!svc.validate_at(&issued.token, now).valid);
    }

    #[test]
    fn test_nonce_makes_tokens_unique() {
        let svc = service();
        let now = Utc::now();
        let a = svc.generate_at("house-42", Role::Member, now).unwrap();
        let b = svc.generate_at("house-42", Role::Member, now).unwrap();
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn test_generate_rejects_owner_and_empty_household() {
        let svc = service();
        assert!(svc.generate("house-42", Role::Owner).is_err());
        assert!(svc.generate("  ", Role::Member).is_err());
    }

    #[test]
    fn test_new_rejects_bad_configuration() {
        assert!(InviteService::new("", 7).is_err());
        assert!(InviteService::new("secret", 0).is_err());
    }
}
