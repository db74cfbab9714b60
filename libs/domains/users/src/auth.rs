//! Token issuing and verification, password hashing, role checks.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use core_config::JwtConfig;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::entity::UserRole;
use crate::error::{UserError, UserResult};

/// JWT claims: subject is the user's email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// The verified caller of a request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_name: String,
    pub role: UserRole,
}

/// HS256 token service.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_secs: config.ttl_secs,
        }
    }

    /// Issue a token for an authenticated user.
    pub fn create_token(&self, user_name: &str, role: UserRole) -> UserResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_name.to_string(),
            role,
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| UserError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify signature and expiry; any failure reads as unauthenticated.
    pub fn decode_token(&self, token: &str) -> UserResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| UserError::Unauthenticated)
    }
}

/// Check that the caller holds the required role.
pub fn require_role(user: &AuthenticatedUser, role: UserRole) -> UserResult<()> {
    if user.role == role {
        Ok(())
    } else {
        Err(UserError::Forbidden)
    }
}

/// Hash a raw password into PHC string format.
pub fn hash_password(raw: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a raw password against a stored PHC hash.
///
/// An unparsable hash counts as a mismatch rather than an error; stored
/// hashes are produced by [`hash_password`] so this only happens on
/// corrupt data.
pub fn verify_password(raw: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig {
            secret: "test-secret".to_string(),
            ttl_secs: 1800,
        })
    }

    #[test]
    fn test_token_round_trip() {
        let auth = jwt();
        let token = auth
            .create_token("kittu@example.com", UserRole::Admin)
            .unwrap();

        let claims = auth.decode_token(&token).unwrap();
        assert_eq!(claims.sub, "kittu@example.com");
        assert_eq!(claims.role, UserRole::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_with_wrong_secret_is_rejected() {
        let token = jwt()
            .create_token("kittu@example.com", UserRole::Customer)
            .unwrap();

        let other = JwtAuth::new(&JwtConfig {
            secret: "other-secret".to_string(),
            ttl_secs: 1800,
        });
        assert!(matches!(
            other.decode_token(&token),
            Err(UserError::Unauthenticated)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let auth = jwt();
        // Past the default 60s validation leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "kittu@example.com".to_string(),
            role: UserRole::Customer,
            iat: now - 3600,
            exp: now - 120,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            auth.decode_token(&token),
            Err(UserError::Unauthenticated)
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(matches!(
            jwt().decode_token("not.a.token"),
            Err(UserError::Unauthenticated)
        ));
    }

    #[test]
    fn test_require_role() {
        let admin = AuthenticatedUser {
            user_name: "admin@example.com".to_string(),
            role: UserRole::Admin,
        };
        let customer = AuthenticatedUser {
            user_name: "kittu@example.com".to_string(),
            role: UserRole::Customer,
        };

        assert!(require_role(&admin, UserRole::Admin).is_ok());
        assert!(matches!(
            require_role(&customer, UserRole::Admin),
            Err(UserError::Forbidden)
        ));
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("secret123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret123", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_corrupt_stored_hash_is_a_mismatch() {
        assert!(!verify_password("secret123", "plaintext-not-a-hash"));
    }
}
