//! Authentication and authorization

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use core_kernel::{Actor, Role, UserId};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// The user's role
    pub role: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid principal: {0}")]
    InvalidPrincipal(String),
}

impl Claims {
    /// Resolves the token claims into the domain actor
    ///
    /// The subject must be a UUID and the role one of the platform role
    /// names; anything else is treated as an authentication failure.
    pub fn actor(&self) -> Result<Actor, AuthError> {
        let user_id = Uuid::parse_str(&self.sub)
            .map(UserId::from_uuid)
            .map_err(|_| {
                AuthError::InvalidPrincipal(format!("subject is not a UUID: {}", self.sub))
            })?;
        let role = self
            .role
            .parse::<Role>()
            .map_err(|_| AuthError::InvalidPrincipal(format!("unknown role: {}", self.role)))?;
        Ok(Actor::new(user_id, role))
    }
}

/// Creates a new JWT token
///
/// # Arguments
///
/// * `user_id` - User identifier
/// * `role` - The user's role name
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    user_id: &str,
    role: &str,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
///
/// # Arguments
///
/// * `token` - The JWT token to validate
/// * `secret` - JWT secret key
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

/// Role names accepted in tokens
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const SHOP_OWNER: &str = "shop-owner";
    pub const PHONE_CHECKER: &str = "phone-checker";
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_token_round_trip() {
        let user_id = Uuid::new_v4().to_string();
        let token = create_token(&user_id, roles::SHOP_OWNER, SECRET, 3600).unwrap();

        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, roles::SHOP_OWNER);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_token(&Uuid::new_v4().to_string(), roles::ADMIN, SECRET, 3600).unwrap();
        let result = validate_token(&token, "a-different-secret");
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Encode claims that expired well beyond the default leeway
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: roles::ADMIN.to_string(),
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_claims_resolve_to_an_actor() {
        let user_id = Uuid::new_v4();
        let claims = Claims {
            sub: user_id.to_string(),
            role: roles::PHONE_CHECKER.to_string(),
            exp: 0,
            iat: 0,
        };

        let actor = claims.actor().unwrap();
        assert_eq!(actor.user_id, UserId::from_uuid(user_id));
        assert_eq!(actor.role, Role::PhoneChecker);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: "superuser".to_string(),
            exp: 0,
            iat: 0,
        };
        assert!(matches!(
            claims.actor(),
            Err(AuthError::InvalidPrincipal(_))
        ));
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let claims = Claims {
            sub: "user-42".to_string(),
            role: roles::ADMIN.to_string(),
            exp: 0,
            iat: 0,
        };
        assert!(matches!(
            claims.actor(),
            Err(AuthError::InvalidPrincipal(_))
        ));
    }
}
