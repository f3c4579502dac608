//! JWT utilities for authentication
//!
//! Provides token encoding, decoding, and validation using the `jsonwebtoken` crate.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which kind of account a token was issued to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    Admin,
    Affiliate,
}

impl PrincipalKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Affiliate => "affiliate",
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal ID)
    pub sub: String,
    /// Principal kind (admin or affiliate)
    pub kind: PrincipalKind,
    pub email: String,
    /// Admin role, absent for affiliates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Get the principal ID
    ///
    /// # Errors
    /// Returns an error if the subject is not a numeric ID
    pub fn principal_id(&self) -> Result<i64, AppError> {
        self.sub.parse::<i64>().map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// A freshly signed token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and token lifetime (seconds)
    #[must_use]
    pub fn new(secret: &str, expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        }
    }

    /// Token lifetime in seconds
    #[must_use]
    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    /// Issue a token for a principal
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(
        &self,
        kind: PrincipalKind,
        id: i64,
        email: &str,
        role: Option<&str>,
    ) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: id.to_string(),
            kind,
            email: email.to_string(),
            role: role.map(str::to_string),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.expires_in)).timestamp(),
        };

        Ok(IssuedToken {
            token: self.encode_claims(&claims)?,
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in,
        })
    }

    /// Sign arbitrary claims
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Decode a token and require a principal kind
    ///
    /// # Errors
    /// Returns 401-class errors for bad tokens and `Forbidden` for the wrong kind
    pub fn validate_kind(&self, token: &str, kind: PrincipalKind) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.kind != kind {
            return Err(AppError::forbidden(format!(
                "{} token required",
                kind.as_str()
            )));
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}
