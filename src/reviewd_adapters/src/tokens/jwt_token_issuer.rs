use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use reviewd_core::{Role, TokenClaims, TokenIssuer, TokenIssuerError, Username};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtConfig {
    pub fn new(secret: Secret<String>, token_ttl_in_seconds: i64) -> Self {
        Self {
            secret,
            token_ttl_in_seconds,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

/// Signed bearer tokens bound to an account's identity and role.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    config: JwtConfig,
}

impl JwtTokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue_token(&self, claims: &TokenClaims) -> Result<String, TokenIssuerError> {
        let delta = chrono::Duration::try_seconds(self.config.token_ttl_in_seconds).ok_or(
            TokenIssuerError::UnexpectedError("Failed to create token duration".to_string()),
        )?;

        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or(TokenIssuerError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        let wire_claims = WireClaims {
            sub: claims.username.as_str().to_string(),
            role: claims.role,
            exp,
        };

        encode(
            &jsonwebtoken::Header::default(),
            &wire_claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map_err(|e| TokenIssuerError::UnexpectedError(e.to_string()))
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenIssuerError> {
        let data = decode::<WireClaims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| TokenIssuerError::InvalidToken)?;

        let username =
            Username::try_from(data.claims.sub).map_err(|_| TokenIssuerError::InvalidToken)?;

        Ok(TokenClaims {
            username,
            role: data.claims.role,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    role: Role,
    exp: i64,
}
