use crate::error::{AppError, AppResult};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 身份服务签发的访问令牌，本服务只校验不签发
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // owner uuid
    pub exp: i64,
    #[serde(default)]
    pub email: Option<String>,
}

impl Claims {
    pub fn owner_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))
    }
}

#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // 身份服务会带上 aud，这里不做限制
        validation.validate_aud = false;
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }

    pub fn verify_access_token(&self, token: &str) -> AppResult<Uuid> {
        self.verify_token(token)?.owner_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn token(secret: &str, sub: &str, exp: i64) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp,
            email: None,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_yields_owner() {
        let owner = Uuid::new_v4();
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let service = JwtService::new("s3cret");
        let id = service
            .verify_access_token(&token("s3cret", &owner.to_string(), exp))
            .unwrap();
        assert_eq!(id, owner);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let service = JwtService::new("s3cret");
        let t = token("other", &Uuid::new_v4().to_string(), exp);
        assert!(matches!(
            service.verify_access_token(&t),
            Err(AppError::JwtError(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let exp = (Utc::now() - Duration::hours(2)).timestamp();
        let service = JwtService::new("s3cret");
        let t = token("s3cret", &Uuid::new_v4().to_string(), exp);
        assert!(service.verify_access_token(&t).is_err());
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let service = JwtService::new("s3cret");
        let t = token("s3cret", "42", exp);
        assert!(matches!(
            service.verify_access_token(&t),
            Err(AppError::AuthError(_))
        ));
    }
}
