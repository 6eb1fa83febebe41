use crate::config::AppConfig;
use crate::models::users::entities::UserRole;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Token 类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,           // Subject (user ID)
    pub role: UserRole,        // 用户角色
    pub token_type: TokenType, // token类型
    pub exp: usize,            // Expiration time (时间戳)
    pub iat: usize,            // Issued at (签发时间)
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

// Token 响应结构体
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    // 生成 Access Token
    pub fn generate_access_token(
        user_id: i64,
        role: UserRole,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::encode_with_secret(
            &Self::get_secret(),
            user_id,
            role,
            TokenType::Access,
            chrono::Duration::minutes(config.jwt.access_token_expiry),
        )
    }

    // 生成 Refresh Token
    pub fn generate_refresh_token(
        user_id: i64,
        role: UserRole,
        token_expiry: Option<chrono::Duration>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        let expiry =
            token_expiry.unwrap_or_else(|| chrono::Duration::days(config.jwt.refresh_token_expiry));
        Self::encode_with_secret(
            &Self::get_secret(),
            user_id,
            role,
            TokenType::Refresh,
            expiry,
        )
    }

    /// 使用指定密钥签发 token
    pub fn encode_with_secret(
        secret: &str,
        user_id: i64,
        role: UserRole,
        token_type: TokenType,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role,
            token_type,
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
    }

    /// 使用指定密钥校验 token 并检查类型
    pub fn decode_with_secret(
        secret: &str,
        token: &str,
        expected_type: TokenType,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let claims = decode::<Claims>(token, &decoding_key, &Validation::default())?.claims;
        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }

    // 生成完整的 Token 响应（包含 access 和 refresh token）
    pub fn generate_token_pair(
        user_id: i64,
        role: UserRole,
        refresh_token_expiry: Option<chrono::Duration>,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        let access_token = Self::generate_access_token(user_id, role)?;
        let refresh_token = Self::generate_refresh_token(user_id, role, refresh_token_expiry)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::decode_with_secret(&Self::get_secret(), token, TokenType::Access)
    }

    // 验证 Refresh Token
    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::decode_with_secret(&Self::get_secret(), token, TokenType::Refresh)
    }

    // 使用 Refresh Token 生成新的 Access Token
    pub fn refresh_access_token(
        refresh_token: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        let user_id = claims
            .user_id()
            .ok_or(jsonwebtoken::errors::ErrorKind::InvalidToken)?;
        Self::generate_access_token(user_id, claims.role)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(
        refresh_token: &str,
        expiry: chrono::Duration,
    ) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_TOKEN_COOKIE, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(
                expiry.num_seconds(),
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 从请求中提取 Refresh Token
    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_token_round_trip_keeps_role() {
        let token = JwtUtils::encode_with_secret(
            SECRET,
            7,
            UserRole::Teacher,
            TokenType::Access,
            chrono::Duration::minutes(5),
        )
        .unwrap();

        let claims = JwtUtils::decode_with_secret(SECRET, &token, TokenType::Access).unwrap();
        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.role, UserRole::Teacher);
    }

    #[test]
    fn test_refresh_token_is_not_accepted_as_access() {
        let token = JwtUtils::encode_with_secret(
            SECRET,
            7,
            UserRole::Student,
            TokenType::Refresh,
            chrono::Duration::days(1),
        )
        .unwrap();

        assert!(JwtUtils::decode_with_secret(SECRET, &token, TokenType::Access).is_err());
        assert!(JwtUtils::decode_with_secret("other-secret", &token, TokenType::Refresh).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = JwtUtils::encode_with_secret(
            SECRET,
            7,
            UserRole::Student,
            TokenType::Access,
            chrono::Duration::minutes(-10),
        )
        .unwrap();

        assert!(JwtUtils::decode_with_secret(SECRET, &token, TokenType::Access).is_err());
    }
}
