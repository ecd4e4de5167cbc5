//! JWT 토큰 관리 서비스 구현
//!
//! 로그인 시 HS256 액세스 토큰 하나를 발급하고, 요청마다 검증하며,
//! 로그아웃 시 토큰의 `jti`를 폐기 목록에 올립니다.

use std::sync::Arc;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use uuid::Uuid;
use crate::{
    config::JwtConfig,
    core::errors::AppError,
    domain::entities::users::user::User,
    domain::models::auth::AuthenticatedUser,
    domain::models::token::TokenClaims,
    repositories::tokens::TokenRepository,
};

/// JWT 토큰 관리 서비스
///
/// ```rust,ignore
/// let token_service = TokenService::instance();
/// let token = token_service.issue_token(&user)?;
/// let claims = token_service.verify_token(&token)?;
/// ```
#[service(name = "token")]
pub struct TokenService {
    token_repo: Arc<TokenRepository>,
}

/// 사용자 클레임 생성 (`jti`는 매번 새 UUID)
pub fn build_claims(user: &User, now: i64, lifetime_hours: i64) -> TokenClaims {
    TokenClaims {
        sub: user.id.to_string(),
        roles: user.roles.clone(),
        iat: now,
        exp: now + Duration::hours(lifetime_hours).num_seconds(),
        jti: Uuid::new_v4().to_string(),
    }
}

pub fn sign_claims(claims: &TokenClaims, secret: &str) -> Result<String, AppError> {
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_ref()))
        .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
}

pub fn decode_claims(token: &str, secret: &str) -> Result<TokenClaims, AppError> {
    decode::<TokenClaims>(token, &DecodingKey::from_secret(secret.as_ref()), &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
            }
            _ => AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()),
        })
}

/// Authorization 헤더에서 토큰 부분 추출
///
/// 허용 접두사는 [`JwtConfig::accepted_schemes`] (`Bearer `, `Token `)입니다.
pub fn extract_token(auth_header: &str) -> Result<&str, AppError> {
    JwtConfig::accepted_schemes()
        .iter()
        .find_map(|scheme| auth_header.strip_prefix(scheme))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))
}

impl TokenService {
    /// 로그인 토큰 발급
    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let claims = build_claims(user, Utc::now().timestamp(), JwtConfig::expiration_hours());
        sign_claims(&claims, &JwtConfig::secret())
    }

    /// 서명과 만료 검증 후 클레임 반환
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        decode_claims(token, &JwtConfig::secret())
    }

    /// 검증 + 폐기 여부 확인 후 요청 사용자 생성
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let claims = self.verify_token(token)?;

        if self.token_repo.is_blacklisted(&claims.jti).await? {
            return Err(AppError::AuthenticationError("로그아웃된 토큰입니다".to_string()));
        }

        let user_id = claims.user_id().ok_or_else(|| {
            AppError::AuthenticationError("유효하지 않은 토큰 주체입니다".to_string())
        })?;

        Ok(AuthenticatedUser {
            user_id,
            roles: claims.roles,
            token_id: claims.jti,
            expires_at: claims.exp,
        })
    }

    /// 로그아웃: 현재 토큰 폐기
    pub async fn revoke(&self, user: &AuthenticatedUser) -> Result<(), AppError> {
        self.token_repo
            .blacklist(&user.token_id, user.user_id, user.expires_at)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn user() -> User {
        User::new(
            42,
            "cook@example.com".to_string(),
            "cook".to_string(),
            "Gordon".to_string(),
            "Ramsay".to_string(),
            "hash".to_string(),
        )
    }

    #[test]
    fn test_sign_and_decode() {
        let claims = build_claims(&user(), Utc::now().timestamp(), 1);
        let token = sign_claims(&claims, SECRET).unwrap();

        let decoded = decode_claims(&token, SECRET).unwrap();
        assert_eq!(decoded.user_id(), Some(42));
        assert_eq!(decoded.jti, claims.jti);
        assert_eq!(decoded.exp - decoded.iat, 3600);
    }

    #[test]
    fn test_each_token_has_unique_jti() {
        let now = Utc::now().timestamp();
        assert_ne!(build_claims(&user(), now, 1).jti, build_claims(&user(), now, 1).jti);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = build_claims(&user(), Utc::now().timestamp(), 1);
        let token = sign_claims(&claims, SECRET).unwrap();

        assert!(matches!(
            decode_claims(&token, "other-secret"),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let issued = Utc::now().timestamp() - 3 * 3600;
        let claims = build_claims(&user(), issued, 1);
        let token = sign_claims(&claims, SECRET).unwrap();

        assert!(matches!(
            decode_claims(&token, SECRET),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_extract_token_schemes() {
        assert_eq!(extract_token("Bearer abc.def").unwrap(), "abc.def");
        assert_eq!(extract_token("Token abc.def").unwrap(), "abc.def");
        assert!(extract_token("Basic abc").is_err());
        assert!(extract_token("Bearer ").is_err());
    }
}
