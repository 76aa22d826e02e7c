//! Requester identity.
//!
//! Sessions are resolved upstream of this service; the authenticated
//! caller's email arrives in the `X-User-Email` header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::utils::error::AppError;

pub const USER_EMAIL_HEADER: &str = "x-user-email";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let email = parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or_else(|| AppError::AuthError("Missing user identity".to_string()))?;

        Ok(Self {
            email: email.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<CurrentUser, AppError> {
        let (mut parts, _) = request.into_parts();
        CurrentUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_reads_email_header() {
        let request = Request::builder()
            .header(USER_EMAIL_HEADER, " ann@x.com ")
            .body(())
            .unwrap();

        let user = extract(request).await.unwrap();
        assert_eq!(user.email, "ann@x.com");
    }

    #[tokio::test]
    async fn test_missing_or_blank_header_is_rejected() {
        let missing = Request::builder().body(()).unwrap();
        assert!(matches!(extract(missing).await, Err(AppError::AuthError(_))));

        let blank = Request::builder()
            .header(USER_EMAIL_HEADER, "  ")
            .body(())
            .unwrap();
        assert!(matches!(extract(blank).await, Err(AppError::AuthError(_))));
    }
}
