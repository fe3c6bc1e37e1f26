// ABOUTME: Placeholder request authentication producing the caller's user identity
// ABOUTME: Development requests fall back to a fixed user; production requires a bearer token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication
//!
//! Bearer tokens are not validated yet: any well-formed `Authorization:
//! Bearer <token>` header maps to the fixed development identity. Outside
//! production a request with no header gets the same identity, so local
//! clients work without credentials.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use crate::config::Environment;
use crate::constants::dev_user;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;

/// Identity of the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User identifier
    pub user_id: String,
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
}

impl AuthenticatedUser {
    /// The fixed development identity
    #[must_use]
    pub fn development() -> Self {
        Self {
            user_id: dev_user::ID.to_owned(),
            email: dev_user::EMAIL.to_owned(),
            name: dev_user::NAME.to_owned(),
        }
    }

    /// Resolve the caller from an `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when the header is missing in production, and
    /// `AuthInvalid` when a header is present but is not a bearer token
    pub fn from_authorization(header: Option<&str>, environment: Environment) -> AppResult<Self> {
        let Some(value) = header else {
            if environment.is_production() {
                return Err(AppError::auth_required());
            }
            debug!(%environment, "No Authorization header; using development user");
            return Ok(Self::development());
        };

        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::auth_invalid("Authorization header must be a bearer token"))?;

        debug!(token_len = token.len(), "Accepted bearer token");
        Ok(Self::development())
    }
}

#[async_trait]
impl FromRequestParts<Arc<ServerResources>> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        resources: &Arc<ServerResources>,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| AppError::auth_invalid("Authorization header is not valid text"))?,
            ),
            None => None,
        };
        Self::from_authorization(header, resources.config.environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_missing_header_outside_production() {
        for environment in [Environment::Development, Environment::Testing] {
            let user = AuthenticatedUser::from_authorization(None, environment).unwrap();
            assert_eq!(user.user_id, "dev-user-123");
        }
    }

    #[test]
    fn test_missing_header_in_production() {
        let err = AuthenticatedUser::from_authorization(None, Environment::Production).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
    }

    #[test]
    fn test_bearer_token_maps_to_fixed_user() {
        let user =
            AuthenticatedUser::from_authorization(Some("Bearer abc.def"), Environment::Production)
                .unwrap();
        assert_eq!(user, AuthenticatedUser::development());

        let err = AuthenticatedUser::from_authorization(Some("Basic dXNlcg=="), Environment::Development)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthInvalid);
        assert!(
            AuthenticatedUser::from_authorization(Some("Bearer   "), Environment::Development)
                .is_err()
        );
    }
}
