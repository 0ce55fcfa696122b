//! Credentials and endpoint configuration.
//!
//! The token comes from `UDACITY_AUTH_TOKEN` and is read once. Endpoints
//! default to the production API and can be pointed elsewhere (a local
//! mock server, for instance) through `REVAS_BASE_URL`.

use std::env::VarError;
use std::fmt;

use crate::error::ConfigError;

pub const TOKEN_ENV_VAR: &str = "UDACITY_AUTH_TOKEN";
pub const BASE_URL_ENV_VAR: &str = "REVAS_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://review-api.udacity.com/api/v1";

/// Opaque bearer token sent verbatim in the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Read the token from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name))
    }

    /// Read the token through `lookup`, which is given the variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&str) -> Result<String, VarError>,
    {
        lookup(TOKEN_ENV_VAR)
            .map(Self::new)
            .map_err(|source| ConfigError::MissingToken {
                var: TOKEN_ENV_VAR,
                source,
            })
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Fixed URL for each API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub certifications: String,
    pub reviewer: String,
    pub new_submission_requests: String,
    pub assigned_count: String,
    pub submission_requests: String,
}

impl Endpoints {
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            certifications: format!("{base}/me/certifications.json"),
            reviewer: format!("{base}/me.json"),
            new_submission_requests: format!("{base}/submission_requests.json"),
            assigned_count: format!("{base}/me/submissions/assigned_count.json"),
            submission_requests: format!("{base}/me/submission_requests.json"),
        }
    }

    /// Use `REVAS_BASE_URL` when set, the production API otherwise.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV_VAR) {
            Ok(base) if !base.trim().is_empty() => Self::with_base_url(base.trim()),
            _ => Self::default(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_read_from_its_variable() {
        let creds = Credentials::from_lookup(|name| {
            assert_eq!(name, TOKEN_ENV_VAR);
            Ok("secret".to_string())
        })
        .unwrap();
        assert_eq!(creds.token(), "secret");
    }

    #[test]
    fn missing_token_is_a_config_error() {
        let err = Credentials::from_lookup(|_| Err(VarError::NotPresent)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingToken {
                var: TOKEN_ENV_VAR,
                source: VarError::NotPresent
            }
        ));
    }

    #[test]
    fn debug_output_hides_the_token() {
        let rendered = format!("{:?}", Credentials::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn default_endpoints_point_at_production() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.certifications,
            "https://review-api.udacity.com/api/v1/me/certifications.json"
        );
        assert_eq!(
            endpoints.reviewer,
            "https://review-api.udacity.com/api/v1/me.json"
        );
        assert_eq!(
            endpoints.new_submission_requests,
            "https://review-api.udacity.com/api/v1/submission_requests.json"
        );
        assert_eq!(
            endpoints.assigned_count,
            "https://review-api.udacity.com/api/v1/me/submissions/assigned_count.json"
        );
        assert_eq!(
            endpoints.submission_requests,
            "https://review-api.udacity.com/api/v1/me/submission_requests.json"
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let endpoints = Endpoints::with_base_url("http://localhost:3000/api/v1/");
        assert_eq!(
            endpoints.reviewer,
            "http://localhost:3000/api/v1/me.json"
        );
    }

    #[test]
    fn endpoints_are_distinct() {
        let e = Endpoints::default();
        let mut urls = vec![
            &e.certifications,
            &e.reviewer,
            &e.new_submission_requests,
            &e.assigned_count,
            &e.submission_requests,
        ];
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), 5);
    }
}
