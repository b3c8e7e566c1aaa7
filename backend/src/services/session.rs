//! Session cookies
//!
//! Cookie names are part of the public contract with the admin frontend.
//! Flags depend on the deployment environment: development cookies are
//! plain so they work over http://localhost, while QA and production
//! cookies are httpOnly, secure and scoped to the shared domain.

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::Environment;

pub const ACCESS_COOKIE: &str = "x-o-token";
pub const REFRESH_COOKIE: &str = "x-o-refresh-token";

/// Cookie flags for one environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePolicy {
    pub http_only: bool,
    pub secure: bool,
    pub domain: Option<String>,
}

impl CookiePolicy {
    pub fn new(environment: Environment, cookie_domain: Option<String>) -> Self {
        if environment.is_deployed() {
            Self {
                http_only: true,
                secure: true,
                domain: cookie_domain,
            }
        } else {
            Self {
                http_only: false,
                secure: false,
                domain: None,
            }
        }
    }

    /// `x-o-token` cookie carrying an access token
    pub fn access_cookie(&self, token: String, max_age_secs: i64) -> Cookie<'static> {
        self.build(ACCESS_COOKIE, token, max_age_secs)
    }

    /// `x-o-refresh-token` cookie carrying a refresh token
    pub fn refresh_cookie(&self, token: String, max_age_secs: i64) -> Cookie<'static> {
        self.build(REFRESH_COOKIE, token, max_age_secs)
    }

    /// Expired cookie that removes `name` on the client
    pub fn removal(&self, name: &'static str) -> Cookie<'static> {
        self.build(name, String::new(), 0)
    }

    fn build(&self, name: &'static str, value: String, max_age_secs: i64) -> Cookie<'static> {
        let mut builder = Cookie::build((name, value))
            .path("/")
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(max_age_secs));

        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_development_cookies_are_plain() {
        let policy = CookiePolicy::new(Environment::Development, Some("eco.com".into()));
        let cookie = policy.access_cookie("abc".into(), 900);

        assert_eq!(cookie.name(), "x-o-token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(false));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.domain(), None);
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(900)));
    }

    #[test]
    fn test_qa_and_production_cookies_are_locked_down() {
        for env in [Environment::Qa, Environment::Production] {
            let policy = CookiePolicy::new(env, Some("eco.com".into()));
            let cookie = policy.refresh_cookie("xyz".into(), 604800);

            assert_eq!(cookie.name(), "x-o-refresh-token");
            assert_eq!(cookie.http_only(), Some(true));
            assert_eq!(cookie.secure(), Some(true));
            assert_eq!(cookie.domain(), Some("eco.com"));
            assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        }
    }

    #[test]
    fn test_removal_expires_immediately() {
        let policy = CookiePolicy::new(Environment::Development, None);
        let cookie = policy.removal(ACCESS_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
