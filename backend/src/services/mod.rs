//! Application services

pub mod auth;
pub mod session;
pub mod tokens;

pub use auth::AuthService;
pub use session::{ACCESS_COOKIE, CookiePolicy, REFRESH_COOKIE};
pub use tokens::{Claims, TokenConfig, TokenError, TokenIssuer, TokenPair};
