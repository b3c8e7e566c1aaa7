//! REST route definitions
//!
//! The admin API is GraphQL at /graphql. REST is used for the session
//! cookie handshake and for health probes.

pub mod health;
pub mod session;
