pub mod admins;
pub mod catalog;
pub mod locations;
pub mod orders;
pub mod posts;
pub mod sellers;
pub mod services;

pub use admins::AdminQueries;
pub use catalog::CatalogQueries;
pub use locations::LocationQueries;
pub use orders::OrderQueries;
pub use posts::PostQueries;
pub use sellers::SellerQueries;
pub use services::ServiceQueries;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result, ResultExt};

    pub(crate) use crate::db::*;
    pub(crate) use crate::graphql::auth::{AuthExt, AuthGuard};
    pub(crate) use crate::graphql::filters::search_term;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
}
