pub mod admins;
pub mod catalog;
pub mod locations;
pub mod orders;
pub mod posts;
pub mod sellers;
pub mod services;

pub use admins::AdminMutations;
pub use catalog::CatalogMutations;
pub use locations::LocationMutations;
pub use orders::OrderMutations;
pub use posts::PostMutations;
pub use sellers::SellerMutations;
pub use services::ServiceMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result, ResultExt};

    pub(crate) use crate::db::*;
    pub(crate) use crate::graphql::auth::{AuthExt, AuthGuard};
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::AuthService;
}
