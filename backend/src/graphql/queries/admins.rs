use super::prelude::*;

#[derive(Default)]
pub struct AdminQueries;

#[Object]
impl AdminQueries {
    /// The admin behind the current session
    #[graphql(guard = "AuthGuard")]
    async fn me(&self, ctx: &Context<'_>) -> Result<Admin> {
        let session = ctx.admin_session()?;
        let db = ctx.data_unchecked::<Database>();

        let admin = db.admins().get_by_id(&session.admin_id).await.extend()?;
        Ok(admin.into())
    }

    /// List admins, optionally searching by name or email
    #[graphql(guard = "AuthGuard")]
    async fn admins(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1)] page: i64,
        #[graphql(default = 10)] page_size: i64,
        search: Option<String>,
    ) -> Result<AdminPage> {
        let db = ctx.data_unchecked::<Database>();
        let request = page_request(page, page_size)?;

        let page = db
            .admins()
            .list(search_term(search).as_deref(), request)
            .await
            .extend()?;
        Ok(AdminPage::from_page(page))
    }

    #[graphql(guard = "AuthGuard")]
    async fn admin(&self, ctx: &Context<'_>, id: String) -> Result<Admin> {
        let db = ctx.data_unchecked::<Database>();
        let admin = db.admins().get_by_id(&id).await.extend()?;
        Ok(admin.into())
    }
}
