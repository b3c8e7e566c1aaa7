use super::prelude::*;

#[derive(Default)]
pub struct SellerQueries;

#[Object]
impl SellerQueries {
    /// List sellers, newest first
    #[graphql(guard = "AuthGuard")]
    async fn sellers(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1)] page: i64,
        #[graphql(default = 10)] page_size: i64,
        search: Option<String>,
        seller_type: Option<SellerType>,
    ) -> Result<SellerPage> {
        let db = ctx.data_unchecked::<Database>();
        let request = page_request(page, page_size)?;

        let filter = SellerFilter {
            search: search_term(search),
            seller_type: seller_type.map(|t| t.as_str().to_string()),
        };
        let page = db.sellers().list(filter, request).await.extend()?;
        Ok(SellerPage::from_page(page))
    }

    /// A seller; `profile` is resolved on demand
    #[graphql(guard = "AuthGuard")]
    async fn seller(&self, ctx: &Context<'_>, id: String) -> Result<Seller> {
        let db = ctx.data_unchecked::<Database>();
        let seller = db.sellers().get_by_id(&id).await.extend()?;
        Ok(seller.into())
    }
}
