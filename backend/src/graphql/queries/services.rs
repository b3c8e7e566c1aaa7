use super::prelude::*;

#[derive(Default)]
pub struct ServiceQueries;

#[Object]
impl ServiceQueries {
    #[graphql(guard = "AuthGuard")]
    async fn services(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1)] page: i64,
        #[graphql(default = 10)] page_size: i64,
        seller_id: Option<String>,
        status: Option<ListingStatus>,
        search: Option<String>,
    ) -> Result<ServicePage> {
        let db = ctx.data_unchecked::<Database>();
        let request = page_request(page, page_size)?;

        let filter = ServiceFilter {
            seller_id,
            status: status.map(|s| s.as_str().to_string()),
            search: search_term(search),
        };
        let page = db.services().list(filter, request).await.extend()?;
        Ok(ServicePage::from_page(page))
    }

    #[graphql(guard = "AuthGuard")]
    async fn service(&self, ctx: &Context<'_>, id: String) -> Result<Service> {
        let db = ctx.data_unchecked::<Database>();
        let service = db.services().get_by_id(&id).await.extend()?;
        Ok(service.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn quotations(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1)] page: i64,
        #[graphql(default = 10)] page_size: i64,
        service_id: Option<String>,
        status: Option<QuotationStatus>,
    ) -> Result<QuotationPage> {
        let db = ctx.data_unchecked::<Database>();
        let request = page_request(page, page_size)?;

        let page = db
            .services()
            .list_quotations(service_id.as_deref(), status.map(|s| s.as_str()), request)
            .await
            .extend()?;
        Ok(QuotationPage::from_page(page))
    }
}
