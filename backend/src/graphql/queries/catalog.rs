use super::prelude::*;

#[derive(Default)]
pub struct CatalogQueries;

#[Object]
impl CatalogQueries {
    /// Product categories, alphabetically. Public.
    async fn product_categories(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1)] page: i64,
        #[graphql(default = 10)] page_size: i64,
    ) -> Result<ProductCategoryPage> {
        let db = ctx.data_unchecked::<Database>();
        let request = page_request(page, page_size)?;

        let page = db.categories().list(request).await.extend()?;
        Ok(ProductCategoryPage::from_page(page))
    }

    #[graphql(guard = "AuthGuard")]
    async fn products(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1)] page: i64,
        #[graphql(default = 10)] page_size: i64,
        seller_id: Option<String>,
        category_id: Option<String>,
        status: Option<ListingStatus>,
        search: Option<String>,
    ) -> Result<ProductPage> {
        let db = ctx.data_unchecked::<Database>();
        let request = page_request(page, page_size)?;

        let filter = ProductFilter {
            seller_id,
            category_id,
            status: status.map(|s| s.as_str().to_string()),
            search: search_term(search),
        };
        let page = db.products().list(filter, request).await.extend()?;
        Ok(ProductPage::from_page(page))
    }

    #[graphql(guard = "AuthGuard")]
    async fn product(&self, ctx: &Context<'_>, id: String) -> Result<Product> {
        let db = ctx.data_unchecked::<Database>();
        let product = db.products().get_by_id(&id).await.extend()?;
        Ok(product.into())
    }
}
