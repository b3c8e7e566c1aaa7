//! Reference location queries. Public: no session required.

use super::prelude::*;

#[derive(Default)]
pub struct LocationQueries;

#[Object]
impl LocationQueries {
    /// Countries, alphabetically
    async fn countries(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1)] page: i64,
        #[graphql(default = 10)] page_size: i64,
    ) -> Result<CountryPage> {
        let db = ctx.data_unchecked::<Database>();
        let request = page_request(page, page_size)?;

        let page = db.locations().list_countries(request).await.extend()?;
        Ok(CountryPage::from_page(page))
    }

    async fn country(&self, ctx: &Context<'_>, id: String) -> Result<Country> {
        let db = ctx.data_unchecked::<Database>();
        let country = db.locations().get_country(&id).await.extend()?;
        Ok(country.into())
    }

    async fn departments(
        &self,
        ctx: &Context<'_>,
        country_id: Option<String>,
        #[graphql(default = 1)] page: i64,
        #[graphql(default = 10)] page_size: i64,
    ) -> Result<DepartmentPage> {
        let db = ctx.data_unchecked::<Database>();
        let request = page_request(page, page_size)?;

        let page = db
            .locations()
            .list_departments(country_id.as_deref(), request)
            .await
            .extend()?;
        Ok(DepartmentPage::from_page(page))
    }

    async fn cities(
        &self,
        ctx: &Context<'_>,
        department_id: Option<String>,
        #[graphql(default = 1)] page: i64,
        #[graphql(default = 10)] page_size: i64,
    ) -> Result<CityPage> {
        let db = ctx.data_unchecked::<Database>();
        let request = page_request(page, page_size)?;

        let page = db
            .locations()
            .list_cities(department_id.as_deref(), request)
            .await
            .extend()?;
        Ok(CityPage::from_page(page))
    }
}
