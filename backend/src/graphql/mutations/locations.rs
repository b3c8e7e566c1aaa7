use super::prelude::*;

#[derive(Default)]
pub struct LocationMutations;

#[Object]
impl LocationMutations {
    #[graphql(guard = "AuthGuard")]
    async fn create_country(&self, ctx: &Context<'_>, name: String, code: String) -> Result<Country> {
        let db = ctx.data_unchecked::<Database>();

        require_text(&name, "nombre").extend()?;
        require_text(&code, "código").extend()?;

        let country = db
            .locations()
            .create_country(name.trim(), code.trim())
            .await
            .extend()?;
        Ok(country.into())
    }

    /// Delete a country with its departments and cities
    #[graphql(guard = "AuthGuard")]
    async fn delete_country(&self, ctx: &Context<'_>, id: String) -> Result<DeletionResult> {
        let db = ctx.data_unchecked::<Database>();
        db.locations().delete_country(&id).await.extend()?;
        Ok(DeletionResult::done("País eliminado", id))
    }

    #[graphql(guard = "AuthGuard")]
    async fn create_department(
        &self,
        ctx: &Context<'_>,
        country_id: String,
        name: String,
    ) -> Result<Department> {
        let db = ctx.data_unchecked::<Database>();
        require_text(&name, "nombre").extend()?;

        let department = db
            .locations()
            .create_department(&country_id, name.trim())
            .await
            .extend()?;
        Ok(department.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn create_city(&self, ctx: &Context<'_>, department_id: String, name: String) -> Result<City> {
        let db = ctx.data_unchecked::<Database>();
        require_text(&name, "nombre").extend()?;

        let city = db
            .locations()
            .create_city(&department_id, name.trim())
            .await
            .extend()?;
        Ok(city.into())
    }
}
