use super::prelude::*;

#[derive(Default)]
pub struct ServiceMutations;

#[Object]
impl ServiceMutations {
    #[graphql(guard = "AuthGuard")]
    async fn create_service(&self, ctx: &Context<'_>, input: CreateServiceInput) -> Result<Service> {
        let db = ctx.data_unchecked::<Database>();

        require_text(&input.name, "nombre").extend()?;
        require_non_negative(input.base_price, "precio base").extend()?;

        let service = db
            .services()
            .create(CreateService {
                seller_id: input.seller_id,
                name: input.name.trim().to_string(),
                description: input.description,
                base_price: input.base_price,
            })
            .await
            .extend()?;
        Ok(service.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_service(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: UpdateServiceInput,
    ) -> Result<Service> {
        let db = ctx.data_unchecked::<Database>();

        if let Some(name) = &input.name {
            require_text(name, "nombre").extend()?;
        }
        if let Some(price) = input.base_price {
            require_non_negative(price, "precio base").extend()?;
        }

        let service = db
            .services()
            .update(
                &id,
                UpdateService {
                    name: input.name,
                    description: input.description,
                    base_price: input.base_price,
                    status: input.status.map(|s| s.as_str().to_string()),
                },
            )
            .await
            .extend()?;
        Ok(service.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_service(&self, ctx: &Context<'_>, id: String) -> Result<DeletionResult> {
        let db = ctx.data_unchecked::<Database>();
        db.services().delete(&id).await.extend()?;
        Ok(DeletionResult::done("Servicio eliminado", id))
    }

    // ------------------------------------------------------------------------
    // Quotations
    // ------------------------------------------------------------------------

    #[graphql(guard = "AuthGuard")]
    async fn create_quotation(
        &self,
        ctx: &Context<'_>,
        input: CreateQuotationInput,
    ) -> Result<Quotation> {
        let db = ctx.data_unchecked::<Database>();

        require_email(&input.requester_email).extend()?;
        require_text(&input.details, "detalle").extend()?;

        let quotation = db
            .services()
            .create_quotation(CreateQuotation {
                service_id: input.service_id,
                requester_email: input.requester_email.trim().to_string(),
                details: input.details,
            })
            .await
            .extend()?;
        Ok(quotation.into())
    }

    /// Answer a quotation, optionally quoting an amount
    #[graphql(guard = "AuthGuard")]
    async fn set_quotation_status(
        &self,
        ctx: &Context<'_>,
        id: String,
        status: QuotationStatus,
        amount: Option<f64>,
    ) -> Result<Quotation> {
        let db = ctx.data_unchecked::<Database>();
        if let Some(amount) = amount {
            require_non_negative(amount, "monto").extend()?;
        }

        let quotation = db
            .services()
            .set_quotation_status(&id, status.as_str(), amount)
            .await
            .extend()?;
        Ok(quotation.into())
    }
}
