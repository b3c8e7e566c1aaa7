use super::prelude::*;

#[derive(Default)]
pub struct SellerMutations;

#[Object]
impl SellerMutations {
    /// Register a seller together with its profile
    #[graphql(guard = "AuthGuard")]
    async fn register_seller(&self, ctx: &Context<'_>, input: RegisterSellerInput) -> Result<Seller> {
        let db = ctx.data_unchecked::<Database>();

        require_email(&input.email).extend()?;
        require_text(&input.name, "nombre").extend()?;
        require_score(input.sustainability_score).extend()?;

        let (seller, _profile) = db
            .sellers()
            .register(RegisterSeller {
                email: input.email,
                name: input.name.trim().to_string(),
                seller_type: input.seller_type.as_str().to_string(),
                phone: input.phone,
                city_id: input.city_id,
                description: input.description,
                avatar_url: input.avatar_url,
                website: input.website,
                sustainability_score: input.sustainability_score,
            })
            .await
            .extend()?;

        tracing::info!(seller_id = %seller.id, "Seller registered");
        Ok(seller.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_seller(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: UpdateSellerInput,
    ) -> Result<Seller> {
        let db = ctx.data_unchecked::<Database>();

        if let Some(email) = &input.email {
            require_email(email).extend()?;
        }
        if let Some(name) = &input.name {
            require_text(name, "nombre").extend()?;
        }

        let seller = db
            .sellers()
            .update(
                &id,
                UpdateSeller {
                    email: input.email,
                    name: input.name,
                    seller_type: input.seller_type.map(|t| t.as_str().to_string()),
                    phone: input.phone,
                    city_id: input.city_id,
                },
            )
            .await
            .extend()?;
        Ok(seller.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_seller_profile(
        &self,
        ctx: &Context<'_>,
        seller_id: String,
        input: UpdateSellerProfileInput,
    ) -> Result<SellerProfile> {
        let db = ctx.data_unchecked::<Database>();

        if let Some(score) = input.sustainability_score {
            require_score(score).extend()?;
        }

        let profile = db
            .sellers()
            .update_profile(
                &seller_id,
                UpdateSellerProfile {
                    description: input.description,
                    avatar_url: input.avatar_url,
                    website: input.website,
                    sustainability_score: input.sustainability_score,
                },
            )
            .await
            .extend()?;
        Ok(profile.into())
    }

    /// Grant or revoke the verified badge
    #[graphql(guard = "AuthGuard")]
    async fn verify_seller(
        &self,
        ctx: &Context<'_>,
        id: String,
        #[graphql(default = true)] verified: bool,
    ) -> Result<Seller> {
        let db = ctx.data_unchecked::<Database>();
        let seller = db.sellers().set_verified(&id, verified).await.extend()?;

        tracing::info!(seller_id = %seller.id, verified, "Seller verification changed");
        Ok(seller.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_seller(&self, ctx: &Context<'_>, id: String) -> Result<DeletionResult> {
        let db = ctx.data_unchecked::<Database>();
        db.sellers().delete(&id).await.extend()?;
        Ok(DeletionResult::done("Vendedor eliminado", id))
    }
}
