use super::prelude::*;

#[derive(Default)]
pub struct CatalogMutations;

#[Object]
impl CatalogMutations {
    // ------------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------------

    #[graphql(guard = "AuthGuard")]
    async fn create_product_category(
        &self,
        ctx: &Context<'_>,
        input: ProductCategoryInput,
    ) -> Result<ProductCategory> {
        let db = ctx.data_unchecked::<Database>();
        require_text(&input.name, "nombre").extend()?;

        let category = db
            .categories()
            .create(CreateCategory {
                name: input.name.trim().to_string(),
                description: input.description,
            })
            .await
            .extend()?;
        Ok(category.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_product_category(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: UpdateProductCategoryInput,
    ) -> Result<ProductCategory> {
        let db = ctx.data_unchecked::<Database>();
        if let Some(name) = &input.name {
            require_text(name, "nombre").extend()?;
        }

        let category = db
            .categories()
            .update(
                &id,
                UpdateCategory {
                    name: input.name,
                    description: input.description,
                },
            )
            .await
            .extend()?;
        Ok(category.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_product_category(&self, ctx: &Context<'_>, id: String) -> Result<DeletionResult> {
        let db = ctx.data_unchecked::<Database>();
        db.categories().delete(&id).await.extend()?;
        Ok(DeletionResult::done("Categoría eliminada", id))
    }

    // ------------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------------

    /// Create a product; new products start as drafts
    #[graphql(guard = "AuthGuard")]
    async fn create_product(&self, ctx: &Context<'_>, input: CreateProductInput) -> Result<Product> {
        let db = ctx.data_unchecked::<Database>();

        require_text(&input.name, "nombre").extend()?;
        require_non_negative(input.price, "precio").extend()?;
        require_non_negative(input.stock as f64, "stock").extend()?;

        let product = db
            .products()
            .create(CreateProduct {
                seller_id: input.seller_id,
                category_id: input.category_id,
                name: input.name.trim().to_string(),
                description: input.description,
                price: input.price,
                stock: input.stock,
            })
            .await
            .extend()?;
        Ok(product.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_product(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: UpdateProductInput,
    ) -> Result<Product> {
        let db = ctx.data_unchecked::<Database>();

        if let Some(name) = &input.name {
            require_text(name, "nombre").extend()?;
        }
        if let Some(price) = input.price {
            require_non_negative(price, "precio").extend()?;
        }
        if let Some(stock) = input.stock {
            require_non_negative(stock as f64, "stock").extend()?;
        }

        let product = db
            .products()
            .update(
                &id,
                UpdateProduct {
                    category_id: input.category_id,
                    name: input.name,
                    description: input.description,
                    price: input.price,
                    stock: input.stock,
                },
            )
            .await
            .extend()?;
        Ok(product.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn set_product_status(
        &self,
        ctx: &Context<'_>,
        id: String,
        status: ListingStatus,
    ) -> Result<Product> {
        let db = ctx.data_unchecked::<Database>();
        let product = db.products().set_status(&id, status.as_str()).await.extend()?;
        Ok(product.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_product(&self, ctx: &Context<'_>, id: String) -> Result<DeletionResult> {
        let db = ctx.data_unchecked::<Database>();
        db.products().delete(&id).await.extend()?;
        Ok(DeletionResult::done("Producto eliminado", id))
    }
}
