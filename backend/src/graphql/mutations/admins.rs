use super::prelude::*;

#[derive(Default)]
pub struct AdminMutations;

#[Object]
impl AdminMutations {
    /// Create a new admin account
    #[graphql(guard = "AuthGuard")]
    async fn create_admin(&self, ctx: &Context<'_>, input: CreateAdminInput) -> Result<Admin> {
        let db = ctx.data_unchecked::<Database>();
        let auth = ctx.data_unchecked::<AuthService>();

        require_email(&input.email).extend()?;
        require_text(&input.name, "nombre").extend()?;
        let password_hash = auth.hash_password(&input.password).extend()?;

        let admin = db
            .admins()
            .create(CreateAdmin {
                email: input.email,
                password_hash,
                name: input.name.trim().to_string(),
            })
            .await
            .extend()?;

        tracing::info!(admin_id = %admin.id, "Admin created");
        Ok(admin.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_admin(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: UpdateAdminInput,
    ) -> Result<Admin> {
        let db = ctx.data_unchecked::<Database>();

        if let Some(email) = &input.email {
            require_email(email).extend()?;
        }
        if let Some(name) = &input.name {
            require_text(name, "nombre").extend()?;
        }

        let admin = db
            .admins()
            .update(
                &id,
                UpdateAdmin {
                    email: input.email,
                    name: input.name,
                    password_hash: None,
                    is_active: input.is_active,
                },
            )
            .await
            .extend()?;
        Ok(admin.into())
    }

    /// Change the password of an admin
    #[graphql(guard = "AuthGuard")]
    async fn change_admin_password(
        &self,
        ctx: &Context<'_>,
        id: String,
        password: String,
    ) -> Result<Admin> {
        let auth = ctx.data_unchecked::<AuthService>();
        let admin = auth.set_password(&id, &password).await.extend()?;

        tracing::info!(admin_id = %admin.id, "Admin password changed");
        Ok(admin.into())
    }

    /// Delete an admin. The current session cannot delete itself.
    #[graphql(guard = "AuthGuard")]
    async fn delete_admin(&self, ctx: &Context<'_>, id: String) -> Result<DeletionResult> {
        let session = ctx.admin_session()?;
        if session.admin_id == id {
            return Ok(DeletionResult::failed("No puedes eliminar tu propia cuenta"));
        }

        let db = ctx.data_unchecked::<Database>();
        db.admins().delete(&id).await.extend()?;
        Ok(DeletionResult::done("Administrador eliminado", id))
    }
}
