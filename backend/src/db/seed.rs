//! Startup seeding.
//!
//! Creates the first admin account from `ADMIN_EMAIL` / `ADMIN_PASSWORD` /
//! `ADMIN_NAME` when the admins table is empty. Re-runs are no-ops once any
//! admin exists.

use tracing::{debug, info};

use super::{AdminRecord, CreateAdmin, Database};
use crate::config::BootstrapAdmin;
use crate::errors::{ApiError, ApiResult};

/// Seed the bootstrap admin if no admin exists yet.
///
/// Returns the created admin, or `None` when the table already had rows.
pub async fn seed_bootstrap_admin(
    db: &Database,
    admin: &BootstrapAdmin,
    bcrypt_cost: u32,
) -> ApiResult<Option<AdminRecord>> {
    let admins = db.admins();
    if admins.count().await? > 0 {
        debug!("Admins already present, skipping bootstrap admin");
        return Ok(None);
    }

    let password_hash = bcrypt::hash(&admin.password, bcrypt_cost).map_err(|e| {
        tracing::error!(error = %e, "Failed to hash bootstrap admin password");
        ApiError::internal()
    })?;

    let created = admins
        .create(CreateAdmin {
            email: admin.email.clone(),
            password_hash,
            name: admin.name.clone(),
        })
        .await?;

    info!(admin_id = %created.id, email = %created.email, "Seeded bootstrap admin");
    Ok(Some(created))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bootstrap() -> BootstrapAdmin {
        BootstrapAdmin {
            email: "root@ecomarket.test".into(),
            password: "s3cret-pass".into(),
            name: "Root".into(),
        }
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let db = Database::connect_in_memory().await.unwrap();

        let first = seed_bootstrap_admin(&db, &bootstrap(), 4).await.unwrap();
        let created = first.expect("admin should be created");
        assert!(bcrypt::verify("s3cret-pass", &created.password_hash).unwrap());

        let second = seed_bootstrap_admin(&db, &bootstrap(), 4).await.unwrap();
        assert!(second.is_none());
        assert_eq!(db.admins().count().await.unwrap(), 1);
    }
}
