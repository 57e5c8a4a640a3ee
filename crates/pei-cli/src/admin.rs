use anyhow::{Context, bail};
use pei_core::hash_password;
use pei_core::permissions::Role;
use sqlx::PgPool;
use uuid::Uuid;

/// Inserts an `Administrador` user and returns its id.
///
/// Fails if the email is already taken.
pub async fn create_admin(db: &PgPool, name: &str, email: &str, password: &str) -> anyhow::Result<Uuid> {
    if password.len() < 8 {
        bail!("Password must be at least 8 characters");
    }

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM usuarios WHERE email = $1)")
        .bind(email)
        .fetch_one(db)
        .await
        .context("Failed to check existing users")?;
    if exists {
        bail!("A user with email {email} already exists");
    }

    let senha_hash = hash_password(password).map_err(|e| e.error)?;
    let role = Role::Administrador
        .as_str()
        .context("Administrador must have a role name")?;

    let id = sqlx::query_scalar(
        "INSERT INTO usuarios (nome, email, senha_hash, perfil) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(&senha_hash)
    .bind(role)
    .fetch_one(db)
    .await
    .context("Failed to insert admin user")?;

    Ok(id)
}
