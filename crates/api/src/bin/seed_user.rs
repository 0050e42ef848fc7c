//! Create a user, or reset the password and role of an existing one.
//!
//! | Env Var         | Default  |
//! |-----------------|----------|
//! | `DATABASE_URL`  | required |
//! | `SEED_LOGIN`    | required |
//! | `SEED_PASSWORD` | required |
//! | `SEED_ROLE`     | `user`   |

use anyhow::{bail, Context};
use minicrm_api::auth::password::{Argon2Hasher, PasswordHasher};
use minicrm_core::roles::Role;
use minicrm_db::models::user::CreateUser;
use minicrm_db::repositories::UserRepo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minicrm_seed_user=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let login = std::env::var("SEED_LOGIN").context("SEED_LOGIN must be set")?;
    let password = std::env::var("SEED_PASSWORD").context("SEED_PASSWORD must be set")?;
    let role: Role = std::env::var("SEED_ROLE")
        .unwrap_or_else(|_| "user".into())
        .parse()
        .context("SEED_ROLE must be 'admin' or 'user'")?;

    if login.trim().is_empty() || password.is_empty() {
        bail!("SEED_LOGIN and SEED_PASSWORD must not be empty");
    }

    let pool = minicrm_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    minicrm_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let existed = UserRepo::find_by_login(&pool, login.trim()).await?.is_some();
    let password_hash = tokio::task::spawn_blocking(move || Argon2Hasher.hash(&password))
        .await?
        .context("Failed to hash password")?;

    let user = UserRepo::upsert_credentials(
        &pool,
        &CreateUser {
            login: login.trim().to_string(),
            password_hash,
            role,
        },
    )
    .await
    .context("Failed to store user")?;

    if existed {
        tracing::info!(user_id = user.id, login = %user.login, role = %user.role, "Password and role reset");
    } else {
        tracing::info!(user_id = user.id, login = %user.login, role = %user.role, "User created");
    }
    Ok(())
}
