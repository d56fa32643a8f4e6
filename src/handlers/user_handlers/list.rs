use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::roles::Capability;
use crate::auth::session::require;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::user;
use crate::templates_structs::{PageContext, UserListTemplate};

/// GET /usuarios
pub async fn list(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let current = require(&session, Capability::ManageUsers)?;

    let users = user::find_all(&pool).await?;
    let ctx = PageContext::build(&session, &current, &config.app_name, "/usuarios");
    render(UserListTemplate { ctx, users, current_user_id: current.id })
}
