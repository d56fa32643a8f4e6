use actix_session::Session;
use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse};
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::roles::Capability;
use crate::auth::session::current_user;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::reminders::{self, HttpMailer};
use crate::templates_structs::ApiErrorResponse;

/// True when `header` is `Bearer <secret>`. An unset secret never matches.
pub fn bearer_matches(header: Option<&str>, secret: Option<&str>) -> bool {
    let (Some(header), Some(secret)) = (header, secret) else {
        return false;
    };
    match header.strip_prefix("Bearer ") {
        Some(token) => {
            let token = token.trim().as_bytes();
            let secret = secret.as_bytes();
            token.len() == secret.len()
                && token.iter().zip(secret).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
        }
        None => false,
    }
}

/// A signed-in admin may trigger a run only by POST carrying the session's
/// CSRF token in `X-CSRF-Token`. Cookies alone never authorize a run.
fn admin_request(req: &HttpRequest, session: &Session) -> bool {
    if *req.method() != Method::POST {
        return false;
    }
    let Some(token) = req.headers().get("x-csrf-token").and_then(|v| v.to_str().ok()) else {
        return false;
    };
    current_user(session).is_ok_and(|u| u.can(Capability::TriggerReminders))
        && csrf::validate_csrf(session, token).is_ok()
}

/// GET/POST /api/recordatorios
///
/// Called by an external cron with `Authorization: Bearer $CRON_SECRET`, or by
/// a signed-in admin over POST.
pub async fn trigger(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    mailer: Option<web::Data<HttpMailer>>,
) -> Result<HttpResponse, AppError> {
    let header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok());
    let by_cron = bearer_matches(header, config.cron_secret.as_deref());
    let by_admin = !by_cron && admin_request(&req, &session);

    if !by_cron && !by_admin {
        log::warn!("Rejected reminder trigger from {:?}", req.peer_addr());
        return Ok(HttpResponse::Unauthorized().json(ApiErrorResponse::new("Unauthorized")));
    }

    let Some(mailer) = mailer else {
        return Ok(HttpResponse::ServiceUnavailable()
            .json(ApiErrorResponse::new("Email delivery is not configured")));
    };

    let summary = reminders::run(&pool, mailer.get_ref(), &config.app_name, &config.app_url).await?;
    Ok(HttpResponse::Ok().json(summary))
}
