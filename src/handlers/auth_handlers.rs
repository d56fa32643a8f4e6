use std::net::{IpAddr, Ipv4Addr};

use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::roles::Role;
use crate::auth::session::{self, get_user_id};
use crate::auth::{csrf, password, rate_limit::LoginThrottle};
use crate::config::AppConfig;
use crate::errors::{AppError, redirect, render};
use crate::models::user;
use crate::templates_structs::LoginTemplate;

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn login_form(session: &Session, config: &AppConfig, email: &str, error: Option<&str>) -> Result<HttpResponse, AppError> {
    let tmpl = LoginTemplate {
        error: error.map(str::to_string),
        app_name: config.app_name.clone(),
        csrf_token: csrf::get_or_create_token(session),
        email: email.to_string(),
    };
    render(tmpl)
}

pub async fn login_page(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    if get_user_id(&session).is_some() {
        return Ok(redirect("/dashboard"));
    }
    login_form(&session, &config, "", None)
}

pub async fn login_submit(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<LoginForm>,
    throttle: web::Data<LoginThrottle>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let email = form.email.trim();
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    // Throttle check BEFORE any database access
    if throttle.is_blocked(ip, email) {
        log::warn!("Login throttled for {email} from {ip} ({} pair(s) tracked)", throttle.tracked());
        return login_form(
            &session,
            &config,
            email,
            Some("Demasiados intentos fallidos. Intenta de nuevo más tarde."),
        );
    }

    let found = user::find_by_email(&pool, email).await?;

    let Some(u) = found.filter(|u| u.activo) else {
        throttle.record_failure(ip, email);
        return login_form(&session, &config, email, Some("Correo o contraseña incorrectos"));
    };

    if !password::verify_password(&form.password, &u.password_hash).unwrap_or(false) {
        throttle.record_failure(ip, email);
        return login_form(&session, &config, email, Some("Correo o contraseña incorrectos"));
    }

    let Some(role) = u.parsed_role() else {
        log::warn!("User {} has unknown role '{}'", u.email, u.role);
        return login_form(
            &session,
            &config,
            email,
            Some("Tu usuario no tiene un rol asignado. Contacta al administrador."),
        );
    };

    throttle.clear(ip, email);
    session::sign_in(&session, u.id, &u.email, &u.nombre, role)?;
    log::info!("User {} signed in as {}", u.email, role);
    Ok(redirect(&role.home_path()))
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(redirect("/login"))
}

/// `/dashboard` sends everyone to the home page of their effective role.
pub async fn dashboard(session: Session) -> Result<HttpResponse, AppError> {
    let user = session::current_user(&session)?;
    let role: Role = user.effective_role();
    Ok(redirect(&role.home_path()))
}
