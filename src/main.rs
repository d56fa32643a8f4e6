use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use topmarket::auth::rate_limit::LoginThrottle;
use topmarket::config::AppConfig;
use topmarket::reminders::{HttpMailer, scheduler};
use topmarket::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let pool = db::init_pool(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;
    db::run_migrations(&pool).await.map_err(std::io::Error::other)?;
    if let Err(e) = db::seed_admin(&pool, &config).await {
        log::error!("Failed to seed admin account: {e}");
    }

    // Session encryption key from SESSION_KEY so sessions survive restarts
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let mailer = match config.email.clone() {
        Some(email) => Some(HttpMailer::new(email).map_err(std::io::Error::other)?),
        None => None,
    };
    match (&mailer, config.reminder_interval) {
        (Some(m), Some(every)) => {
            log::info!("Reminder scheduler every {}s", every.as_secs());
            scheduler::spawn_scheduler(
                pool.clone(),
                m.clone(),
                config.app_name.clone(),
                config.app_url.clone(),
                every,
            );
        }
        (None, Some(_)) => log::warn!("REMINDER_INTERVAL_SECS set but email is not configured"),
        _ => {}
    }
    if mailer.is_none() {
        log::info!("EMAIL_API_KEY not set, reminders disabled");
    }

    let throttle = web::Data::new(LoginThrottle::default());
    let mailer = mailer.map(web::Data::new);
    let bind_addr = config.bind_addr.clone();
    let cookie_secure = config.cookie_secure;
    let config = web::Data::new(config);

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .build();

        let mut app = App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(config.clone())
            .app_data(throttle.clone());
        if let Some(m) = &mailer {
            app = app.app_data(m.clone());
        }
        app.configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}
