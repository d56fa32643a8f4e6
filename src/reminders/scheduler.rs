use std::time::Duration;

use sqlx::PgPool;

use super::HttpMailer;

/// Send the reminder batch every `every`, starting one full interval after boot.
pub fn spawn_scheduler(pool: PgPool, mailer: HttpMailer, app_name: String, app_url: String, every: Duration) {
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // The first tick fires immediately; skip it so a restart does not resend.
        interval.tick().await;
        loop {
            interval.tick().await;
            log::info!("Running reminder scheduler");
            if let Err(e) = super::run(&pool, &mailer, &app_name, &app_url).await {
                log::error!("Scheduler: failed to load reminder roster: {}", e);
            }
        }
    });
}
