use actix_files as fs;
use actix_web::dev::Server;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;

use crate::configuration::Settings;
use crate::metrics::{AppMetrics, MetricsMiddleware};
use crate::routes::{
    admin_metrics, admin_reset, create_chirp, create_user, delete_chirp, get_chirp, get_chirps,
    health_check, login, refresh, revoke, update_user,
};
use crate::storage::Storage;

pub fn run(
    listener: TcpListener,
    storage: Arc<dyn Storage>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let storage = web::Data::from(storage);
    let auth_settings = web::Data::new(settings.auth.clone());
    let app_settings = web::Data::new(settings.application.clone());
    let metrics = web::Data::new(AppMetrics::default());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())

            // Shared state
            .app_data(storage.clone())
            .app_data(auth_settings.clone())
            .app_data(app_settings.clone())
            .app_data(metrics.clone())

            .service(
                web::scope("/api")
                    .route("/healthz", web::get().to(health_check))
                    .route("/users", web::post().to(create_user))
                    .route("/users", web::put().to(update_user))
                    .route("/login", web::post().to(login))
                    .route("/refresh", web::post().to(refresh))
                    .route("/revoke", web::post().to(revoke))
                    .route("/chirps", web::post().to(create_chirp))
                    .route("/chirps", web::get().to(get_chirps))
                    .route("/chirps/{chirp_id}", web::get().to(get_chirp))
                    .route("/chirps/{chirp_id}", web::delete().to(delete_chirp)),
            )
            .service(
                web::scope("/admin")
                    .route("/metrics", web::get().to(admin_metrics))
                    .route("/reset", web::post().to(admin_reset)),
            )

            // Static file serving, counted by the hit-tracking middleware
            .service(
                web::scope("/app")
                    .wrap(MetricsMiddleware::new(metrics.clone()))
                    .service(fs::Files::new("/", "./public").index_file("index.html")),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
