/// Admin Routes
///
/// Hit-counter metrics page and counter reset. Reset is destructive, so it
/// is only allowed on the dev platform.

use actix_web::{web, HttpResponse};

use crate::configuration::ApplicationSettings;
use crate::error::{AppError, AuthError};
use crate::metrics::AppMetrics;

/// GET /admin/metrics
pub async fn admin_metrics(metrics: web::Data<AppMetrics>) -> HttpResponse {
    HttpResponse::Ok().content_type("text/html").body(format!(
        r#"<html>
    <body>
        <h1>Welcome, Chirpy Admin</h1>
        <p>Chirpy has been visited {} times!</p>
    </body>
</html>"#,
        metrics.hits()
    ))
}

/// POST /admin/reset
pub async fn admin_reset(
    metrics: web::Data<AppMetrics>,
    app_settings: web::Data<ApplicationSettings>,
) -> Result<HttpResponse, AppError> {
    if app_settings.platform != "dev" {
        return Err(AuthError::Forbidden.into());
    }

    metrics.reset();

    Ok(HttpResponse::Ok().content_type("text/plain").body("OK"))
}
