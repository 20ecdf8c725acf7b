/// File-server hit counting
///
/// A process-wide counter incremented by middleware on every request that
/// reaches the static file server, surfaced on the admin metrics page.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Default)]
pub struct AppMetrics {
    fileserver_hits: AtomicI64,
}

impl AppMetrics {
    pub fn hits(&self) -> i64 {
        self.fileserver_hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.fileserver_hits.store(0, Ordering::Relaxed);
    }

    fn increment(&self) {
        self.fileserver_hits.fetch_add(1, Ordering::Relaxed);
    }
}

/// Middleware that counts every request passing through it.
pub struct MetricsMiddleware {
    metrics: web::Data<AppMetrics>,
}

impl MetricsMiddleware {
    pub fn new(metrics: web::Data<AppMetrics>) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(MetricsMiddlewareService {
            service: Rc::new(service),
            metrics: self.metrics.clone(),
        }))
    }
}

pub struct MetricsMiddlewareService<S> {
    service: Rc<S>,
    metrics: web::Data<AppMetrics>,
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        self.metrics.increment();

        let service = self.service.clone();
        Box::pin(async move { service.call(req).await })
    }
}
