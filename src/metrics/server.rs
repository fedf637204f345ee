use actix_web::{dev::Server, web, App, HttpResponse, HttpServer, Responder};
use prometheus::{Encoder, Registry, TextEncoder};
use std::sync::Arc;

use crate::domain::participant::RegistryService;

/// Build the metrics HTTP server. The returned future must be driven by an
/// actix system.
pub fn start_metrics_server(
    registry: Arc<Registry>,
    service: Arc<RegistryService>,
    port: u16,
) -> std::io::Result<Server> {
    tracing::info!("📊 Starting metrics server on http://0.0.0.0:{}/metrics", port);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::Data::new(service.clone()))
            .route("/metrics", web::get().to(metrics_handler))
            .route("/health", web::get().to(health_handler))
    })
    .bind(("0.0.0.0", port))?
    .run();

    Ok(server)
}

async fn metrics_handler(registry: web::Data<Arc<Registry>>) -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

async fn health_handler(service: web::Data<Arc<RegistryService>>) -> impl Responder {
    let summary = service.summary().await;

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "participant-registry",
        "registry": summary,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, test};

    use crate::domain::participant::ParticipantId;
    use crate::messaging::LoggingPublisher;
    use crate::metrics::Metrics;

    #[actix_web::test]
    async fn test_health_reports_registry_summary() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let service = Arc::new(RegistryService::new(
            ParticipantId::new(),
            Arc::new(LoggingPublisher),
            metrics,
        ));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service))
                .route("/health", web::get().to(health_handler)),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["registry"]["total"], 0);
        assert_eq!(json["registry"]["minimum_age"], 18);
        assert_eq!(json["registry"]["capacity"], 1000);
    }

    #[actix_web::test]
    async fn test_metrics_endpoint_exposes_text_format() {
        let metrics = Metrics::new().unwrap();
        metrics.record_minimum_age(18);
        let registry = Arc::new(metrics.registry().clone());

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(registry))
                .route("/metrics", web::get().to(metrics_handler)),
        )
        .await;

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = String::from_utf8(body.to_vec()).unwrap();

        assert!(text.contains("registry_minimum_age 18"));
    }
}
