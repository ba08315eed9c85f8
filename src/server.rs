/// HTTP server exposing the dashboard pipeline as JSON
use actix_web::{middleware, web, App, Error, HttpRequest, HttpResponse, HttpServer};
use actix_web_actors::ws;
use log::info;
use std::sync::Arc;

use crate::messages::{CriteriaRequest, RecordsResponse, ServerMessage};
use crate::session::compute_dashboard;
use crate::store::RecordStore;
use crate::view::filter;
use crate::websocket::{AppState, DashboardWebSocket};

/// WebSocket endpoint handler
async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(DashboardWebSocket::new(state.new_session()), &req, stream)
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "records": state.store.len(),
    }))
}

/// Available and default selections for the four filters
async fn options(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ServerMessage::Options {
        filters: state.new_session().options(),
    })
}

/// Metrics and chart tables for the posted criteria
async fn dashboard(state: web::Data<AppState>, body: web::Json<CriteriaRequest>) -> HttpResponse {
    match body.into_inner().into_criteria(&state.store) {
        Ok(criteria) => HttpResponse::Ok().json(compute_dashboard(&state.store, &criteria)),
        Err(e) => bad_request(e),
    }
}

/// Filtered rows for the detailed data table
async fn records(state: web::Data<AppState>, body: web::Json<CriteriaRequest>) -> HttpResponse {
    match body.into_inner().into_criteria(&state.store) {
        Ok(criteria) => {
            let view = filter(&state.store, &criteria);
            HttpResponse::Ok().json(RecordsResponse {
                count: view.len(),
                records: view.records().collect(),
            })
        }
        Err(e) => bad_request(e),
    }
}

fn bad_request(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(ServerMessage::Error { message: e.to_string() })
}

/// Register every route on an app. Shared by `run_server` and tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/ws", web::get().to(ws_index))
        .route("/health", web::get().to(health_check))
        .route("/api/options", web::get().to(options))
        .route("/api/dashboard", web::post().to(dashboard))
        .route("/api/records", web::post().to(records));
}

/// Start the HTTP server over an already loaded store
pub async fn run_server(host: &str, port: u16, store: Arc<RecordStore>) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(store));

    info!("SalaryDash server listening on http://{}:{}", host, port);
    info!("WebSocket endpoint: ws://{}:{}/ws", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            // CORS for development
            .wrap(
                actix_cors::Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use actix_web::{test, App};

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(Arc::new(RecordStore::from_records(vec![
            Record::new(2023, "senior", "full-time", "large", "Data Scientist", "remote", "USA", 150000.0),
            Record::new(2023, "junior", "full-time", "small", "Analyst", "onsite", "BRA", 40000.0),
        ]))))
    }

    #[actix_web::test]
    async fn test_dashboard_endpoint() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/dashboard")
            .set_json(serde_json::json!({"sizes": ["large"]}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["metrics"]["record_count"], 1);
        assert_eq!(body["metrics"]["mean_compensation"], 150000.0);
        assert_eq!(body["charts"]["top_titles"]["status"], "ready");
    }

    #[actix_web::test]
    async fn test_dashboard_endpoint_rejects_unknown_values() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/dashboard")
            .set_json(serde_json::json!({"years": [1999]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_records_and_options_endpoints() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/records")
            .set_json(serde_json::json!({"years": []}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 0);

        let req = test::TestRequest::get().uri("/api/options").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["type"], "Options");
        assert_eq!(body["filters"][0]["available"], serde_json::json!([2023]));
    }
}
