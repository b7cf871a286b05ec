// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::core::ConfigManager;
use crate::linkedin_analysis::ProfileCrawler;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[post("/experience/extract", data = "<request>")]
pub async fn extract_experience(
    request: Json<StandardRequest<ExtractRequest>>,
) -> Json<DataResponse<ExperienceData>> {
    handlers::extract_experience_handler(request).await
}

#[post("/experience/linkedin", data = "<request>")]
pub async fn linkedin_experience(
    request: Json<StandardRequest<LinkedinExperienceRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<ExperienceData>>, Json<StandardErrorResponse>> {
    handlers::linkedin_experience_handler(request, state).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Endpoint not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Available endpoints: /api/experience/extract, /api/experience/linkedin, /api/health"
            .to_string()],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be parsed".to_string(),
        "UNPROCESSABLE_ENTITY".to_string(),
        vec![
            "Send `text` for /experience/extract".to_string(),
            "Send `linkedin_url` for /experience/linkedin".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

fn mount_api(rocket: Rocket<Build>, state: AppState) -> Rocket<Build> {
    rocket
        .attach(Cors)
        .manage(state)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![extract_experience, linkedin_experience, health, options],
        )
}

/// Rocket instance with default settings, used by the local test client.
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    mount_api(rocket::build(), state)
}

// Main server start function
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let crawler = ProfileCrawler::new(&config.crawler)?;

    info!("Starting QuickCV experience API server");
    info!("Environment: {}", config.environment);
    info!("Crawler: {}", crawler.base_url());
    info!("Server: http://0.0.0.0:{}", config.server.port);

    let figment = rocket::Config::figment()
        .merge(("port", config.server.port))
        .merge(("address", "0.0.0.0"));

    let _rocket = mount_api(rocket::custom(figment), AppState { crawler })
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket server failed: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CrawlerConfig;
    use rocket::http::ContentType;
    use rocket::local::blocking::Client;
    use serde_json::Value;

    fn client() -> Client {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let crawler = ProfileCrawler::new(&CrawlerConfig {
            base_url: format!("http://{}", addr),
            api_key: None,
            timeout_seconds: 2,
        })
        .unwrap();

        Client::tracked(build_rocket(AppState { crawler })).unwrap()
    }

    #[test]
    fn test_extract_experience_route() {
        let client = client();
        let response = client
            .post("/api/experience/extract")
            .header(ContentType::JSON)
            .body(
                r#"{"text": "Software Engineer at Acme Corp Jan 2020 - Present", "conversation_id": "c-1"}"#,
            )
            .dispatch();

        assert_eq!(response.status(), Status::Ok);
        assert!(response
            .headers()
            .get_one("Access-Control-Allow-Origin")
            .is_some());

        let body: Value = response.into_json().unwrap();
        assert_eq!(body["type"], "data");
        assert_eq!(body["success"], true);
        assert_eq!(body["conversation_id"], "c-1");
        assert_eq!(body["data"]["source"], "text");
        assert_eq!(body["data"]["job_count"], 1);
        assert_eq!(body["data"]["jobs"][0]["title"], "Software Engineer");
        assert_eq!(body["data"]["jobs"][0]["company"], "Acme Corp");
        assert_eq!(body["data"]["jobs"][0]["startDate"], "Jan 2020");
        assert_eq!(body["data"]["jobs"][0]["endDate"], "Present");
    }

    #[test]
    fn test_extract_experience_without_matches() {
        let client = client();
        let response = client
            .post("/api/experience/extract")
            .header(ContentType::JSON)
            .body(r#"{"text": ""}"#)
            .dispatch();

        let body: Value = response.into_json().unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["job_count"], 0);
        assert!(body.get("conversation_id").is_none());
    }

    #[test]
    fn test_linkedin_experience_requires_url() {
        let client = client();
        let response = client
            .post("/api/experience/linkedin")
            .header(ContentType::JSON)
            .body(r#"{"linkedin_url": "  "}"#)
            .dispatch();

        let body: Value = response.into_json().unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error_code"], "INVALID_URL");
    }

    #[test]
    fn test_linkedin_experience_degrades_to_empty() {
        let client = client();
        let response = client
            .post("/api/experience/linkedin")
            .header(ContentType::JSON)
            .body(r#"{"linkedin_url": "https://www.linkedin.com/in/jane"}"#)
            .dispatch();

        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["source"], "linkedin");
        assert_eq!(body["data"]["jobs"], Value::Array(Vec::new()));
    }

    #[test]
    fn test_health_and_unknown_routes() {
        let client = client();

        let health = client.get("/api/health").dispatch();
        assert_eq!(health.status(), Status::Ok);
        assert_eq!(health.into_string().as_deref(), Some("\"OK\""));

        let missing = client.get("/api/nope").dispatch();
        assert_eq!(missing.status(), Status::NotFound);
        let body: Value = missing.into_json().unwrap();
        assert_eq!(body["error_code"], "NOT_FOUND");
    }

    #[test]
    fn test_malformed_body_is_caught() {
        let client = client();
        let response = client
            .post("/api/experience/extract")
            .header(ContentType::JSON)
            .body(r#"{"content": "missing text field"}"#)
            .dispatch();

        assert_eq!(response.status(), Status::UnprocessableEntity);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body["error_code"], "UNPROCESSABLE_ENTITY");
    }
}
