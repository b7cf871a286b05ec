// src/web/handlers/experience_handlers.rs

use crate::linkedin_analysis::{extract_jobs, UuidGenerator};
use crate::web::types::{
    AppState, DataResponse, ExperienceData, ExperienceSource, ExtractRequest,
    LinkedinExperienceRequest, StandardErrorResponse, StandardRequest, WithConversationId,
};

use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

pub async fn extract_experience_handler(
    request: Json<StandardRequest<ExtractRequest>>,
) -> Json<DataResponse<ExperienceData>> {
    let conversation_id = request.conversation_id();
    let jobs = extract_jobs(&request.data.text);

    info!(
        "Extracted {} jobs from {} characters of profile text",
        jobs.len(),
        request.data.text.len()
    );

    Json(DataResponse::success(
        summary_message(jobs.len()),
        ExperienceData::new(jobs, ExperienceSource::Text),
        conversation_id,
    ))
}

pub async fn linkedin_experience_handler(
    request: Json<StandardRequest<LinkedinExperienceRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<ExperienceData>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let linkedin_url = request.data.linkedin_url.trim();

    if linkedin_url.is_empty() {
        warn!("LinkedIn experience requested without a profile URL");
        return Err(Json(StandardErrorResponse::new(
            "A LinkedIn profile URL is required".to_string(),
            "INVALID_URL".to_string(),
            vec![
                "Provide the full profile URL, e.g. https://www.linkedin.com/in/<handle>"
                    .to_string(),
            ],
            conversation_id,
        )));
    }

    // Fetch failures come back as an empty list, never as an error.
    let jobs = state
        .crawler
        .fetch_jobs(linkedin_url, &mut UuidGenerator)
        .await;

    Ok(Json(DataResponse::success(
        summary_message(jobs.len()),
        ExperienceData::new(jobs, ExperienceSource::Linkedin),
        conversation_id,
    )))
}

fn summary_message(count: usize) -> String {
    match count {
        0 => "No job entries found".to_string(),
        1 => "Found 1 job entry".to_string(),
        n => format!("Found {} job entries", n),
    }
}
