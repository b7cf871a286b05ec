// src/web/types.rs
use crate::linkedin_analysis::{JobEntry, ProfileCrawler};
use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};

/// Managed state shared by all routes.
pub struct AppState {
    pub crawler: ProfileCrawler,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct LinkedinExperienceRequest {
    pub linkedin_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ExperienceSource {
    Text,
    Linkedin,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ExperienceData {
    pub jobs: Vec<JobEntry>,
    pub job_count: usize,
    pub source: ExperienceSource,
    pub extracted_at: DateTime<Utc>,
}

impl ExperienceData {
    pub fn new(jobs: Vec<JobEntry>, source: ExperienceSource) -> Self {
        Self {
            job_count: jobs.len(),
            jobs,
            source,
            extracted_at: Utc::now(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Data,
    Error,
}

// Request types with conversation_id support
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

pub trait WithConversationId {
    fn conversation_id(&self) -> Option<String>;
}

impl<T> WithConversationId for StandardRequest<T> {
    fn conversation_id(&self) -> Option<String> {
        self.conversation_id.clone()
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            conversation_id,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        conversation_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            conversation_id,
        }
    }
}
