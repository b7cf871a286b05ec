// src/linkedin_analysis/types.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// End-date sentinel for a position that is still held.
pub const PRESENT: &str = "Present";

/// One employment stint found in profile text.
///
/// Dates are kept as the literal tokens found in the text ("Jan 2020"),
/// never parsed into calendar values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    pub id: String,
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl JobEntry {
    pub fn new(
        id: String,
        title: &str,
        company: &str,
        start_date: &str,
        end_date: &str,
    ) -> Self {
        Self {
            id,
            title: title.trim().to_string(),
            company: company.trim().to_string(),
            start_date: start_date.trim().to_string(),
            end_date: end_date.trim().to_string(),
            description: None,
        }
    }
}

/// Source of job entry identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs, used outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> String,
{
    fn next_id(&mut self) -> String {
        (*self)()
    }
}

// Request format for the crawling API contents endpoint
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CrawlRequest<'a> {
    pub urls: Vec<&'a str>,
    pub text: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CrawlResponse {
    #[serde(default)]
    pub results: Vec<CrawledPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CrawledPage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub text: String,
}
