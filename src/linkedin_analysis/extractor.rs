// src/linkedin_analysis/extractor.rs
use super::normalize::ProfileText;
use super::strategies::Strategy;
use super::types::{IdGenerator, JobEntry, UuidGenerator};
use tracing::debug;

/// Runs strategies in order and keeps the first non-empty result.
#[derive(Debug, Clone)]
pub struct ExperienceExtractor {
    strategies: Vec<Strategy>,
}

impl Default for ExperienceExtractor {
    fn default() -> Self {
        Self {
            strategies: Strategy::PRIORITY.to_vec(),
        }
    }
}

impl ExperienceExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategies(strategies: Vec<Strategy>) -> Self {
        Self { strategies }
    }

    pub fn extract(&self, text: &str, ids: &mut dyn IdGenerator) -> Vec<JobEntry> {
        let profile = ProfileText::new(text);
        if profile.is_empty() {
            return Vec::new();
        }

        for strategy in &self.strategies {
            let jobs = strategy.try_extract(&profile, ids);
            if !jobs.is_empty() {
                debug!(
                    strategy = strategy.name(),
                    count = jobs.len(),
                    "Extracted job entries from profile text"
                );
                return jobs;
            }
        }

        debug!(
            chars = profile.flat.len(),
            "No experience pattern matched profile text"
        );
        Vec::new()
    }
}

/// Extracts job entries with random UUID identifiers.
pub fn extract_jobs(text: &str) -> Vec<JobEntry> {
    extract_jobs_with(text, &mut UuidGenerator)
}

pub fn extract_jobs_with(text: &str, ids: &mut dyn IdGenerator) -> Vec<JobEntry> {
    ExperienceExtractor::default().extract(text, ids)
}
