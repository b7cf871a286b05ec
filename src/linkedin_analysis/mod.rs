// src/linkedin_analysis/mod.rs
//! Job history extraction from professional profile text.

pub mod extractor;
pub mod months;
pub mod normalize;
pub mod profile_crawler;
pub mod strategies;
pub mod types;

pub use extractor::{extract_jobs, extract_jobs_with, ExperienceExtractor};
pub use profile_crawler::ProfileCrawler;
pub use strategies::Strategy;
pub use types::{IdGenerator, JobEntry, UuidGenerator, PRESENT};
