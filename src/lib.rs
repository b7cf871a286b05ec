//! QuickCV profile experience extraction.
//!
//! Turns raw text scraped from a professional profile page into structured
//! job entries, and serves that over HTTP and a CLI.

pub mod cli;
pub mod core;
pub mod linkedin_analysis;
pub mod web;

pub use linkedin_analysis::{
    extract_jobs, extract_jobs_with, ExperienceExtractor, IdGenerator, JobEntry, ProfileCrawler,
    Strategy, UuidGenerator,
};
pub use web::start_web_server;
