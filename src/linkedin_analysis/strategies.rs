// src/linkedin_analysis/strategies.rs
//! Heuristics that turn normalized profile text into job entries.

use super::months::{self, DateRange};
use super::normalize::ProfileText;
use super::types::{IdGenerator, JobEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `Software Engineer at Acme Corp Jan 2020 - Present`
    TitleAtCompany,
    /// `Acme Corp - Software Engineer Jan 2020 - Dec 2022`
    CompanyDashTitle,
    /// Company, title and date range on three consecutive lines.
    LineTriplet,
}

impl Strategy {
    /// Order in which the extractor tries the strategies.
    pub const PRIORITY: [Strategy; 3] = [
        Strategy::TitleAtCompany,
        Strategy::CompanyDashTitle,
        Strategy::LineTriplet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::TitleAtCompany => "title_at_company",
            Strategy::CompanyDashTitle => "company_dash_title",
            Strategy::LineTriplet => "line_triplet",
        }
    }

    pub fn try_extract(&self, text: &ProfileText, ids: &mut dyn IdGenerator) -> Vec<JobEntry> {
        match self {
            Strategy::TitleAtCompany => scan_flat(&text.flat, ids, split_title_at_company),
            Strategy::CompanyDashTitle => scan_flat(&text.flat, ids, split_company_dash_title),
            Strategy::LineTriplet => line_triplets(&text.lines, ids),
        }
    }
}

/// Splits the free text preceding a date range into `(title, company)`.
type FreeTextSplit = fn(&str) -> Option<(&str, &str)>;

fn scan_flat(flat: &str, ids: &mut dyn IdGenerator, split: FreeTextSplit) -> Vec<JobEntry> {
    let mut jobs = Vec::new();
    let mut cursor = 0;

    for range in months::find_date_ranges(flat) {
        let preceding = &flat[cursor..range.span.start];
        cursor = range.span.end;

        if let Some((title, company)) = split(free_text_before(preceding)) {
            jobs.push(build_entry(ids, title, company, &range));
        }
    }

    jobs
}

/// Trailing run of free-text characters, never reaching back past a dated
/// month token, with bullet hyphens stripped from both ends.
fn free_text_before(preceding: &str) -> &str {
    let preceding = match months::last_dated_month_end(preceding) {
        Some(end) => &preceding[end..],
        None => preceding,
    };

    let start = preceding
        .char_indices()
        .rev()
        .find(|(_, c)| !is_free_text_char(*c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);

    // A leading or trailing hyphen is a bullet or a leftover separator.
    preceding[start..].trim_matches(|c: char| c.is_whitespace() || c == '-')
}

fn is_free_text_char(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            ' ' | ',' | '.' | '&' | '(' | ')' | '/' | '-' | '\'' | '\u{2019}'
        )
}

/// Splits at the first ` at `, so the company keeps any later ` at `.
fn split_title_at_company(free_text: &str) -> Option<(&str, &str)> {
    let (title, company) = free_text.split_once(" at ")?;
    non_empty_pair(title, company)
}

fn split_company_dash_title(free_text: &str) -> Option<(&str, &str)> {
    let at = separator_hyphen(free_text)?;
    let company = &free_text[..at];
    let title = &free_text[at + 1..];
    non_empty_pair(title, company)
}

/// First `-` that is not joining two alphanumerics, so `Co-founder` and
/// `e-commerce` stay whole.
fn separator_hyphen(text: &str) -> Option<usize> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();

    chars.iter().enumerate().find_map(|(pos, &(offset, c))| {
        if c != '-' {
            return None;
        }
        let joined_before = pos > 0 && chars[pos - 1].1.is_alphanumeric();
        let joined_after = chars.get(pos + 1).is_some_and(|(_, next)| next.is_alphanumeric());
        (!(joined_before && joined_after)).then_some(offset)
    })
}

fn non_empty_pair<'t>(title: &'t str, company: &'t str) -> Option<(&'t str, &'t str)> {
    let title = title.trim();
    let company = company.trim();
    if title.is_empty() || company.is_empty() {
        None
    } else {
        Some((title, company))
    }
}

fn line_triplets(lines: &[String], ids: &mut dyn IdGenerator) -> Vec<JobEntry> {
    let mut jobs = Vec::new();

    for (index, line) in lines.iter().enumerate().skip(2) {
        let Some(range) = months::leading_date_range(line) else {
            continue;
        };

        let company = &lines[index - 2];
        let title = &lines[index - 1];
        if months::is_date_range_line(company) || months::is_date_range_line(title) {
            continue;
        }

        jobs.push(build_entry(ids, title, company, &range));
    }

    jobs
}

fn build_entry(ids: &mut dyn IdGenerator, title: &str, company: &str, range: &DateRange) -> JobEntry {
    JobEntry::new(ids.next_id(), title, company, range.start, range.end)
}
