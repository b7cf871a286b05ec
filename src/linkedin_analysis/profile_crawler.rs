// src/linkedin_analysis/profile_crawler.rs
use super::extractor::extract_jobs_with;
use super::normalize::{normalize_flat, normalize_lines};
use super::types::{CrawlRequest, CrawlResponse, IdGenerator, JobEntry};
use crate::core::config_manager::CrawlerConfig;
use anyhow::{Context, Result};
use reqwest::Client;
use scraper::{ElementRef, Html};
use tracing::{info, warn};

const CONTENTS_ENDPOINT: &str = "/contents";

const SKIPPED_TAGS: [&str; 5] = ["script", "style", "noscript", "template", "head"];

const BLOCK_TAGS: [&str; 21] = [
    "p", "div", "li", "ul", "ol", "br", "h1", "h2", "h3", "h4", "h5", "h6", "section", "article",
    "header", "footer", "tr", "td", "dt", "dd", "main",
];

/// Client for the external crawling API that returns page text for a
/// profile URL.
pub struct ProfileCrawler {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ProfileCrawler {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("quickcv/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Raw text of the profile page, with HTML flattened to lines.
    pub async fn fetch_profile_text(&self, profile_url: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, CONTENTS_ENDPOINT);
        info!("Fetching profile text for {} via {}", profile_url, url);

        let mut request = self.client.post(&url).json(&CrawlRequest {
            urls: vec![profile_url],
            text: true,
        });
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to crawling API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Crawling API returned error {}: {}", status, error_text);
        }

        let crawl: CrawlResponse = response
            .json()
            .await
            .context("Failed to parse crawling API response")?;

        let page = crawl
            .results
            .into_iter()
            .find(|page| !page.text.trim().is_empty())
            .context("Crawling API returned no text for profile")?;

        info!(
            "Received {} characters for {}",
            page.text.len(),
            page.url.as_deref().unwrap_or(profile_url)
        );

        if looks_like_html(&page.text) {
            Ok(html_to_text(&page.text))
        } else {
            Ok(page.text)
        }
    }

    /// Fetches and extracts in one step. Any fetch failure is logged and
    /// yields no jobs.
    pub async fn fetch_jobs<G>(&self, profile_url: &str, ids: &mut G) -> Vec<JobEntry>
    where
        G: IdGenerator + Send,
    {
        match self.fetch_profile_text(profile_url).await {
            Ok(text) => {
                let jobs = extract_jobs_with(&text, ids);
                info!("Extracted {} jobs from {}", jobs.len(), profile_url);
                jobs
            }
            Err(e) => {
                warn!("Profile fetch failed for {}: {:#}", profile_url, e);
                Vec::new()
            }
        }
    }
}

fn looks_like_html(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with('<') && (trimmed.contains("</") || trimmed.contains("/>"))
}

/// Visible text of an HTML page, one line per block element.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();
    collect_text(document.root_element(), &mut text);

    normalize_lines(&text).join("\n")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(fragment) = child.value().as_text() {
            push_fragment(fragment, out);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if SKIPPED_TAGS.contains(&name) {
                continue;
            }

            let block = BLOCK_TAGS.contains(&name);
            if block {
                out.push('\n');
            }
            collect_text(child_element, out);
            if block {
                out.push('\n');
            }
        }
    }
}

/// Inline text nodes are joined as written: `Soft<b>ware</b>` stays one word.
fn push_fragment(fragment: &str, out: &mut String) {
    let words = normalize_flat(fragment);
    if words.is_empty() {
        if !fragment.is_empty() {
            out.push(' ');
        }
        return;
    }

    if fragment.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(&words);
    if fragment.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn sequential_ids() -> impl FnMut() -> String + Send {
        let mut next = 0;
        move || {
            next += 1;
            format!("job-{}", next)
        }
    }

    fn crawler_for(base_url: String) -> ProfileCrawler {
        ProfileCrawler::new(&CrawlerConfig {
            base_url,
            api_key: Some("test-key".to_string()),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    /// Serves one canned HTTP response and returns the base URL.
    async fn serve_once(status_line: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    #[test]
    fn test_html_to_text_keeps_block_lines() {
        let html = r#"<html><head><title>Profile</title><style>p { color: red }</style></head>
            <body>
              <section>
                <h2>Experience</h2>
                <ul>
                  <li><div><span>Acme</span> Corp</div><div>Software Engineer</div><div>Jan 2020 &ndash; Dec 2022</div></li>
                </ul>
              </section>
              <script>var x = "Jan 2020 - Present";</script>
            </body></html>"#;

        let text = html_to_text(html);

        assert_eq!(
            text,
            "Experience\nAcme Corp\nSoftware Engineer\nJan 2020 - Dec 2022"
        );
    }

    #[test]
    fn test_html_to_text_joins_inline_fragments() {
        let html = "<html><body><p>Soft<b>ware</b> Engineer</p><p><i>Acme</i><b>Corp</b></p></body></html>";

        assert_eq!(html_to_text(html), "Software Engineer\nAcmeCorp");
    }

    #[test]
    fn test_html_text_feeds_line_strategy() {
        let html = "<html><body><p>Acme Corp</p><p>Software Engineer</p><p>Jan 2020 - Present</p></body></html>";

        let jobs = extract_jobs_with(&html_to_text(html), &mut sequential_ids());

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Acme Corp");
        assert_eq!(jobs[0].title, "Software Engineer");
        assert_eq!(jobs[0].end_date, "Present");
    }

    #[test]
    fn test_looks_like_html() {
        assert!(looks_like_html("  <div>Acme</div>"));
        assert!(looks_like_html("<br/>"));
        assert!(!looks_like_html("Engineer at Acme <3"));
        assert!(!looks_like_html("<not closed"));
    }

    #[tokio::test]
    async fn test_fetch_jobs_from_crawled_text() {
        let body = serde_json::json!({
            "results": [{
                "url": "https://www.linkedin.com/in/jane",
                "text": "Software Engineer at Acme Corp Jan 2020 - Present"
            }]
        })
        .to_string();
        let base_url = serve_once("200 OK", body).await;
        let crawler = crawler_for(base_url);

        let jobs = crawler
            .fetch_jobs("https://www.linkedin.com/in/jane", &mut sequential_ids())
            .await;

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "job-1");
        assert_eq!(jobs[0].title, "Software Engineer");
        assert_eq!(jobs[0].company, "Acme Corp");
    }

    #[tokio::test]
    async fn test_fetch_profile_text_reports_api_errors() {
        let base_url = serve_once("500 Internal Server Error", "{\"error\":\"boom\"}".to_string()).await;
        let crawler = crawler_for(base_url);

        let err = crawler
            .fetch_profile_text("https://www.linkedin.com/in/jane")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_fetch_profile_text_rejects_empty_results() {
        let base_url = serve_once("200 OK", "{\"results\":[]}".to_string()).await;
        let crawler = crawler_for(base_url);

        assert!(crawler
            .fetch_profile_text("https://www.linkedin.com/in/jane")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_fetch_jobs_swallows_connection_errors() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let crawler = crawler_for(format!("http://{}/", addr));

        let jobs = crawler
            .fetch_jobs("https://www.linkedin.com/in/jane", &mut sequential_ids())
            .await;

        assert_eq!(crawler.base_url(), format!("http://{}", addr));
        assert!(jobs.is_empty());
    }
}
