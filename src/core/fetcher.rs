use crate::core::parser::parse_status_page;
use crate::domain::model::CaseStatus;
use crate::domain::ports::{ConfigProvider, StatusSource};
use crate::utils::error::{FetchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

pub const DEFAULT_ENDPOINT: &str = "https://egov.uscis.gov/casestatus/mycasestatus.do";
pub const DEFAULT_USER_AGENT: &str = concat!("rstat/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

const SEARCH_ACTION: &str = "CHECK STATUS";

/// Looks up case statuses by posting the search form to the status endpoint.
pub struct HttpStatusFetcher {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpStatusFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(config.endpoint(), config.timeout(), config.user_agent())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                seconds: self.timeout.as_secs_f64(),
            }
        } else {
            FetchError::Network(err)
        }
    }
}

#[async_trait]
impl StatusSource for HttpStatusFetcher {
    async fn fetch_status(&self, receipt_number: &str) -> std::result::Result<CaseStatus, FetchError> {
        let started = Instant::now();
        tracing::debug!(receipt = receipt_number, endpoint = %self.endpoint, "Requesting case status");

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[
                ("appReceiptNum", receipt_number),
                ("initCaseSearch", SEARCH_ACTION),
            ])
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        let block = parse_status_page(&body)?;

        tracing::debug!(
            receipt = receipt_number,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Case status received"
        );

        Ok(CaseStatus::from(block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const PAGE: &str = r#"<html><body><div class="rows text-center">
        <h1>Case Was Received</h1>
        <p>On January 12, 2021, we received your Form I-485, Application to Register Permanent Residence or Adjust Status, Receipt Number MSC2190000001.</p>
    </div></body></html>"#;

    fn fetcher(server: &MockServer) -> HttpStatusFetcher {
        HttpStatusFetcher::new(server.url("/casestatus"), Duration::from_secs(5), DEFAULT_USER_AGENT).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_status_posts_search_form() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/casestatus")
                .header("content-type", "application/x-www-form-urlencoded")
                .x_www_form_urlencoded_tuple("appReceiptNum", "MSC2190000001")
                .x_www_form_urlencoded_tuple("initCaseSearch", "CHECK STATUS");
            then.status(200).header("Content-Type", "text/html").body(PAGE);
        });

        let status = fetcher(&server).fetch_status("MSC2190000001").await.unwrap();

        api_mock.assert();
        assert_eq!(status.summary, "Case Was Received");
        assert_eq!(status.form.as_deref(), Some("I-485"));
        assert_eq!(status.last_update.as_deref(), Some("January 12, 2021"));
    }

    #[tokio::test]
    async fn test_fetch_status_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/casestatus");
            then.status(503);
        });

        let err = fetcher(&server).fetch_status("MSC2190000001").await.unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus { status: 503 }));
        assert_eq!(err.kind(), "network");
    }

    #[tokio::test]
    async fn test_fetch_status_layout_change() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/casestatus");
            then.status(200).body("<html><body><h1>Down for maintenance</h1></body></html>");
        });

        let err = fetcher(&server).fetch_status("MSC2190000001").await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
        assert_eq!(err.kind(), "parse");
    }

    #[tokio::test]
    async fn test_fetch_status_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/casestatus");
            then.status(200).body(PAGE).delay(Duration::from_millis(1500));
        });

        let fetcher = HttpStatusFetcher::new(
            server.url("/casestatus"),
            Duration::from_millis(200),
            DEFAULT_USER_AGENT,
        )
        .unwrap();
        let err = fetcher.fetch_status("MSC2190000001").await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_fetch_status_connection_refused() {
        // Nothing listens on port 1.
        let fetcher =
            HttpStatusFetcher::new("http://127.0.0.1:1/casestatus", Duration::from_secs(2), DEFAULT_USER_AGENT)
                .unwrap();
        let err = fetcher.fetch_status("MSC2190000001").await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }
}
