//! Operation: send a serialized report to the report service.

use std::fmt;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;

use impact_graph::report::producer;
use impact_util::errors::{ImpactError, ImpactResult};

const SUBMIT_PATH: &str = "/rest/submit";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Whether an HTTP status counts as an accepted submission.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Identifier in the service response; sent as either a string or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponseId {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseId::Text(s) => f.write_str(s),
            ResponseId::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Body of a successful submission.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub user_id: ResponseId,
    pub build_id: ResponseId,
}

/// Link to the submitted build in the report viewer.
pub fn view_link(base_url: &str, response: &SubmitResponse) -> String {
    format!(
        "{}/#/builds/{}/{}",
        base_url.trim_end_matches('/'),
        response.user_id,
        response.build_id
    )
}

/// HTTP client for one report service.
#[derive(Debug, Clone)]
pub struct ReportSender {
    client: Client,
    base_url: String,
}

impl ReportSender {
    pub fn new(base_url: &str) -> ImpactResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(producer())
            .build()
            .map_err(|e| ImpactError::Submission {
                message: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn submit_url(&self) -> String {
        format!("{}{SUBMIT_PATH}", self.base_url)
    }

    /// POST the JSON document.
    ///
    /// Returns the viewer link when the service accepts the report, and
    /// `None` when it answers with a non-2xx status.
    pub async fn submit(&self, document: String) -> ImpactResult<Option<String>> {
        let url = self.submit_url();
        tracing::debug!(%url, bytes = document.len(), "submitting dependency report");

        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(document)
            .send()
            .await
            .map_err(|e| ImpactError::Submission {
                message: format!("request to {url} failed: {e}"),
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| ImpactError::Submission {
            message: format!("failed to read the response from {url}: {e}"),
        })?;

        if !is_success(status) {
            tracing::error!(
                status,
                body = %body,
                "the report service rejected the dependency report"
            );
            return Ok(None);
        }

        let response: SubmitResponse =
            serde_json::from_str(&body).map_err(|e| ImpactError::Submission {
                message: format!("unexpected response from {url}: {e}"),
            })?;
        Ok(Some(view_link(&self.base_url, &response)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        assert!(!is_success(199));
        assert!(is_success(200));
        assert!(is_success(204));
        assert!(is_success(299));
        assert!(!is_success(300));
        assert!(!is_success(404));
        assert!(!is_success(500));
    }

    #[test]
    fn link_from_string_or_number_ids() {
        let r: SubmitResponse =
            serde_json::from_str(r#"{"userId": 42, "buildId": "b-1"}"#).unwrap();
        assert_eq!(
            view_link("https://updateimpact.com/", &r),
            "https://updateimpact.com/#/builds/42/b-1"
        );

        let r: SubmitResponse =
            serde_json::from_str(r#"{"userId": "u7", "buildId": 9, "extra": true}"#).unwrap();
        assert_eq!(view_link("http://h", &r), "http://h/#/builds/u7/9");
    }

    #[test]
    fn submit_url_has_no_double_slash() {
        let sender = ReportSender::new("http://localhost:8080/").unwrap();
        assert_eq!(sender.submit_url(), "http://localhost:8080/rest/submit");
    }
}
