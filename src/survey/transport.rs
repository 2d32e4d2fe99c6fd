//! HTTP transport for the onboarding report.

use async_trait::async_trait;

use super::model::SubmissionReport;
use super::ports::ReportTransport;
use crate::config::SurveyConfig;
use crate::error::{ConfigError, ReportError};

/// Posts reports as JSON to the analytics endpoint.
///
/// Only the status line is looked at; the response body is never read.
pub struct HttpReportTransport {
    url: String,
    client: reqwest::Client,
}

impl HttpReportTransport {
    pub fn new(config: &SurveyConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.report_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            url: config.analytics_url.clone(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReportTransport for HttpReportTransport {
    async fn send(&self, report: &SubmissionReport) -> Result<(), ReportError> {
        let resp = self.client.post(&self.url).json(report).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ReportError::Http { status });
        }
        Ok(())
    }
}
