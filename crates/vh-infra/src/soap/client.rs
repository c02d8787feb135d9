use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use tracing::debug;

use super::envelope::NS;
use super::error::SoapError;

const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

#[derive(Debug, Clone)]
pub struct SoapClientConfig {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl SoapClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            connect_timeout: Duration::from_secs(20),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// Posts SOAP 1.1 envelopes to an ASMX endpoint.
#[derive(Debug, Clone)]
pub struct SoapAsmxClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SoapAsmxClient {
    pub fn new(config: SoapClientConfig) -> Result<Self, SoapError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one envelope and returns the raw response body.
    pub async fn call(&self, action: &str, envelope: String) -> Result<String, SoapError> {
        let soap_action = format!("\"{NS}{action}\"");
        debug!(action, endpoint = %self.endpoint, "soap call");

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, HeaderValue::from_static(SOAP_CONTENT_TYPE))
            .header("SOAPAction", soap_action)
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        let payload = response.text().await?;
        debug!(action, status = status.as_u16(), response = %payload, "soap response");

        if !status.is_success() {
            return Err(SoapError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body: payload,
            });
        }
        Ok(payload)
    }
}
