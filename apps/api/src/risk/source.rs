use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::errors::SourceError;
use crate::models::inspection::RawRiskRecord;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Provider of the full, materialized risk batch.
#[async_trait]
pub trait RiskSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawRiskRecord>, SourceError>;
}

/// Reads the batch from the risk model's JSON endpoint.
#[derive(Clone)]
pub struct HttpRiskSource {
    client: Client,
    url: String,
}

impl HttpRiskSource {
    pub fn new(url: String) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl RiskSource for HttpRiskSource {
    async fn fetch(&self) -> Result<Vec<RawRiskRecord>, SourceError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let records: Vec<RawRiskRecord> = response.json().await?;
        debug!(count = records.len(), url = %self.url, "Risk batch fetched");
        Ok(records)
    }
}

/// Single synthetic record shown when the risk source cannot be reached.
pub fn fallback_batch() -> Vec<RawRiskRecord> {
    vec![RawRiskRecord {
        address: "대구광역시 중구 기본지역".to_string(),
        expected_risk: 5.0,
        x: 128.6014,
        y: 35.8714,
        weather_tag: "맑음".to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inspection::Priority;
    use crate::risk::pipeline::process;

    #[test]
    fn test_fallback_batch_normalizes_to_high_priority() {
        let inspections = process(&fallback_batch());
        assert_eq!(inspections.len(), 1);
        assert_eq!(inspections[0].risk_score, 50);
        assert_eq!(inspections[0].priority, Priority::High);
        assert_eq!(inspections[0].district, "중구");
        assert_eq!(inspections[0].location, "기본지역");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        // Nothing listens on the discard port locally.
        let source = HttpRiskSource::new("http://127.0.0.1:9/api/info".to_string()).unwrap();
        assert!(matches!(source.fetch().await, Err(SourceError::Http(_))));
    }
}
