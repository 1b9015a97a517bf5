use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::application::ports::{
    BatchApi, BatchApiError, JobListQuery, LogFormat, StatsQuery,
};
use crate::domain::{JobId, LogEntry, RawJob, StatInterval};

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// `BatchApi` over the scheduler's REST interface.
pub struct HttpBatchApi {
    client: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct KillRequest<'a> {
    ids: &'a [JobId],
}

impl HttpBatchApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BatchApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| BatchApiError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(BatchApiError::InvalidUrl(format!(
                "{} cannot be used as a base url",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BatchApiError::RequestFailed(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str], query: &[(&'static str, String)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(API_PREFIX).extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }

    async fn check(response: Response) -> Result<Response, BatchApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(BatchApiError::Status { status, body })
    }

    async fn get(&self, url: Url) -> Result<Response, BatchApiError> {
        tracing::debug!(url = %url, "GET upstream");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BatchApiError::RequestFailed(e.to_string()))?;
        Self::check(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, BatchApiError> {
        self.get(url)
            .await?
            .json()
            .await
            .map_err(|e| BatchApiError::InvalidResponse(e.to_string()))
    }

    async fn post_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<(), BatchApiError> {
        tracing::debug!(url = %url, "POST upstream");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| BatchApiError::RequestFailed(e.to_string()))?;
        Self::check(response).await.map(|_| ())
    }
}

#[async_trait]
impl BatchApi for HttpBatchApi {
    async fn list_jobs(&self, query: &JobListQuery) -> Result<Vec<RawJob>, BatchApiError> {
        self.get_json(self.endpoint(&["jobs"], &query.query_pairs()))
            .await
    }

    async fn get_job(&self, id: &JobId) -> Result<RawJob, BatchApiError> {
        self.get_json(self.endpoint(&["jobs", id.as_str()], &[]))
            .await
    }

    async fn get_logs(
        &self,
        id: &JobId,
        format: LogFormat,
    ) -> Result<Vec<LogEntry>, BatchApiError> {
        match format {
            LogFormat::Structured => {
                self.get_json(self.endpoint(&["jobs", id.as_str(), "logs"], &[]))
                    .await
            }
            LogFormat::Text => {
                let url = self.endpoint(
                    &["jobs", id.as_str(), "logs"],
                    &[("format", "text".to_string())],
                );
                let text = self
                    .get(url)
                    .await?
                    .text()
                    .await
                    .map_err(|e| BatchApiError::InvalidResponse(e.to_string()))?;
                Ok(LogEntry::from_text(&text))
            }
        }
    }

    async fn get_stats(&self, query: &StatsQuery) -> Result<Vec<StatInterval>, BatchApiError> {
        self.get_json(self.endpoint(&["stats"], &query.query_pairs()))
            .await
    }

    async fn list_active_queues(&self) -> Result<Vec<String>, BatchApiError> {
        self.get_json(self.endpoint(&["job_queues", "active"], &[]))
            .await
    }

    async fn list_all_queues(&self) -> Result<Vec<String>, BatchApiError> {
        self.get_json(self.endpoint(&["job_queues", "all"], &[]))
            .await
    }

    async fn set_queue_active(&self, name: &str, active: bool) -> Result<(), BatchApiError> {
        let action = if active { "activate" } else { "deactivate" };
        let empty: [(); 0] = [];
        self.post_json(self.endpoint(&["job_queues", name, action], &[]), &empty)
            .await
    }

    async fn kill_jobs(&self, ids: &[JobId]) -> Result<(), BatchApiError> {
        self.post_json(self.endpoint(&["jobs", "kill"], &[]), &KillRequest { ids })
            .await
    }
}
