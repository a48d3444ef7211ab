use std::fmt;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use log::{debug, warn};
use serde::Deserialize;
use yup_oauth2::authenticator::DefaultAuthenticator;

use crate::config::ClientConfig;
use crate::error::BigQueryError;
use crate::structs;
use crate::structs::error_proto::ErrorProto;

/// Submits job resources to the service.
///
/// Errors from the transport or the service come back unchanged; implementations do not retry.
pub trait JobService: Send + Sync {
    fn insert_job<'a>(
        &'a self,
        project_id: &'a str,
        job: structs::job::Job,
    ) -> BoxFuture<'a, Result<structs::job::Job, BigQueryError>>;
}

impl<S: JobService + ?Sized> JobService for Arc<S> {
    fn insert_job<'a>(
        &'a self,
        project_id: &'a str,
        job: structs::job::Job,
    ) -> BoxFuture<'a, Result<structs::job::Job, BigQueryError>> {
        (**self).insert_job(project_id, job)
    }
}

struct InnerClient {
    authenticator: DefaultAuthenticator,
    reqwest_client: reqwest::Client,
    config: ClientConfig,
}

/// `jobs.insert` over the REST api, authorized with the user credentials from [`ClientConfig`].
#[derive(Clone)]
pub struct HttpJobService {
    inner_client: Arc<InnerClient>,
}

impl fmt::Debug for HttpJobService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpJobService")
            .field("api_base_url", &self.inner_client.config.api_base_url)
            .field("credentials_path", &self.inner_client.config.credentials_path)
            .finish()
    }
}

// Body of a non-2xx response: {"error": {"code": 400, "message": "..."}}
#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

impl HttpJobService {
    pub async fn new(config: ClientConfig) -> Result<Self, BigQueryError> {
        let secret = yup_oauth2::read_authorized_user_secret(&config.credentials_path).await?;
        let authenticator = yup_oauth2::AuthorizedUserAuthenticator::builder(secret)
            .build()
            .await?;
        Ok(HttpJobService {
            inner_client: Arc::new(InnerClient {
                authenticator,
                reqwest_client: reqwest::Client::new(),
                config,
            }),
        })
    }

    async fn post_job(
        &self,
        project_id: &str,
        job: structs::job::Job,
    ) -> Result<structs::job::Job, BigQueryError> {
        let api_url = self.inner_client.config.jobs_url(project_id);
        let tok = self
            .inner_client
            .authenticator
            .token(self.inner_client.config.scopes.as_slice())
            .await?;
        debug!("POST {}", api_url);
        let res = self
            .inner_client
            .reqwest_client
            .post(api_url)
            .json(&job)
            .bearer_auth(tok.as_str())
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await?;
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(response) => response.error.message,
                Err(_) => body,
            };
            return Err(BigQueryError::ApiError {
                status: status.as_u16(),
                message,
            });
        }
        let body = res.text().await?;
        let job: structs::job::Job = serde_json::from_str(&body)?;
        log_job_status(&job);
        Ok(job)
    }
}

/// A job that was created but already failed is still returned; the handle reports it
/// through `is_failed()` and `error()`.
fn log_job_status(job: &structs::job::Job) {
    let Some(status) = &job.status else {
        return;
    };
    if let Some(ErrorProto { message, .. }) = &status.error_result {
        warn!("Inserted job failed: {}", message);
    }
    if let Some(errors) = &status.errors {
        for error in errors {
            warn!("Got error in job insert request: {}", error.message);
        }
    }
}

impl JobService for HttpJobService {
    fn insert_job<'a>(
        &'a self,
        project_id: &'a str,
        job: structs::job::Job,
    ) -> BoxFuture<'a, Result<structs::job::Job, BigQueryError>> {
        self.post_job(project_id, job).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{Job, JobHandle};

    #[test]
    fn failed_job_keeps_its_identity() {
        let job: structs::job::Job = serde_json::from_str(
            r#"{
                "jobReference": {"projectId": "test-project", "jobId": "job_9876543210"},
                "configuration": {"query": {"query": "SELECT 1"}},
                "status": {
                  "state": "DONE",
                  "errorResult": {"reason": "quotaExceeded", "message": "Quota exceeded"},
                  "errors": [{"reason": "quotaExceeded", "message": "Quota exceeded"}]
                }
              }"#,
        )
        .unwrap();
        log_job_status(&job);
        log_job_status(&structs::job::Job::default());
        let handle = Job::from_resource(job);
        assert_eq!(handle.job_id(), Some("job_9876543210"));
        assert!(handle.is_failed());
        assert_eq!(handle.error().unwrap().message, "Quota exceeded");
    }

    #[test]
    fn api_error_body() {
        let body = r#"{"error": {"code": 404, "message": "Not found: Dataset test-project:nope", "errors": []}}"#;
        let response: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.error.message, "Not found: Dataset test-project:nope");
    }
}
