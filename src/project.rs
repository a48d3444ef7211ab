use log::{debug, info};

use crate::error::BigQueryError;
use crate::job::{Job, JobHandle};
use crate::options::QueryOptions;
use crate::request::build_query_job;
use crate::service::JobService;
use crate::structs::dataset_reference::DatasetReference;
use crate::structs::table_reference::TableReference;

/// Entry point for submitting jobs billed to one project.
pub struct Project<S> {
    project_id: String,
    service: S,
}

impl<S: JobService> Project<S> {
    pub fn new(project_id: impl Into<String>, service: S) -> Self {
        Project {
            project_id: project_id.into(),
            service,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn dataset_ref(&self, dataset_id: &str) -> DatasetReference {
        DatasetReference::new(self.project_id.as_str(), dataset_id)
    }

    pub fn table_ref(&self, dataset_id: &str, table_id: &str) -> TableReference {
        TableReference::new(self.project_id.as_str(), dataset_id, table_id)
    }

    /// Submits `query` as a query job and returns the handle the service assigned.
    ///
    /// Invalid arguments are reported before anything is sent. The submission is attempted
    /// once; its errors are returned as they are.
    pub async fn query_job(&self, query: &str, options: &QueryOptions) -> Result<Job, BigQueryError> {
        let request = build_query_job(&self.project_id, query, options)?;
        debug!("Built query job request: {:?}", request);
        let response = self.service.insert_job(&self.project_id, request).await?;
        let job = Job::from_resource(response);
        info!(
            "Created job {} in project {}",
            job.job_id().unwrap_or("<unassigned>"),
            self.project_id
        );
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use futures::future::{BoxFuture, FutureExt};

    use super::*;
    use crate::options::{CreateDisposition, Priority, WriteDisposition};
    use crate::structs;
    use crate::structs::error_proto::ErrorProto;
    use crate::structs::job_configuration::JobConfiguration;
    use crate::structs::job_configuration_query::JobConfigurationQuery;
    use crate::structs::job_reference::JobReference;
    use crate::structs::job_status::{JobStatus, State};

    const PROJECT: &str = "test-project";
    const QUERY: &str = "SELECT name, age, score, active FROM [some_project:some_dataset.users]";

    /// Records every insert and answers with queued responses.
    #[derive(Default)]
    struct MockJobService {
        calls: Mutex<Vec<(String, structs::job::Job)>>,
        responses: Mutex<VecDeque<Result<structs::job::Job, BigQueryError>>>,
    }

    impl MockJobService {
        fn expect(response: Result<structs::job::Job, BigQueryError>) -> Arc<Self> {
            let mock = MockJobService::default();
            mock.responses.lock().unwrap().push_back(response);
            Arc::new(mock)
        }

        fn calls(&self) -> Vec<(String, structs::job::Job)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl JobService for MockJobService {
        fn insert_job<'a>(
            &'a self,
            project_id: &'a str,
            job: structs::job::Job,
        ) -> BoxFuture<'a, Result<structs::job::Job, BigQueryError>> {
            self.calls
                .lock()
                .unwrap()
                .push((project_id.to_string(), job));
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected insert_job call");
            futures::future::ready(response).boxed()
        }
    }

    fn query_job_resource(query: JobConfigurationQuery) -> structs::job::Job {
        structs::job::Job {
            job_reference: Some(JobReference {
                project_id: Some(PROJECT.to_string()),
                ..Default::default()
            }),
            configuration: Some(JobConfiguration {
                query: Some(JobConfigurationQuery {
                    query: Some(QUERY.to_string()),
                    ..query
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn assigned(mut job: structs::job::Job) -> structs::job::Job {
        if let Some(reference) = job.job_reference.as_mut() {
            reference.job_id = Some("job_9876543210".to_string());
        }
        job
    }

    async fn run(expected: structs::job::Job, options: QueryOptions) -> Job {
        let mock = MockJobService::expect(Ok(assigned(expected.clone())));
        let project = Project::new(PROJECT, mock.clone());
        let job = project.query_job(QUERY, &options).await.unwrap();
        assert_eq!(mock.calls(), vec![(PROJECT.to_string(), expected)]);
        job
    }

    #[tokio::test]
    async fn queries_the_data() {
        let expected = query_job_resource(JobConfigurationQuery::default());
        let job = run(expected, QueryOptions::new()).await;
        assert!(job.is_query());
        assert_eq!(job.job_id(), Some("job_9876543210"));
    }

    #[tokio::test]
    async fn queries_the_data_with_options_set() {
        let expected = query_job_resource(JobConfigurationQuery {
            priority: Some(Priority::Batch),
            use_query_cache: Some(false),
            ..Default::default()
        });
        let options = QueryOptions::new().priority(Priority::Batch).cache(false);
        let job = run(expected, options).await;
        assert!(job.is_query());
        assert!(job.as_query().unwrap().is_batch());
    }

    #[tokio::test]
    async fn queries_the_data_with_table_options() {
        let mock = MockJobService::default();
        let project = Project::new(PROJECT, Arc::new(mock));
        let table = project.table_ref("my_dataset", "my_table");
        let expected = query_job_resource(JobConfigurationQuery {
            destination_table: Some(table.clone()),
            create_disposition: Some(CreateDisposition::CreateNever),
            write_disposition: Some(WriteDisposition::WriteTruncate),
            allow_large_results: Some(true),
            flatten_results: Some(false),
            ..Default::default()
        });
        let options = QueryOptions::new()
            .table(table)
            .create(CreateDisposition::CreateNever)
            .write(WriteDisposition::WriteTruncate)
            .large_results(true)
            .flatten(false);
        let job = run(expected, options).await;
        assert!(job.is_query());
        assert!(!job.as_query().unwrap().flatten());
    }

    #[tokio::test]
    async fn queries_the_data_with_dataset_option_as_a_dataset() {
        let dataset = DatasetReference::new(PROJECT, "my_dataset");
        let expected = query_job_resource(JobConfigurationQuery {
            default_dataset: Some(dataset.clone()),
            ..Default::default()
        });
        let job = run(expected, QueryOptions::new().dataset(dataset)).await;
        assert!(job.is_query());
    }

    #[tokio::test]
    async fn queries_the_data_with_dataset_option_as_a_string() {
        let expected = query_job_resource(JobConfigurationQuery {
            default_dataset: Some(DatasetReference::new(PROJECT, "my_dataset")),
            ..Default::default()
        });
        let job = run(expected, QueryOptions::new().dataset("my_dataset")).await;
        assert!(job.is_query());
    }

    #[tokio::test]
    async fn empty_query_is_never_submitted() {
        let mock = Arc::new(MockJobService::default());
        let project = Project::new(PROJECT, mock.clone());
        let err = project.query_job("", &QueryOptions::new()).await.unwrap_err();
        assert!(matches!(err, BigQueryError::InvalidArgument(_)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_job_is_returned_as_a_handle() {
        let mut response = assigned(query_job_resource(JobConfigurationQuery::default()));
        response.status = Some(JobStatus {
            state: Some(State::Done),
            error_result: Some(ErrorProto {
                reason: "invalidQuery".into(),
                message: "Syntax error".into(),
                ..Default::default()
            }),
            errors: None,
        });
        let mock = MockJobService::expect(Ok(response));
        let project = Project::new(PROJECT, mock.clone());
        let job = project.query_job(QUERY, &QueryOptions::new()).await.unwrap();
        assert!(job.is_query());
        assert!(job.is_failed());
        assert_eq!(job.job_id(), Some("job_9876543210"));
        assert_eq!(job.error().unwrap().reason, "invalidQuery");
    }

    #[tokio::test]
    async fn service_errors_propagate() {
        let mock = MockJobService::expect(Err(BigQueryError::ApiError {
            status: 403,
            message: "Billing has not been enabled for this project".into(),
        }));
        let project = Project::new(PROJECT, mock.clone());
        let err = project.query_job(QUERY, &QueryOptions::new()).await.unwrap_err();
        match err {
            BigQueryError::ApiError { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Billing has not been enabled for this project");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
        assert_eq!(mock.calls().len(), 1);
    }
}
