use crate::structs;
use crate::structs::dataset_reference::DatasetReference;
use crate::structs::error_proto::ErrorProto;
use crate::structs::job_configuration_query::{
    CreateDisposition, JobConfigurationQuery, Priority, WriteDisposition,
};
use crate::structs::job_status::State;
use crate::structs::table_reference::TableReference;

/// Identity and status accessors shared by every kind of job.
pub trait JobHandle {
    /// The job resource as returned by the service.
    fn resource(&self) -> &structs::job::Job;

    fn job_id(&self) -> Option<&str> {
        self.resource()
            .job_reference
            .as_ref()
            .and_then(|reference| reference.job_id.as_deref())
    }

    fn project_id(&self) -> Option<&str> {
        self.resource()
            .job_reference
            .as_ref()
            .and_then(|reference| reference.project_id.as_deref())
    }

    fn location(&self) -> Option<&str> {
        self.resource()
            .job_reference
            .as_ref()
            .and_then(|reference| reference.location.as_deref())
    }

    fn state(&self) -> Option<State> {
        self.resource().status.as_ref().and_then(|status| status.state)
    }

    fn is_pending(&self) -> bool {
        self.state() == Some(State::Pending)
    }

    fn is_running(&self) -> bool {
        self.state() == Some(State::Running)
    }

    fn is_done(&self) -> bool {
        self.state() == Some(State::Done)
    }

    /// Done, but with a fatal error.
    fn is_failed(&self) -> bool {
        self.is_done() && self.error().is_some()
    }

    fn error(&self) -> Option<&ErrorProto> {
        self.resource()
            .status
            .as_ref()
            .and_then(|status| status.error_result.as_ref())
    }

    /// Non-fatal errors reported while the job ran.
    fn errors(&self) -> &[ErrorProto] {
        self.resource()
            .status
            .as_ref()
            .and_then(|status| status.errors.as_deref())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryJob {
    inner_job: structs::job::Job,
}

impl QueryJob {
    fn config(&self) -> Option<&JobConfigurationQuery> {
        self.inner_job
            .configuration
            .as_ref()
            .and_then(|configuration| configuration.query.as_ref())
    }

    pub fn query(&self) -> Option<&str> {
        self.config().and_then(|config| config.query.as_deref())
    }

    pub fn priority(&self) -> Option<Priority> {
        self.config().and_then(|config| config.priority)
    }

    /// Unset priority means interactive.
    pub fn is_interactive(&self) -> bool {
        self.priority() != Some(Priority::Batch)
    }

    pub fn is_batch(&self) -> bool {
        self.priority() == Some(Priority::Batch)
    }

    pub fn cache(&self) -> bool {
        self.config()
            .and_then(|config| config.use_query_cache)
            .unwrap_or(true)
    }

    pub fn destination(&self) -> Option<&TableReference> {
        self.config()
            .and_then(|config| config.destination_table.as_ref())
    }

    pub fn create_disposition(&self) -> Option<CreateDisposition> {
        self.config().and_then(|config| config.create_disposition)
    }

    pub fn write_disposition(&self) -> Option<WriteDisposition> {
        self.config().and_then(|config| config.write_disposition)
    }

    pub fn large_results(&self) -> bool {
        self.config()
            .and_then(|config| config.allow_large_results)
            .unwrap_or(false)
    }

    pub fn flatten(&self) -> bool {
        self.config()
            .and_then(|config| config.flatten_results)
            .unwrap_or(true)
    }

    pub fn default_dataset(&self) -> Option<&DatasetReference> {
        self.config().and_then(|config| config.default_dataset.as_ref())
    }

    pub fn legacy_sql(&self) -> Option<bool> {
        self.config().and_then(|config| config.use_legacy_sql)
    }
}

impl JobHandle for QueryJob {
    fn resource(&self) -> &structs::job::Job {
        &self.inner_job
    }
}

macro_rules! raw_config_job {
    ($name:ident, $field:ident) => {
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            inner_job: structs::job::Job,
        }

        impl $name {
            pub fn config(&self) -> Option<&serde_json::Value> {
                self.inner_job
                    .configuration
                    .as_ref()
                    .and_then(|configuration| configuration.$field.as_ref())
            }
        }

        impl JobHandle for $name {
            fn resource(&self) -> &structs::job::Job {
                &self.inner_job
            }
        }
    };
}

raw_config_job!(LoadJob, load);
raw_config_job!(ExtractJob, extract);
raw_config_job!(CopyJob, copy);

#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Query(QueryJob),
    Load(LoadJob),
    Extract(ExtractJob),
    Copy(CopyJob),
}

impl Job {
    /// Wraps a job resource returned by the service, picking the variant from its configuration.
    /// A resource without any configuration is taken to be a query job.
    pub fn from_resource(inner_job: structs::job::Job) -> Job {
        let (load, extract, copy) = match &inner_job.configuration {
            Some(configuration) if configuration.query.is_none() => (
                configuration.load.is_some(),
                configuration.extract.is_some(),
                configuration.copy.is_some(),
            ),
            _ => (false, false, false),
        };
        if load {
            Job::Load(LoadJob { inner_job })
        } else if extract {
            Job::Extract(ExtractJob { inner_job })
        } else if copy {
            Job::Copy(CopyJob { inner_job })
        } else {
            Job::Query(QueryJob { inner_job })
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Job::Query(_))
    }

    pub fn as_query(&self) -> Option<&QueryJob> {
        match self {
            Job::Query(job) => Some(job),
            _ => None,
        }
    }

    pub fn into_query(self) -> Option<QueryJob> {
        match self {
            Job::Query(job) => Some(job),
            _ => None,
        }
    }
}

impl JobHandle for Job {
    fn resource(&self) -> &structs::job::Job {
        match self {
            Job::Query(job) => job.resource(),
            Job::Load(job) => job.resource(),
            Job::Extract(job) => job.resource(),
            Job::Copy(job) => job.resource(),
        }
    }
}
