//! Options accepted by [`crate::project::Project::query_job`].
//!
//! Every field is an `Option`: `None` means the field is left out of the request and
//! the service default applies, so an explicit `false` is never confused with "unset".

use std::str::FromStr;

use crate::error::BigQueryError;
use crate::reference::{DatasetRef, TableRef};
pub use crate::structs::job_configuration_query::{CreateDisposition, Priority, WriteDisposition};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct QueryOptions {
    pub priority: Option<Priority>,
    pub cache: Option<bool>,
    pub table: Option<TableRef>,
    pub create: Option<CreateDisposition>,
    pub write: Option<WriteDisposition>,
    pub large_results: Option<bool>,
    pub flatten: Option<bool>,
    pub dataset: Option<DatasetRef>,
    pub legacy_sql: Option<bool>,
    pub maximum_billing_tier: Option<i64>,
    pub maximum_bytes_billed: Option<i64>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn cache(mut self, cache: bool) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Destination table for the query results.
    pub fn table(mut self, table: impl Into<TableRef>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn create(mut self, create: CreateDisposition) -> Self {
        self.create = Some(create);
        self
    }

    pub fn write(mut self, write: WriteDisposition) -> Self {
        self.write = Some(write);
        self
    }

    pub fn large_results(mut self, large_results: bool) -> Self {
        self.large_results = Some(large_results);
        self
    }

    pub fn flatten(mut self, flatten: bool) -> Self {
        self.flatten = Some(flatten);
        self
    }

    /// Default dataset for unqualified table names in the query.
    pub fn dataset(mut self, dataset: impl Into<DatasetRef>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }

    pub fn legacy_sql(mut self, legacy_sql: bool) -> Self {
        self.legacy_sql = Some(legacy_sql);
        self
    }

    pub fn maximum_billing_tier(mut self, tier: i64) -> Self {
        self.maximum_billing_tier = Some(tier);
        self
    }

    pub fn maximum_bytes_billed(mut self, bytes: i64) -> Self {
        self.maximum_bytes_billed = Some(bytes);
        self
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace('-', "_")
}

impl FromStr for Priority {
    type Err = BigQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "interactive" => Ok(Priority::Interactive),
            "batch" => Ok(Priority::Batch),
            _ => Err(BigQueryError::InvalidArgument(format!(
                "Unknown priority '{}', expected interactive or batch",
                s
            ))),
        }
    }
}

impl FromStr for CreateDisposition {
    type Err = BigQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "needed" | "create_if_needed" => Ok(CreateDisposition::CreateIfNeeded),
            "never" | "create_never" => Ok(CreateDisposition::CreateNever),
            _ => Err(BigQueryError::InvalidArgument(format!(
                "Unknown create disposition '{}', expected needed or never",
                s
            ))),
        }
    }
}

impl FromStr for WriteDisposition {
    type Err = BigQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "append" | "write_append" => Ok(WriteDisposition::WriteAppend),
            "truncate" | "write_truncate" => Ok(WriteDisposition::WriteTruncate),
            "empty" | "write_empty" => Ok(WriteDisposition::WriteEmpty),
            _ => Err(BigQueryError::InvalidArgument(format!(
                "Unknown write disposition '{}', expected append, truncate or empty",
                s
            ))),
        }
    }
}
