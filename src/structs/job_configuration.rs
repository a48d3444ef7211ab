use crate::structs::job_configuration_query::JobConfigurationQuery;
use serde::{Deserialize, Serialize};

// https://cloud.google.com/bigquery/docs/reference/rest/v2/Job#JobConfiguration
// Only query jobs are submitted by this crate, so the other kinds are carried as raw json.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<JobConfigurationQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}
