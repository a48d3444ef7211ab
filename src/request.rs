use crate::error::BigQueryError;
use crate::options::QueryOptions;
use crate::structs::job::Job;
use crate::structs::job_configuration::JobConfiguration;
use crate::structs::job_configuration_query::JobConfigurationQuery;
use crate::structs::job_reference::JobReference;

/// Builds the `jobs.insert` request body for a query job.
///
/// Pure: the result depends only on the arguments. Options left unset are left out of the
/// request so the service applies its own defaults. `use_query_cache` is only sent when the
/// cache is explicitly disabled, since enabled is the service default.
pub fn build_query_job(
    project_id: &str,
    query: &str,
    options: &QueryOptions,
) -> Result<Job, BigQueryError> {
    if query.trim().is_empty() {
        return Err(BigQueryError::InvalidArgument(
            "Query text must not be empty".into(),
        ));
    }
    let destination_table = match &options.table {
        Some(table) => Some(table.resolve(project_id)?),
        None => None,
    };
    let query_config = JobConfigurationQuery {
        query: Some(query.to_string()),
        priority: options.priority,
        use_query_cache: options.cache.filter(|cache| !cache),
        destination_table,
        create_disposition: options.create,
        write_disposition: options.write,
        allow_large_results: options.large_results,
        flatten_results: options.flatten,
        default_dataset: options
            .dataset
            .as_ref()
            .map(|dataset| dataset.resolve(project_id)),
        use_legacy_sql: options.legacy_sql,
        maximum_billing_tier: options.maximum_billing_tier,
        maximum_bytes_billed: options.maximum_bytes_billed.map(|bytes| bytes.to_string()),
    };
    Ok(Job {
        job_reference: Some(JobReference {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        }),
        configuration: Some(JobConfiguration {
            query: Some(query_config),
            ..Default::default()
        }),
        ..Default::default()
    })
}
