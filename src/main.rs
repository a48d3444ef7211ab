use std::time::Duration;

use anyhow::{Context, Result};
use bq_query::job::JobHandle;
use bq_query::request::build_query_job;
use bq_query::{
    BigQueryError, ClientConfig, CreateDisposition, HttpJobService, Priority, Project,
    QueryOptions, WriteDisposition,
};
use clap::Parser;
use log::{info, warn};

/// Submit a query job and print the job the service created.
#[derive(Parser, Debug)]
#[command(name = "bq-query-job")]
struct Args {
    /// Project the job runs in and is billed to
    #[arg(long, env = "BQ_PROJECT_ID")]
    project: String,
    /// SQL text of the query
    query: String,
    /// interactive or batch
    #[arg(long)]
    priority: Option<Priority>,
    /// Disable the query cache
    #[arg(long)]
    no_cache: bool,
    /// Destination table: dataset.table, project:dataset.table or project.dataset.table
    #[arg(long)]
    table: Option<String>,
    /// needed or never
    #[arg(long)]
    create: Option<CreateDisposition>,
    /// append, truncate or empty
    #[arg(long)]
    write: Option<WriteDisposition>,
    #[arg(long)]
    large_results: Option<bool>,
    #[arg(long)]
    flatten: Option<bool>,
    /// Default dataset for unqualified table names
    #[arg(long)]
    dataset: Option<String>,
    #[arg(long)]
    legacy_sql: Option<bool>,
    /// Print the request body instead of submitting it
    #[arg(long)]
    print_request: bool,
    /// Resubmit this many times on transient errors
    #[arg(long, default_value_t = 3)]
    max_retries: usize,
}

impl Args {
    fn options(&self) -> QueryOptions {
        QueryOptions {
            priority: self.priority,
            cache: if self.no_cache { Some(false) } else { None },
            table: self.table.clone().map(Into::into),
            create: self.create,
            write: self.write,
            large_results: self.large_results,
            flatten: self.flatten,
            dataset: self.dataset.clone().map(Into::into),
            legacy_sql: self.legacy_sql,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let options = args.options();

    if args.print_request {
        let request = build_query_job(&args.project, &args.query, &options)?;
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    let config = ClientConfig::from_env();
    let service = HttpJobService::new(config.clone())
        .await
        .with_context(|| format!("Failed to authorize with {:?}", config.credentials_path))?;
    let project = Project::new(args.project.as_str(), service);

    let job = again::RetryPolicy::exponential(Duration::from_millis(500))
        .with_max_retries(args.max_retries)
        .with_jitter(true)
        .retry_if(
            || project.query_job(&args.query, &options),
            |err: &BigQueryError| {
                let transient = err.is_transient();
                if transient {
                    warn!("Transient error submitting query job, retrying: {}", err);
                }
                transient
            },
        )
        .await
        .context("Failed to submit query job")?;

    info!("Job state: {:?}", job.state());
    println!("{}", serde_json::to_string_pretty(job.resource())?);
    Ok(())
}
