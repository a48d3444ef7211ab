use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";
pub const DEFAULT_SCOPES: &[&str] = &["https://www.googleapis.com/auth/bigquery"];

const API_BASE_URL_ENV: &str = "BQ_API_BASE_URL";
const SCOPES_ENV: &str = "BQ_SCOPES";
const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
const GCLOUD_CREDENTIALS: &str = ".config/gcloud/application_default_credentials.json";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Authorized user secret, as written by `gcloud auth application-default login`.
    pub credentials_path: PathBuf,
    pub scopes: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let home = env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
        ClientConfig {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            credentials_path: home.join(GCLOUD_CREDENTIALS),
            scopes: DEFAULT_SCOPES.iter().map(|scope| scope.to_string()).collect(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `BQ_API_BASE_URL`, `GOOGLE_APPLICATION_CREDENTIALS` and
    /// `BQ_SCOPES` (comma separated) when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ClientConfig::default();
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|url| !url.is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(path) = lookup(CREDENTIALS_ENV).filter(|path| !path.is_empty()) {
            config.credentials_path = PathBuf::from(path);
        }
        if let Some(scopes) = lookup(SCOPES_ENV) {
            let scopes: Vec<String> = scopes
                .split(',')
                .map(str::trim)
                .filter(|scope| !scope.is_empty())
                .map(String::from)
                .collect();
            if !scopes.is_empty() {
                config.scopes = scopes;
            }
        }
        config
    }

    pub fn jobs_url(&self, project_id: &str) -> String {
        format!(
            "{api_base_url}/projects/{project_id}/jobs",
            api_base_url = self.api_base_url,
            project_id = project_id
        )
    }
}
