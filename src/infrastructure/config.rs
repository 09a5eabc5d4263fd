use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Connection settings for the Datadog API
#[derive(Deserialize, Clone)]
pub struct DatadogConfig {
    pub base_url: String,
    pub api_key: String,
    pub application_key: String,
}

impl fmt::Debug for DatadogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatadogConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("application_key", &"<redacted>")
            .finish()
    }
}

/// Values given on the command line, which win over file and environment
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub application_key: Option<String>,
}

/// Load connection settings from `config/datadog` (or `file`), `DD_*`
/// environment variables and command line overrides, in that order.
pub fn load_datadog_config(
    file: Option<&Path>,
    overrides: ConnectionOverrides,
) -> anyhow::Result<DatadogConfig> {
    build_datadog_config(file, None, overrides)
}

fn build_datadog_config(
    file: Option<&Path>,
    env: Option<config::Map<String, String>>,
    overrides: ConnectionOverrides,
) -> anyhow::Result<DatadogConfig> {
    let file_source = match file {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config/datadog").required(false),
    };

    let settings = config::Config::builder()
        .add_source(file_source)
        .add_source(config::Environment::with_prefix("DD").source(env))
        .set_override_option("base_url", non_empty(overrides.base_url))?
        .set_override_option("api_key", non_empty(overrides.api_key))?
        .set_override_option("application_key", non_empty(overrides.application_key))?
        .build()?;

    let mut config: DatadogConfig = settings.try_deserialize()?;
    config.base_url = config.base_url.trim_end_matches('/').to_string();

    for (name, value) in [
        ("base_url", &config.base_url),
        ("api_key", &config.api_key),
        ("application_key", &config.application_key),
    ] {
        if value.trim().is_empty() {
            anyhow::bail!("Datadog setting {} is empty", name);
        }
    }

    Ok(config)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
