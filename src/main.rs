// Main entry point - Dependency injection and run setup
mod application;
mod domain;
mod error;
mod infrastructure;
mod presentation;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::application::provisioning_service::ProvisioningService;
use crate::application::substitution::SubstitutionMode;
use crate::domain::dashboard::DashboardMeta;
use crate::infrastructure::config::{load_datadog_config, ConnectionOverrides};
use crate::infrastructure::datadog_repository::DatadogRepository;
use crate::infrastructure::template_loader::TemplateSource;
use crate::presentation::ci_output::ActionOutput;

/// Create a Datadog dashboard from a YAML template unless one with the same title exists
#[derive(Parser, Debug)]
#[command(name = "dashboard-provisioner", version, long_about = None)]
struct Cli {
    /// Dashboard title, also the uniqueness key
    #[arg(long, env = "INPUT_DASHBOARD-TITLE")]
    dashboard_title: String,

    #[arg(long, env = "INPUT_DASHBOARD-AUTHOR")]
    dashboard_author: String,

    /// Base URL of the SonarQube instance linked from the dashboard
    #[arg(long, env = "INPUT_SONAR-BASE-URL")]
    sonar_base_url: String,

    /// Component name, the basis of the code quality metric names
    #[arg(long, env = "INPUT_COMPONENT-NAME")]
    component_name: String,

    /// YAML template; the bundled one is used when absent or empty
    #[arg(long, env = "INPUT_TEMPLATE")]
    template: Option<String>,

    /// Substitution mode: literal or tree. Empty means literal.
    #[arg(
        long,
        env = "INPUT_SUBSTITUTION",
        value_parser = parse_substitution,
        default_value = "literal"
    )]
    substitution: SubstitutionMode,

    /// Connection settings file, defaults to config/datadog if present
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, env = "INPUT_DD-BASE-URL")]
    dd_base_url: Option<String>,

    #[arg(long, env = "INPUT_DD-API-KEY", hide_env_values = true)]
    dd_api_key: Option<String>,

    #[arg(long, env = "INPUT_DD-APPLICATION-KEY", hide_env_values = true)]
    dd_application_key: Option<String>,
}

impl Cli {
    fn template_source(&self) -> TemplateSource {
        let path = self
            .template
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        TemplateSource::from_path(path)
    }
}

/// Runner inputs arrive as empty strings when unset
fn parse_substitution(value: &str) -> Result<SubstitutionMode, String> {
    if value.trim().is_empty() {
        return Ok(SubstitutionMode::default());
    }
    <SubstitutionMode as ValueEnum>::from_str(value.trim(), true)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr, stdout carries step outputs
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = ActionOutput::from_env();
    let mut stdout = std::io::stdout();

    // Load configuration
    let loaded = load_datadog_config(
        cli.config.as_deref(),
        ConnectionOverrides {
            base_url: cli.dd_base_url.clone(),
            api_key: cli.dd_api_key.clone(),
            application_key: cli.dd_application_key.clone(),
        },
    );
    let datadog_config = match loaded {
        Ok(config) => config,
        Err(e) => {
            let message = format!("Invalid Datadog configuration: {:#}", e);
            tracing::error!("{}", message);
            output.fail(&message, &mut stdout)?;
            return Ok(ExitCode::FAILURE);
        }
    };
    tracing::debug!("Using {:?}", datadog_config);

    // Create repository (infrastructure layer)
    let repository = Arc::new(DatadogRepository::new(datadog_config));

    // Create service (application layer)
    let service = ProvisioningService::new(
        repository,
        cli.template_source(),
        cli.substitution,
    );

    let meta = DashboardMeta::new(
        cli.dashboard_title,
        cli.dashboard_author,
        cli.sonar_base_url,
        cli.component_name,
    );
    let report = service.provision(&meta, chrono::Utc::now()).await;

    // Report outputs (presentation layer)
    output.report(&report, &mut stdout)?;

    Ok(if report.is_done() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
