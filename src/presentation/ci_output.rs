// GitHub Actions outputs and workflow commands
use crate::application::provisioning_service::ProvisionReport;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// Destination for step outputs
#[derive(Debug, Clone, Default)]
pub struct ActionOutput {
    output_file: Option<PathBuf>,
}

impl ActionOutput {
    pub fn new(output_file: Option<PathBuf>) -> Self {
        Self { output_file }
    }

    /// Use the file named by `GITHUB_OUTPUT` when the runner provides one
    pub fn from_env() -> Self {
        let output_file = std::env::var_os("GITHUB_OUTPUT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::new(output_file)
    }

    pub fn set_output(&self, name: &str, value: &str, stdout: &mut impl Write) -> io::Result<()> {
        match &self.output_file {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(file_command(name, value, &delimiter())?.as_bytes())
            }
            None => writeln!(stdout, "{}={}", name, value),
        }
    }

    /// Publish the run outcome as outputs or as an error annotation
    pub fn report(&self, report: &ProvisionReport, stdout: &mut impl Write) -> io::Result<()> {
        if let Some(message) = report.failure_message() {
            return self.fail(&message, stdout);
        }
        if let ProvisionReport::Done(created) = report {
            self.set_output("status", &created.status.to_string(), stdout)?;
            self.set_output("data", &created.body, stdout)?;
        }
        Ok(())
    }

    /// Mark the step failed with a single error annotation
    pub fn fail(&self, message: &str, stdout: &mut impl Write) -> io::Result<()> {
        writeln!(stdout, "::error::{}", escape_data(message))
    }
}

fn delimiter() -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("ghadelimiter_{}", nanos)
}

fn file_command(name: &str, value: &str, delimiter: &str) -> io::Result<String> {
    if name.contains(delimiter) || value.contains(delimiter) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("output {} contains the delimiter {}", name, delimiter),
        ));
    }
    Ok(format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter))
}

/// Escape a workflow command message
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
