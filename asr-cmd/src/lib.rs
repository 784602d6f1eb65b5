//! Command implementations for the array space report CLI.
//!
//! One subcommand today: `report`, a single pass over an array's
//! volumes producing the 90-day space growth CSV.

use clap::Subcommand;

pub mod report;

#[derive(Subcommand)]
pub enum Command {
    /// Generate the 90-day space growth CSV report for one array
    Report {
        /// Array management hostname or IP
        #[arg(short = 'a', long)]
        array: String,

        /// API token for the array (prefer setting the environment
        /// variable over passing the flag)
        #[arg(long, env = "ASR_API_TOKEN", hide_env_values = true)]
        api_token: String,

        /// Directory the report CSV is written into
        #[arg(long, default_value = ".")]
        output_dir: std::path::PathBuf,

        /// Accept any TLS certificate from the array
        #[arg(long)]
        insecure: bool,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 30)]
        request_timeout_secs: u64,

        /// Overall budget for the report run in seconds
        #[arg(long, default_value_t = 600)]
        run_budget_secs: u64,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Report {
            array,
            api_token,
            output_dir,
            insecure,
            request_timeout_secs,
            run_budget_secs,
        } => {
            report::run_report(report::ReportOptions {
                array,
                api_token,
                output_dir,
                insecure,
                request_timeout_secs,
                run_budget_secs,
            })
            .await
        }
    }
}
