use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use kube_audit_tools::commands::{self, ReportOptions};
use kube_audit_tools::utils::logging::init_logging;

#[derive(Parser)]
#[command(name = "kube-audit")]
#[command(about = "Kubernetes audit log summarization tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize an audit log into a ranked table of request shapes
    Summarize {
        /// Path to the audit log (plain, .gz or .zst)
        log_file: String,

        /// Log file format: json or legacy
        #[arg(long, default_value = "json")]
        log_type: String,

        /// Write the summarized table to this cache file for later reports
        #[arg(long)]
        cache_file: Option<String>,

        #[command(flatten)]
        report: ReportOptions,
    },

    /// Report from a summary cache written by `summarize`
    Report {
        /// Path to the summary cache
        #[arg(long, required = true)]
        cache_file: String,

        #[command(flatten)]
        report: ReportOptions,
    },

    /// Export full-event counts, including client IP and response code, to CSV
    Export {
        /// Path to the audit log (plain, .gz or .zst)
        log_file: String,

        /// Log file format: json or legacy
        #[arg(long, default_value = "json")]
        log_type: String,

        /// Output CSV file path
        #[arg(short, long)]
        output: String,
    },

    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Summarize {
            log_file,
            log_type,
            cache_file,
            report,
        } => commands::summarize::run(&log_file, &log_type, cache_file.as_deref(), &report),
        Commands::Report { cache_file, report } => commands::report::run(&cache_file, &report),
        Commands::Export {
            log_file,
            log_type,
            output,
        } => commands::export::run(&log_file, &log_type, &output),
        Commands::GenerateCompletion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "kube-audit", &mut std::io::stdout());
            Ok(())
        }
    }
}
