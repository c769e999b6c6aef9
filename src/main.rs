//! @ai:module:intent CLI entry point for srr standards reports
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on pipeline, check, catalog, viewer, output, config

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use srr_report::{
    catalog, check, output, pipeline, viewer, GitCli, OutputFormat, ReportConfig,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "srr-report")]
#[command(author, version, about = "Standards compliance reports for srr-annotated packages")]
struct Cli {
    /// Configuration file (defaults to srr.toml in the package root)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the standards compliance report
    Report {
        /// Package root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Branch used in source links (defaults to the checked-out branch)
        #[arg(long)]
        branch: Option<String>,

        /// Print the report location instead of opening it
        #[arg(long, default_value = "false")]
        no_view: bool,

        /// Print the markdown to stdout
        #[arg(long, default_value = "false")]
        stdout: bool,
    },

    /// List the standards annotations found in a package
    Extract {
        /// Package root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Check that every standard is addressed and no TODO remains
    Check {
        /// Package root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Print the checklist for one or more categories
    Checklist {
        /// Category codes, e.g. G RE
        #[arg(required = true)]
        codes: Vec<String>,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "srr.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long, default_value = "false")]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(2);
    }

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("srr_report=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(cli: Cli) -> Result<ExitCode> {
    let explicit = cli.config.as_deref();

    match cli.command {
        Commands::Report {
            path,
            branch,
            no_view,
            stdout,
        } => {
            let config = load_config(&path, explicit)?;
            let source = catalog::source_from_config(&config.catalog)?;
            let report = pipeline::generate_report(
                &path,
                &config,
                branch.as_deref(),
                source.as_ref(),
                &GitCli::new(),
            )
            .with_context(|| format!("failed to generate report for {}", path.display()))?;

            if stdout {
                print!("{}", report.markdown());
            } else {
                let location = viewer::publish(&report.lines, &report.package, !no_view)?;
                if no_view {
                    println!("{}", location.display());
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Extract { path, format } => {
            let config = load_config(&path, explicit)?;
            let records = pipeline::collect_records(&path, &config.scan);
            println!("{}", output::format_records(&records, format.into()));
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check { path, format } => {
            let config = load_config(&path, explicit)?;
            let source = catalog::source_from_config(&config.catalog)?;
            let report =
                pipeline::generate_report(&path, &config, None, source.as_ref(), &GitCli::new())
                    .with_context(|| format!("failed to check {}", path.display()))?;

            let result = check::check_report(&report);
            println!("{}", output::format_check_result(&result, format.into()));

            if result.passed() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(1))
            }
        }

        Commands::Checklist { codes } => {
            let config = load_config(Path::new("."), explicit)?;
            let categories = catalog::order_categories(codes.iter().map(String::as_str));
            if categories.is_empty() {
                bail!("no known category among: {}", codes.join(", "));
            }

            let source = catalog::source_from_config(&config.catalog)?;
            for line in source.checklist(&categories)? {
                println!("{}", line);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Init { output, force } => {
            if output.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", output.display());
            }
            ReportConfig::default().save(&output)?;
            println!("Created {}", output.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<ReportConfig> {
    ReportConfig::load_or_default(root, explicit).context("failed to load configuration")
}
