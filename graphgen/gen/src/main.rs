//! Graphgen Code Generator
//!
//! Generates a strongly-typed Rust GraphQL client from an SDL schema file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use graphgen_gen::analyzer::analyze_file;
use graphgen_gen::errors::GeneratorError;
use graphgen_gen::output::{GenerateOptions, generate_and_write};
use graphgen_gen::selection::SelectionStyle;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Graphgen code generator - transforms a GraphQL schema into a typed Rust client
#[derive(Parser, Debug)]
#[command(name = "graphgen-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the GraphQL SDL schema file
    #[arg(value_name = "SCHEMA")]
    schema: PathBuf,

    /// Output directory for generated code
    #[arg(short, long, default_value = "src/graphql")]
    output: PathBuf,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Layout of selection sets in request documents
    #[arg(long, value_name = "STYLE", default_value_t = SelectionStyle::Inline)]
    selection_style: SelectionStyle,

    /// Print the analysed schema model as JSON and exit
    #[arg(long)]
    dump_model: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialize tracing; `RUST_LOG` wins over the verbosity flags.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,graphgen_gen=info".to_string(),
            2 => "info,graphgen_gen=debug".to_string(),
            _ => "debug,graphgen_gen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run(cli: &Cli) -> Result<(), GeneratorError> {
    if cli.dump_model && cli.dry_run {
        return Err(GeneratorError::ConfigError(
            "--dump-model cannot be combined with --dry-run".to_string(),
        ));
    }

    let model = analyze_file(&cli.schema)?;

    if cli.dump_model {
        let json = serde_json::to_string_pretty(&model)
            .map_err(|e| GeneratorError::CodeGenError(format!("Failed to serialize model: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    if cli.verbose > 1 {
        eprintln!(
            "Schema: {} types, {} inputs, {} enums, {} queries, {} mutations",
            model.object_types.len(),
            model.input_types.len(),
            model.enums.len(),
            model.query_fields.len(),
            model.mutation_fields.len()
        );
    }

    let options = GenerateOptions {
        selection_style: cli.selection_style,
        dry_run: cli.dry_run,
    };
    let report = generate_and_write(&model, &cli.output, &options)?;

    if !cli.dry_run {
        eprintln!(
            "{} {} ({} written, {} unchanged, {} removed)",
            "Generated".green().bold(),
            cli.output.display(),
            report.written.len(),
            report.unchanged.len(),
            report.removed.len()
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose > 0 {
        eprintln!("Schema: {}", cli.schema.display());
        eprintln!("Output directory: {}", cli.output.display());
        if cli.dry_run {
            eprintln!("Dry run mode - no files will be written");
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
