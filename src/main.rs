use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::info;

use acqsim::FixtureGenerator;
use acqsim::config::SimulatorConfig;
use acqsim::generator::inventory;
use acqsim::logging::init_logging;
use acqsim::naming::format_metadata_time;

/// Generates dummy acquisition products for simulator test fixtures
#[derive(Parser)]
#[command(name = "acqsim", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the products of all eleven product types
    Generate {
        #[command(flatten)]
        run: RunArgs,

        /// Directory the .ISIP products are written to (must exist)
        output: Option<PathBuf>,
    },
    /// Print the granules a run would write, without writing anything
    Plan {
        #[command(flatten)]
        run: RunArgs,
    },
    /// List the products already present in an output directory
    Inventory {
        output: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Reference time, e.g. UTC=2020-01-01T00:00:00
    reference: Option<String>,

    /// Satellite id used as product name prefix, e.g. S3A
    satellite: Option<String>,

    /// JSON configuration file providing any argument left out
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(
    cli: &Cli,
    run: Option<&RunArgs>,
    output: Option<&PathBuf>,
) -> Result<SimulatorConfig, Box<dyn std::error::Error>> {
    let mut config = match run.and_then(|run| run.config.as_ref()) {
        Some(path) => SimulatorConfig::from_file(path)?,
        None => SimulatorConfig::default(),
    };

    if let Some(run) = run {
        config = config.with_overrides(
            run.reference.as_deref(),
            run.satellite.as_deref(),
            output.map(PathBuf::as_path),
        )?;
    }

    if let Some(level) = &cli.log_level {
        config.logging_mut().level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging_mut().format = format.clone();
    }

    Ok(config)
}

fn execute(cli: &Cli, config: &SimulatorConfig) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Commands::Generate { .. } => {
            let generator = FixtureGenerator::new(
                config.reference_time()?.clone(),
                config.satellite_id()?,
                config.output_directory()?,
            )?;
            for isip_dir in generator.run()? {
                println!("{}", isip_dir.display());
            }
        }
        Commands::Plan { .. } => {
            let generator = FixtureGenerator::new(
                config.reference_time()?.clone(),
                config.satellite_id()?,
                PathBuf::new(),
            )?;
            for product in generator.plan(Utc::now().naive_utc()) {
                let granule = &product.granule;
                println!(
                    "{} {:>3} {:<5} {} {} dump={}",
                    product.product_type,
                    granule.number,
                    granule.position,
                    format_metadata_time(&granule.start),
                    format_metadata_time(&granule.stop),
                    format_metadata_time(&granule.dump_start),
                );
            }
        }
        Commands::Inventory { output } => {
            for product in inventory(output)? {
                println!("{product}");
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let (run, output) = match &cli.command {
        Commands::Generate { run, output } => (Some(run), output.as_ref()),
        Commands::Plan { run } => (Some(run), None),
        Commands::Inventory { .. } => (None, None),
    };

    let config = match load_config(&cli, run, output) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(config.logging()) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(1);
    }

    match execute(&cli, &config) {
        Ok(()) => info!("Command completed successfully"),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}
