use clap::{Parser, Subcommand};
use iiif_request::config::{self, OutputFormat};
use iiif_request::output::{self, CheckReport, RequestReport};
use log::{debug, error};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "iiif-request")]
#[command(about = "Parse and validate IIIF Image API request paths")]
#[command(long_about = "\
Parse and validate IIIF Image API request paths

A request path is the part of an image URL after the identifier:

  {region}/{size}/{rotation}/{quality}.{format}

  region    full | square | x,y,w,h | pct:x,y,w,h
  size      max | ^max | pct:n | w, | ,h | w,h | !w,h   (^ allows upscaling)
  rotation  n | !n                                     (! mirrors first)
  quality   color | gray | bitonal | default

Every segment is optional, but order is fixed.

Run 'iiif-request gen-config' to generate a documented iiif.toml.")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "iiif.toml", global = true)]
    config: PathBuf,

    /// Log parser decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a request and show its fields
    Parse {
        /// Request path, e.g. full/max/0/default.jpg
        path: String,
        /// Print a JSON report regardless of config
        #[arg(long)]
        json: bool,
    },
    /// Print the canonical form of a request
    Canonical {
        /// Request path
        path: String,
    },
    /// Check a request against image dimensions
    Check {
        /// Request path
        path: String,
        /// Source image width (falls back to [image] width in config)
        #[arg(long)]
        width: Option<u32>,
        /// Source image height (falls back to [image] height in config)
        #[arg(long)]
        height: Option<u32>,
        /// Print a JSON report regardless of config
        #[arg(long)]
        json: bool,
    },
    /// Print a stock iiif.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let load_config = || {
        let config = config::load_config(&cli.config);
        debug!("config from {}", cli.config.display());
        config
    };

    match cli.command {
        Command::Parse { ref path, json } => {
            let config = load_config()?;
            let request = iiif_request::parse(path)?;
            if json || config.output.format == OutputFormat::Json {
                output::print_json(&RequestReport::new(&request))?;
            } else {
                output::print_request(&request);
            }
        }
        Command::Canonical { ref path } => {
            let request = iiif_request::parse(path)?;
            println!("{}", request.as_string());
        }
        Command::Check {
            ref path,
            width,
            height,
            json,
        } => {
            let config = load_config()?;
            let request = iiif_request::parse(path)?;
            let image = config::effective_image_info(&config.image, width, height).ok_or(
                "image dimensions required: pass --width and --height or set [image] in config",
            )?;
            let report = CheckReport::new(&request, image);
            if json || config.output.format == OutputFormat::Json {
                output::print_json(&report)?;
            } else {
                output::print_check(&report);
            }
            if !report.fits {
                return Ok(ExitCode::from(2));
            }
        }
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(ExitCode::SUCCESS)
}
