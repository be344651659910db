use apidoc::config::{self, OutputFormat};
use apidoc::{output, scan, serialize};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "apidoc")]
#[command(about = "Build an API reference data file from TOML description records")]
#[command(long_about = "\
Build an API reference data file from TOML description records

The description tree is the data source. Lowercase files are functions,
Uppercase directories are objects, Uppercase files are enums, and lowercase
directories next to the root module's record are modules.

Source structure:

  api/
  ├── apidoc.toml                  # Build config (optional)
  ├── init.json                    # Generated output
  └── lovr/                        # Root module
      ├── init.toml                # Module record
      ├── getVersion.toml          # Function → lovr.getVersion
      ├── callbacks/
      │   └── draw.toml            # Callback → lovr.draw
      └── graphics/                # Module → lovr.graphics
          ├── init.toml
          ├── newBuffer.toml       # Function → lovr.graphics.newBuffer
          ├── DrawStyle.toml       # Enum → DrawStyle
          └── Buffer/              # Object → Buffer
              ├── init.toml
              └── getSize.toml     # Method → Buffer:getSize

Run 'apidoc gen-config' to generate a documented apidoc.toml.")]
#[command(version)]
struct Cli {
    /// Source directory containing the root module
    #[arg(long, default_value = "api", global = true)]
    source: PathBuf,

    /// Output file (overrides apidoc.toml)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Output format (overrides apidoc.toml)
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Reject entries that fit no naming convention
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk the description tree and write the data file
    Build,
    /// Walk the description tree without writing anything
    Check,
    /// Print a stock apidoc.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apidoc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let mut build_config = config::load_config(&cli.source)?;
    if let Some(format) = cli.format {
        build_config.format = format;
    }
    if cli.strict {
        build_config.strict_naming = true;
    }

    match cli.command {
        Command::Build => {
            println!("==> Scanning {}", cli.source.display());
            let api = scan::scan(&cli.source, &build_config)?;
            output::print_scan_output(&api);

            let dest = cli
                .output
                .clone()
                .unwrap_or_else(|| build_config.output_path(&cli.source));
            serialize::write(&api, build_config.format, &dest)?;
            output::print_build_output(&dest);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let api = scan::scan(&cli.source, &build_config)?;
            output::print_scan_output(&api);
            println!("==> Description tree is valid");
        }
        Command::GenConfig => unreachable!("handled above"),
    }

    Ok(())
}
