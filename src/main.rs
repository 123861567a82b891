use clap::{Parser, Subcommand};
use std::path::PathBuf;
use waymark::{config, generate, output};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "waymark")]
#[command(about = "Adaptive site header and pages for destination sites")]
#[command(long_about = "\
Adaptive site header and pages for destination sites

The navigation tree, header behavior and call to action live in site.toml.
Markdown files in the content directory become pages rendered inside the
header layout.

Content structure:

  content/
  ├── site.toml            # Navigation, header settings, colors
  ├── index.md             # Home page → index.html
  ├── events.md            # → events/index.html
  └── explore/
      └── areas.md         # → explore/areas/index.html

Run 'waymark gen-config' to generate a documented site.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate site.toml without generating anything
    Check,
    /// Print the navigation tree
    Tree,
    /// Render every content page inside the header layout
    Generate,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            output::print_check_output(&site_config);
            println!("==> Configuration is valid");
        }
        Command::Tree => {
            let site_config = config::load_config(&cli.source)?;
            output::print_navigation_tree(&site_config.navigation);
        }
        Command::Generate => {
            println!("==> Generating {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&cli.source, &cli.output)?;
            output::print_generate_output(&report, &cli.source);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}
