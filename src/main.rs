use clap::{Parser, Subcommand};
use quire::repo::Repo;
use quire::storage::DiskStorage;
use quire::{config, output, pipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Static blog generator")]
#[command(long_about = "\
Static blog generator

Posts are markdown files with YAML frontmatter. The whole site is laid out
in memory and written in one pass; any invalid post aborts the build before
anything is written.

Source structure:

  blog/
  ├── quire.toml                 # Site config (optional)
  ├── about.md                   # About page body (optional, no frontmatter)
  ├── assets/                    # Copied over the site root, replacing built-ins
  └── posts/
      ├── complex-numbers.md     # One post per file
      └── ownership.md

Post frontmatter:

  ---
  title: Complex numbers
  summary: A short tour of the complex plane
  tags: [Math, Python]
  created: 2019-11-12
  ---

Run 'quire gen-config' to generate a documented quire.toml.")]
#[command(version)]
struct Cli {
    /// Source directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory; the site is written to a subdirectory of it
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    /// Log pipeline diagnostics to stderr (filter with RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site into the output directory
    Build,
    /// Parse posts and lay out the site without writing anything
    Check,
    /// Print the parsed posts as JSON
    Scan,
    /// Print a stock quire.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if cli.verbose {
        init_tracing();
    }

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.source)?;
            init_thread_pool(&config.processing);
            println!("==> Building {}", cli.source.display());
            let blog = pipeline::build(&DiskStorage, &cli.source, &cli.output, &config)?;
            output::print_build_output(&blog.repo, &blog.site, &cli.output);
        }
        Command::Check => {
            let config = config::load_config(&cli.source)?;
            init_thread_pool(&config.processing);
            println!("==> Checking {}", cli.source.display());
            let sources = pipeline::load(&DiskStorage, &cli.source, &config)?;
            let blog = pipeline::render(sources, &config)?;
            output::print_check_output(&blog.repo, &blog.site);
            println!("==> Content is valid");
        }
        Command::Scan => {
            let config = config::load_config(&cli.source)?;
            init_thread_pool(&config.processing);
            let sources = pipeline::load(&DiskStorage, &cli.source, &config)?;
            let repo = Repo::new(sources.posts);
            println!("{}", serde_json::to_string_pretty(repo.posts())?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Diagnostics go to stderr so `quire scan` output stays valid JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quire=debug"));
    tracing_subscriber::fmt::fmt()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(filter)
        .finish()
        .init();
    tracing::debug!("logger initialized");
}
