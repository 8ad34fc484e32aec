use chrono::{DateTime, Datelike, Local};
use clap::{Parser, Subcommand};
use docsite::generate::{self, BuildOptions, Site};
use docsite::{config, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("DOCSITE_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("DOCSITE_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Static site generator for localized project documentation")]
#[command(long_about = "\
Static site generator for localized project documentation

Builds a landing page, a documentation tree, and an optional blog for every
configured locale. The default locale is served at the site root; every other
locale gets its own tree under /<locale>/.

Site structure:

  site/
  ├── site.toml                    # Title, locales, navbar, footer, theme
  ├── sidebars.toml                # Sidebar definitions (optional)
  ├── docs/                        # Documentation (default locale)
  │   ├── index.md                 # → /docs/
  │   └── 010-packages/
  │       └── overview.md          # → /docs/packages/overview/
  ├── blog/                        # YYYY-MM-DD-slug.md posts (optional)
  ├── static/                      # Copied to the output root
  └── i18n/
      ├── en/content.toml          # Homepage strings and feature cards
      └── zh-Hans/
          ├── content.toml
          └── docs/                # Translated docs, same layout as docs/

Every link, icon, and sidebar entry is checked before anything is written;
a broken reference fails the build and leaves the output directory untouched.

Run 'docsite gen-config' to generate a documented site.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "build", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site for every (or the selected) locale
    Build {
        /// Only build this locale (repeatable)
        #[arg(long = "locale")]
        locales: Vec<String>,
    },
    /// Resolve and render everything without writing output
    Check,
    /// Print the resolved configuration of one locale as JSON
    Resolve {
        #[arg(long)]
        locale: String,
    },
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build { locales } => {
            let site_config = config::load_config(&cli.source)?;
            init_thread_pool(&site_config.processing);
            let options = BuildOptions {
                locales,
                year: build_year(),
            };

            println!("==> Building {}", cli.source.display());
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = generate::build(&cli.source, &cli.output, &options, Some(tx));
            printer.join().map_err(|_| "progress printer panicked")?;
            let report = result?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let site_config = config::load_config(&cli.source)?;
            init_thread_pool(&site_config.processing);
            println!("==> Checking {}", cli.source.display());
            let options = BuildOptions {
                locales: Vec::new(),
                year: build_year(),
            };
            let report = generate::check(&cli.source, &options)?;
            output::print_check_output(&report);
            println!("==> Site is valid");
        }
        Command::Resolve { locale } => {
            let site = Site::load(&cli.source)?;
            let resolved = site.resolved_config(&locale)?;
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Year for `{year}` in the footer: from `SOURCE_DATE_EPOCH` when set, so
/// rebuilding an old commit reproduces its output, otherwise the current year.
fn build_year() -> i32 {
    std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.year())
        .unwrap_or_else(|| Local::now().year())
}
