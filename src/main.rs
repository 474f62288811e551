use chrono::Datelike;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::JoinHandle;
use yesilada_site::publish::{self, PublishEvent, PublishResult};
use yesilada_site::{config, generate, output, scan};

/// Shared flags for commands that copy the public directory.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the publish cache and copy every file again
    #[arg(long)]
    no_cache: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "yesilada-site")]
#[command(about = "Static site generator for the Yeşilada Demircilik website")]
#[command(long_about = "\
Static site generator for the Yeşilada Demircilik website

The public directory is the media library. Every image and video in it shows
up in the gallery; the best candidates fill the home hero, the project cards
and the about cover. Everything in public/ is copied to the output verbatim.

Source structure:

  site/
  ├── config.toml                  # Site config (optional, overrides defaults)
  ├── about.md                     # About page intro (optional, markdown)
  └── public/                      # Served verbatim, scanned for media
      ├── Dükkan.jpg               # Storefront photo → about cover
      ├── window.svg               # Fallback image
      ├── robots.txt               # Non-media files are copied too
      └── projeler/
          ├── 010-cati.jpg         # Numbered files sort first
          ├── 020-kapi.webp
          └── kaynak.mp4           # Videos appear in the gallery

Pages: / (home), /about, /services, /gallery, /contact.

Run 'yesilada-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site source directory
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (scan manifest)
    #[arg(long, default_value = ".yesilada-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the public directory into a manifest
    Scan,
    /// Copy the public directory into the output
    Publish(CacheArgs),
    /// Render the HTML pages from the manifest
    Generate,
    /// Run the full pipeline: scan → publish → generate
    Build(CacheArgs),
    /// Validate the site source without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let manifest_path = cli.temp_dir.join("manifest.json");

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Publish(cache_args) => {
            let site_config = config::load_config(&cli.source)?;
            let result = run_publish(&cli.source, &site_config, &cli.output, &cache_args)?;
            println!("Cache: {}", result.cache_stats);
        }
        Command::Generate => {
            let report = generate::generate(&manifest_path, &cli.output, current_year())?;
            output::print_generate_output(&report);
        }
        Command::Build(cache_args) => {
            std::fs::create_dir_all(&cli.temp_dir)?;

            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Publishing assets → {}", cli.output.display());
            let result = run_publish(&cli.source, &manifest.config, &cli.output, &cache_args)?;
            println!("Cache: {}", result.cache_stats);

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&manifest_path, &cli.output, current_year())?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Site source is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)?;
    Ok(())
}

/// Copy the public directory with a printer thread draining progress events.
fn run_publish(
    source: &Path,
    site_config: &config::SiteConfig,
    output_dir: &Path,
    cache_args: &CacheArgs,
) -> Result<PublishResult, Box<dyn std::error::Error>> {
    init_thread_pool(&site_config.processing);
    let (tx, rx) = mpsc::channel();
    let printer = spawn_printer(rx);
    let result = publish::publish(
        &source.join(&site_config.public_dir),
        output_dir,
        !cache_args.no_cache,
        Some(tx),
    );
    printer
        .join()
        .map_err(|_| "publish progress printer panicked")?;
    Ok(result?)
}

fn spawn_printer(rx: mpsc::Receiver<PublishEvent>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for event in rx {
            println!("{}", output::format_publish_event(&event));
        }
    })
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

fn current_year() -> i32 {
    chrono::Local::now().year()
}
