use clap::{Parser, Subcommand};
use custodian_site::{config, content, output, probe, render};
use std::path::PathBuf;

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
#[command(name = "custodian-site")]
#[command(about = "Static site generator for the Custodian Economy storytelling site")]
#[command(long_about = "\
Static site generator for the Custodian Economy storytelling site

All copy lives in one content file; all media lives on the CDN and is
referenced by relative path. The build output is plain HTML with responsive
picture/video markup and no JavaScript runtime.

Project layout:

  site.toml                # Site config (optional; run gen-config for a template)
  content/
  └── site.toml            # Hero, stats, stories, sections
  dist/                    # Build output

Backend checks:

  'custodian-site check' probes the hosted data backend (one read per
  table) using SUPABASE_URL and SUPABASE_ANON_KEY from the environment
  or a .env file.")]
#[command(version = version_string())]
struct Cli {
    /// Site config file
    #[arg(long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Content file
    #[arg(long, default_value = "content/site.toml", global = true)]
    content: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site into the output directory
    Build {
        /// Also write a site-manifest.json dump of the resolved config + content
        #[arg(long)]
        manifest: bool,
    },
    /// Probe backend connectivity (one read per table) and report
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build { manifest } => {
            let site_config = config::load_config(&cli.config)?;
            let site_content = content::load_content(&cli.content)?;

            let pages = render::generate(&site_config, &site_content, &cli.output)?;

            if manifest {
                let dump = serde_json::json!({
                    "config": site_config,
                    "content": site_content,
                });
                let manifest_path = cli.output.join("site-manifest.json");
                std::fs::write(&manifest_path, serde_json::to_string_pretty(&dump)?)?;
                println!("Wrote {}", manifest_path.display());
            }

            output::print_build_output(&pages);
            println!("Site generated at {}", cli.output.display());
        }
        Command::Check => {
            // .env is optional; real environments set the variables directly.
            dotenvy::dotenv().ok();
            let target = probe::ProbeTarget::from_env()?;
            let results = probe::run_probes(&target)?;
            output::print_probe_report(&results);

            if results.iter().any(|r| r.outcome.is_err()) {
                std::process::exit(1);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
