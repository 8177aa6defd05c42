use clap::{Parser, Subcommand};
use print_site::{compose, config, document, output, site, templates};
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
#[command(name = "print-site")]
#[command(about = "Combine a rendered documentation site into one printable page")]
#[command(long_about = "\
Combine a rendered documentation site into one printable page

Takes a JSON snapshot of a rendered site's navigation tree and emits a single
HTML document with working internal links, namespaced anchors, hierarchical
heading numbers and a table of contents — ready for the browser's print
dialog or a PDF converter.

Site manifest structure (produced by the host site generator):

  {
    \"site_name\": \"My Docs\",
    \"site_url\": \"https://docs.example.com\",
    \"use_directory_urls\": true,
    \"nav\": [
      { \"type\": \"page\", \"title\": \"Home\", \"src_path\": \"index.md\",
        \"url\": \"\", \"html\": \"<h1 id=...>...\" },
      { \"type\": \"section\", \"title\": \"Chapter 1\", \"children\": [ ... ] }
    ]
  }

Run 'print-site gen-config' to generate a documented print-site.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site manifest produced by the host site generator
    #[arg(long, default_value = "site.json", global = true)]
    site: PathBuf,

    /// Configuration file
    #[arg(long, default_value = "print-site.toml", global = true)]
    config: PathBuf,

    /// Output HTML file
    #[arg(long, default_value = "print_page.html", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose the print page and write it to the output file
    Build,
    /// Compose the print page without writing anything
    Check,
    /// Print a stock print-site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Composing {}", cli.site.display());
            let (config, composed) = compose_site(&cli)?;
            output::print_build_output(&composed);

            let page = document::base_document(&config.print_page_title, &composed.html);
            std::fs::write(&cli.output, page.into_string())?;
            println!("==> Print page written to {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.site.display());
            let (_, composed) = compose_site(&cli)?;
            output::print_build_output(&composed);
            if composed.warnings.is_empty() {
                println!("==> Site composes cleanly");
            } else {
                println!("==> Site composes with {} warning(s)", composed.warnings.len());
            }
        }
        Command::GenConfig => {
            print!("{}", config::STOCK_CONFIG_TOML);
        }
    }

    Ok(())
}

/// Load config, templates and the site manifest, then compose the print page.
fn compose_site(
    cli: &Cli,
) -> Result<(config::PrintConfig, compose::Composed), Box<dyn std::error::Error>> {
    let config = config::load_config(&cli.config)?;
    let templates = templates::Templates::load(&config)?;
    let site = site::load_site(&cli.site)?;
    let composed = compose::write_combined(&site, &config, &templates)?;
    Ok((config, composed))
}
