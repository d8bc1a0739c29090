use clap::{Parser, Subcommand};
use lightgal::simulate::Click;
use lightgal::{config, markup, output, scan, simulate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lightgal")]
#[command(about = "Thumbnail gallery widget: render, inspect and simulate galleries")]
#[command(long_about = "\
Thumbnail gallery widget: render, inspect and simulate galleries

A gallery is a directory of images. Thumbnails carry a marker in their file
name and are paired with a full-size file carrying the large marker:

  photos/
  ├── 010-cat-thumb.jpg     # Thumbnail
  ├── 010-cat-lg.jpg        # Its full-size image
  ├── 020-dog-thumb.jpg     # No -lg partner: still shows 020-dog-lg.jpg
  └── boat.png              # No marker: its own full-size image

Captions come from file names (010-My-Cat-thumb.jpg → \"My Cat\").
With strategy = \"anchor-href\", a thumbnail without a partner links to
itself. The generated viewer needs galleryElementSelector to be a bare #id.

Run 'lightgal gen-config' to generate a documented options file.")]
#[command(version)]
struct Cli {
    /// Options file (TOML), overlaid on the defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the thumbnail/full-size pairs found in a directory
    Scan {
        /// Gallery directory
        dir: PathBuf,
    },
    /// Write a static gallery page for a directory
    Render {
        /// Gallery directory
        dir: PathBuf,
        /// Output file
        #[arg(long, default_value = "index.html")]
        output: PathBuf,
        /// Page title (defaults to the directory name)
        #[arg(long)]
        title: Option<String>,
    },
    /// Bind the widget to an in-memory page and replay clicks
    Simulate {
        /// Gallery directory
        dir: PathBuf,
        /// Click as INDEX@MS (0-based thumbnail index, milliseconds); repeatable
        #[arg(long = "click", value_name = "INDEX@MS")]
        clicks: Vec<Click>,
        /// Print the timeline as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock options file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan { dir } => {
            let config = config::load_config(cli.config.as_deref())?;
            let entries = scan::scan(&dir, &config)?;
            output::print_scan_output(&entries);
        }
        Command::Render { dir, output, title } => {
            let config = config::load_config(cli.config.as_deref())?;
            let entries = scan::scan(&dir, &config)?;
            let title = title.unwrap_or_else(|| default_title(&dir));
            let page = markup::render_page(&title, &entries, &config)?;
            std::fs::write(&output, page.into_string())?;
            println!(
                "==> Wrote {} ({} thumbnails)",
                output.display(),
                entries.len()
            );
        }
        Command::Simulate { dir, clicks, json } => {
            let config = config::load_config(cli.config.as_deref())?;
            let entries = scan::scan(&dir, &config)?;
            let timeline = simulate::simulate(&entries, &config, &clicks)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&timeline)?);
            } else {
                output::print_timeline(&timeline);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Directory name, or "Gallery" for paths like `.` or `/`.
fn default_title(dir: &std::path::Path) -> String {
    dir.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "Gallery".to_string())
}
