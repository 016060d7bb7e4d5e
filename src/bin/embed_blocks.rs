//! Scrape a page and print its content and embed blocks.
//!
//! Usage: embed_blocks <URL> [--selector SEL]... [--format text|json|html]
//!
//! Logs go to stderr; set RUST_LOG to adjust (default `info`).

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use rs_embed_blocks::render::{self, PageView};
use rs_embed_blocks::{Options, Scraper};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Html,
}

#[derive(Parser)]
#[command(
    name = "embed_blocks",
    version,
    about = "Extract content blocks and iframe+script embeds from a web page"
)]
struct Cli {
    /// Page to scrape. `https://` is assumed when no scheme is given.
    url: String,

    /// Root selector; repeat for several. Defaults to the built-in list.
    #[arg(short, long = "selector", value_name = "SEL")]
    selectors: Vec<String>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Title fetches in flight at once
    #[arg(long, default_value_t = 1)]
    title_concurrency: usize,

    /// Skip fetching embed targets for titles
    #[arg(long)]
    no_titles: bool,

    /// Join consecutive content blocks into one
    #[arg(long)]
    merge_content: bool,

    /// Timeout for each request, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    timeout: u64,

    #[arg(long, env = "EMBED_BLOCKS_USER_AGENT")]
    user_agent: Option<String>,

    /// Include the full page source (html format only)
    #[arg(long)]
    show_source: bool,
}

impl Cli {
    fn options(&self) -> Options {
        let mut options = Options {
            merge_adjacent_content: self.merge_content,
            resolve_titles: !self.no_titles,
            title_concurrency: self.title_concurrency,
            timeout: Duration::from_secs(self.timeout),
            ..Options::default()
        };
        if !self.selectors.is_empty() {
            options.selectors.clone_from(&self.selectors);
        }
        if let Some(ua) = &self.user_agent {
            options.user_agent.clone_from(ua);
        }
        options
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.options();
    let scraper = Scraper::new(options.clone())?;
    let outcome = scraper.scrape(&cli.url).await;

    if cli.format == Format::Html {
        print!(
            "{}",
            render::page(&PageView {
                submitted_url: &cli.url,
                outcome: Some(&outcome),
                selectors: &options.selectors,
                show_source: cli.show_source,
            })
        );
        return Ok(if outcome.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let report = match outcome {
        Ok(report) => report,
        Err(err) => {
            tracing::error!(error = %err, "scrape failed");
            eprintln!("{}", render::user_message(&err));
            return Ok(ExitCode::FAILURE);
        }
    };

    if report.roots_matched == 0 {
        eprintln!(
            "Could not find {} in the page.",
            options.selectors.join(", ")
        );
    }

    match cli.format {
        Format::Json => println!("{}", render::json(&report)?),
        _ => print!("{}", render::text(&report)),
    }
    Ok(ExitCode::SUCCESS)
}
