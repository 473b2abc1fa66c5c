use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api_crawler::core::{ApiCrawler, Direction, Snapshot};
use api_crawler::formatters::{JsonDiffFormatter, ReportFormatter};
use api_crawler::CrawlerConfig;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "api-crawler",
    version,
    about = "Extract and diff the public API surface of Python source trees"
)]
struct Cli {
    /// Log progress to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Crawl a directory and write its API snapshot as JSON
    Snapshot {
        /// Root directory to crawl
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        crawl: CrawlArgs,
    },
    /// Compare two trees or saved snapshots
    Diff {
        /// Former tree directory or snapshot JSON file
        #[arg(value_name = "FORMER")]
        former: PathBuf,

        /// Latter tree directory or snapshot JSON file
        #[arg(value_name = "LATTER")]
        latter: PathBuf,

        /// Report only one direction
        #[arg(long, value_enum)]
        only: Option<DirectionArg>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Exit with status 1 when anything was removed
        #[arg(long)]
        fail_on_removed: bool,

        #[command(flatten)]
        crawl: CrawlArgs,
    },
}

#[derive(Debug, Clone, Args)]
struct CrawlArgs {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Comma-separated directory fragments to skip (replaces the configured list)
    #[arg(short, long, value_name = "FRAGMENTS", value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    /// Keep the crawled directory's own name as the leading package
    #[arg(long)]
    keep_root_name: bool,
}

impl CrawlArgs {
    fn load_config(&self) -> Result<CrawlerConfig> {
        let mut config = match &self.config {
            Some(path) => CrawlerConfig::from_file(path)?,
            None => CrawlerConfig::default(),
        };
        if let Some(exclude) = &self.exclude {
            let exclude = exclude
                .iter()
                .map(|fragment| fragment.trim().to_string())
                .filter(|fragment| !fragment.is_empty())
                .collect();
            config = config.with_exclude(exclude);
        }
        if self.keep_root_name {
            config = config.with_root_name(true);
        }
        Ok(config)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum DirectionArg {
    Removed,
    Added,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Removed => Direction::Removed,
            DirectionArg::Added => Direction::Added,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Snapshot {
            input,
            output,
            crawl,
        } => {
            let mut crawler = ApiCrawler::new(&crawl.load_config()?)?;
            let snapshot = crawler.snapshot(&input)?;
            match output {
                Some(path) => {
                    snapshot.save(&path)?;
                    info!("Snapshot written to {}", path.display());
                }
                None => println!("{}", snapshot.to_json()?),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Diff {
            former,
            latter,
            only,
            format,
            fail_on_removed,
            crawl,
        } => {
            let mut crawler = ApiCrawler::new(&crawl.load_config()?)?;
            let former_snapshot = load_or_crawl(&mut crawler, &former)?;
            let latter_snapshot = load_or_crawl(&mut crawler, &latter)?;

            let (lines, removed_any, json) = match only {
                Some(direction) => {
                    let diff = crawler.diff(&former_snapshot, &latter_snapshot, direction.into());
                    let lines = ReportFormatter::new().render(&diff);
                    let removed_any = diff.direction() == Direction::Removed && !diff.is_empty();
                    let json = match format {
                        OutputFormat::Json => Some(JsonDiffFormatter::new().format(&diff)?),
                        OutputFormat::Text => None,
                    };
                    (lines, removed_any, json)
                }
                None => {
                    let report = crawler.compare(&former_snapshot, &latter_snapshot);
                    let json = match format {
                        OutputFormat::Json => Some(
                            JsonDiffFormatter::new()
                                .format_report(&report.removed_diff, &report.added_diff)?,
                        ),
                        OutputFormat::Text => None,
                    };
                    (report.lines(), report.has_removals(), json)
                }
            };

            match json {
                Some(json) => println!("{}", json),
                None => lines.iter().for_each(|line| println!("{}", line)),
            }

            if fail_on_removed && removed_any {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn load_or_crawl(crawler: &mut ApiCrawler, path: &Path) -> Result<Snapshot> {
    if path.is_dir() {
        crawler
            .snapshot(path)
            .with_context(|| format!("Failed to crawl {}", path.display()))
    } else {
        Ok(Snapshot::load(path)?)
    }
}
