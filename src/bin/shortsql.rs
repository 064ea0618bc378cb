//! shortsql — The ShortSQL CLI
//!
//! Turns a query description into a ShortSQL string.
//!
//! # Usage
//!
//! ```bash
//! # Render a JSON description
//! shortsql build query.json
//!
//! # URL-safe output from stdin
//! echo '{"table": "users"}' | shortsql build --url-safe
//!
//! # Show the segments
//! shortsql explain query.toml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use shortsql::config::{Config, OutputFormat};
use shortsql::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shortsql")]
#[command(version)]
#[command(about = "Compact ShortSQL query strings", long_about = None)]
#[command(after_help = "EXAMPLES:
    shortsql build query.json
    shortsql build query.toml --url-safe
    echo '{\"table\": \"users\"}' | shortsql build
    shortsql decode '@users~%5Bid'")]
struct Cli {
    /// Config file (defaults to ./shortsql.toml, then the user config dir)
    #[arg(long, global = true, env = "SHORTSQL_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Plain,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => OutputFormat::Plain,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a query description (JSON, or TOML for *.toml files)
    Build {
        /// Description file; stdin (JSON) when absent or '-'
        file: Option<PathBuf>,

        /// Percent-encode the result for use in a URL
        #[arg(short, long)]
        url_safe: bool,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },
    /// Show the segments a query description renders to
    Explain {
        /// Description file; stdin (JSON) when absent or '-'
        file: Option<PathBuf>,
    },
    /// Percent-decode a URL-safe ShortSQL string
    Decode {
        /// The encoded string
        input: String,
    },
    /// Show the symbol reference
    Symbols,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Build {
            file,
            url_safe,
            format,
        } => {
            let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
            let url_safe = *url_safe || config.output.url_safe;
            let format = (*format).map(OutputFormat::from).unwrap_or(config.output.format);
            build(file.as_deref(), url_safe, format)
        }
        Commands::Explain { file } => explain(file.as_deref()),
        Commands::Decode { input } => {
            println!("{}", shortsql::encode::decode(input));
            Ok(())
        }
        Commands::Symbols => {
            show_symbols();
            Ok(())
        }
    }
}

fn load_query(file: Option<&Path>) -> Result<ShortSql> {
    match file {
        Some(path) if path != Path::new("-") => {
            tracing::debug!(path = %path.display(), "reading query description");
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let is_toml = path.extension().is_some_and(|ext| ext == "toml");
            let sql = if is_toml {
                shortsql::from_toml(&content)?
            } else {
                shortsql::from_json(&content)?
            };
            Ok(sql)
        }
        _ => {
            tracing::debug!("reading query description from stdin");
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Ok(shortsql::from_json(&content)?)
        }
    }
}

fn build(file: Option<&Path>, url_safe: bool, format: OutputFormat) -> Result<()> {
    let sql = load_query(file)?;
    let rendered = sql.render(url_safe);

    match format {
        OutputFormat::Plain => println!("{}", rendered),
        OutputFormat::Json => {
            let out = serde_json::json!({
                "shortsql": rendered,
                "url_safe": url_safe,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}

fn explain(file: Option<&Path>) -> Result<()> {
    let sql = load_query(file)?;

    println!("{}", "ShortSQL Explanation".cyan().bold());
    println!();
    println!("{}", "Segments:".green().bold());
    for segment in sql.segments() {
        println!(
            "  {} {:7} {}",
            segment.kind.sigil().to_string().cyan().bold(),
            segment.kind.name().dimmed(),
            segment.body.white()
        );
    }

    println!();
    println!("{}", "ShortSQL:".green().bold());
    println!("  {}", sql.render(false).white());
    println!("{}", "URL-safe:".green().bold());
    println!("  {}", sql.render(true).white());
    Ok(())
}

fn show_symbols() {
    println!("{}", "ShortSQL Symbol Reference".cyan().bold());
    println!();

    let symbols = [
        ("@", "Table", "Target table", "@users"),
        ("+", "Join", "Joined table and its conditions", "+roles||users.role|=|roles.id"),
        ("[", "Fields", "Projected fields, name:alias", "[id,email:mail"),
        ("?", "Where", "Conditions, connector|field|op|value", "?age|>|18||and|active|=|1"),
        (">", "Order", "Ordered field, :dir when directed", ">created:dir"),
        ("-", "Limit", "Count and optional offset", "-10:20"),
        ("[", "Group", "Group-by fields (last segment)", "[role"),
        ("~", "Split", "Separates segments", "@users~[id"),
    ];

    println!(
        "{:8} {:8} {:40} {}",
        "Symbol".white().bold(),
        "Segment".white().bold(),
        "Content".white().bold(),
        "Example".white().bold()
    );
    println!("{}", "─".repeat(90).dimmed());

    for (symbol, segment, content, example) in symbols {
        println!(
            "{:8} {:8} {:40} {}",
            symbol.cyan().bold(),
            segment.yellow(),
            content.white(),
            example.dimmed()
        );
    }
}
