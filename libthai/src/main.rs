use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libthai::{Engine, RedbStore, ScoredMatch, ThaiConfig};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::{RawKeys, Screen};

#[derive(Parser)]
#[command(name = "libthai")]
#[command(about = "Type Thai by sound: romanized input to ranked Thai words")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Single romanized input for a one-shot query
    input: Option<String>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Corpus database (overrides the config file)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Show match type, score and frequency; debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of matches to print
    #[arg(short = 'n', long, default_value_t = 5, global = true)]
    top: usize,

    /// Print matches as JSON (one-shot queries)
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Line-oriented interactive lookup
    Repl,
    /// Real-time IME on a raw terminal
    Ime,
    /// Recreate the corpus database from the seed lists
    Build {
        /// Extra entries: text<TAB>romanization<TAB>frequency[<TAB>category]
        #[arg(long)]
        tsv: Option<PathBuf>,
    },
    /// Entry counts per category
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ThaiConfig::load_toml(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ThaiConfig::default(),
    };
    if let Some(db) = &cli.database {
        config.database = db.clone();
    }
    config.verbose |= cli.verbose;

    // Debug logs would scribble over the IME screen.
    let is_ime = matches!(cli.command, Some(Commands::Ime));
    init_tracing(config.verbose && !is_ime);

    match cli.command {
        Some(Commands::Repl) => run_repl(&config, cli.top),
        Some(Commands::Ime) => run_ime(&config),
        Some(Commands::Build { tsv }) => run_build(&config, tsv.as_deref()),
        Some(Commands::Stats) => run_stats(&config),
        None => match cli.input {
            Some(input) => run_query(&config, &input, cli.top, cli.json),
            None => run_repl(&config, cli.top),
        },
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_engine(config: &ThaiConfig) -> Result<Engine<RedbStore>> {
    let store = libthai::open_store(&config.database)
        .with_context(|| format!("opening corpus {}", config.database.display()))?;
    Ok(Engine::new(store, config.base.clone()))
}

/// 1234567 -> "1,234,567"
pub(crate) fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn print_matches(query: &str, matches: &[ScoredMatch], verbose: bool) {
    if matches.is_empty() {
        println!("No matches found for '{}'", query);
        return;
    }
    println!("\nMatches for '{}':", query);
    for (i, m) in matches.iter().enumerate() {
        let freq = if m.frequency > 0 {
            format!(", freq:{}", group_thousands(m.frequency))
        } else {
            String::new()
        };
        let kind = if verbose {
            format!(" [{}]", m.match_type)
        } else {
            String::new()
        };
        println!(
            "  {}. {} ({}) - score: {:.1}{}{}",
            i + 1,
            m.text,
            m.romanization,
            m.score,
            freq,
            kind
        );
    }
}

fn run_query(config: &ThaiConfig, input: &str, top: usize, json: bool) -> Result<()> {
    let engine = open_engine(config)?;
    let matches = engine.find_matches(input, top)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        print_matches(input, &matches, config.verbose);
    }
    Ok(())
}

fn run_repl(config: &ThaiConfig, top: usize) -> Result<()> {
    let engine = open_engine(config)?;

    println!("Thai Phonetic Input");
    println!("Type romanized text to find Thai words. Type 'quit' to exit.");
    println!("Use `libthai ime` for real-time input.");
    println!("{}", "-".repeat(40));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\n> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let input = line.context("reading stdin")?;
        let input = input.trim();
        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q") {
            println!("Goodbye!");
            break;
        }
        if input.is_empty() {
            continue;
        }
        let matches = engine.find_matches(input, top)?;
        print_matches(input, &matches, config.verbose);
    }
    Ok(())
}

fn run_ime(config: &ThaiConfig) -> Result<()> {
    let engine = open_engine(config)?;
    let mut screen = Screen::new(io::stdout(), config.verbose);
    screen.header()?;

    let mut keys = RawKeys::enable().context("entering raw mode")?;
    let mut ime = engine.start_session();
    screen.draw(ime.session())?;
    ime.run(&mut keys, |session, result| -> Result<()> {
        screen.update(session, result)?;
        Ok(())
    })
}

fn run_build(config: &ThaiConfig, tsv: Option<&Path>) -> Result<()> {
    let (store, report) = libthai::build_store(&config.database, tsv)
        .with_context(|| format!("building corpus {}", config.database.display()))?;
    println!("Seeded {} entries", report.seeded);
    if let Some(imported) = report.imported {
        println!(
            "Imported {} entries ({} duplicates, {} malformed lines)",
            imported.inserted, imported.duplicates, imported.malformed
        );
    }
    print_counts(&store)?;
    println!("Database: {}", config.database.display());
    Ok(())
}

fn run_stats(config: &ThaiConfig) -> Result<()> {
    let store = libthai::open_store(&config.database)
        .with_context(|| format!("opening corpus {}", config.database.display()))?;
    print_counts(&store)
}

fn print_counts(store: &RedbStore) -> Result<()> {
    println!("Total entries: {}", group_thousands(store.len()?));
    println!("Category breakdown:");
    let mut counts: Vec<_> = store.category_counts()?.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    for (category, count) in counts {
        println!("  {}: {}", category, group_thousands(count as u64));
    }
    Ok(())
}
