use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use suffixnet::automaton::{build_network, TransitionNetwork};
use suffixnet::index::{SuffixTree, SuffixTreeBuilder, TreeStats};
use suffixnet::{output, Direction, IndexConfig};

#[derive(Parser)]
#[command(name = "suffixnet")]
#[command(about = "Build generalized suffix trees and their transition networks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Args)]
struct Input {
    /// Input texts (without terminator)
    texts: Vec<String>,

    /// Read texts from a file, one text per line
    #[arg(short, long = "file")]
    files: Vec<PathBuf>,

    /// JSON config file (defaults to config.json in the data directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Terminator closing every text
    #[arg(short, long)]
    terminator: Option<char>,

    /// Fold texts and patterns to lowercase
    #[arg(short = 'i', long)]
    ignore_case: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the suffix tree
    Tree {
        #[command(flatten)]
        input: Input,
    },
    /// Print the transition network of the texts
    Network {
        #[command(flatten)]
        input: Input,

        /// Read suffix labels back to front
        #[arg(short, long)]
        reversed: bool,

        /// Print the network as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the occurrences of a pattern as text:offset
    Find {
        /// Pattern to look up
        pattern: String,

        #[command(flatten)]
        input: Input,
    },
    /// Show tree statistics
    Stats {
        #[command(flatten)]
        input: Input,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

/// JSON shape of the `network` command
#[derive(Serialize)]
struct NetworkDocument<'a> {
    texts: Vec<String>,
    labels: Vec<String>,
    network: &'a TransitionNetwork,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    suffixnet::init_logging(level);

    let color = !cli.no_color;

    match cli.command {
        Commands::Tree { input } => {
            let (tree, _) = build_tree(&input)?;
            output::print_tree(&tree, color)?;
        }
        Commands::Network {
            input,
            reversed,
            json,
        } => {
            let (tree, config) = build_tree(&input)?;
            let direction = if reversed {
                Direction::Reversed
            } else {
                config.direction
            };
            let network = build_network(&tree, direction).context("Failed to build network")?;

            if json {
                print_network_json(&tree, &network)?;
            } else {
                output::print_network(&network, color)?;
            }
        }
        Commands::Find { pattern, input } => {
            let (tree, _) = build_tree(&input)?;
            let positions = tree.occurrences(&pattern);
            if positions.is_empty() {
                eprintln!("No occurrences of {:?}", pattern);
            }
            output::print_occurrences(&tree, &positions, color)?;
        }
        Commands::Stats { input, json } => {
            let (tree, _) = build_tree(&input)?;
            let stats = TreeStats::collect(&tree)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                output::print_stats(&stats)?;
            }
        }
    }

    Ok(())
}

/// Resolve the configuration and feed every input text to a builder
fn build_tree(input: &Input) -> Result<(SuffixTree, IndexConfig)> {
    let mut config = match &input.config {
        Some(path) => IndexConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => IndexConfig::load_default().context("Failed to load default config")?,
    };
    if let Some(terminator) = input.terminator {
        config.terminator = terminator;
    }
    if input.ignore_case {
        config.case_insensitive = true;
    }
    let mut texts = input.texts.clone();
    for path in &input.files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        texts.extend(content.lines().map(str::to_string));
    }
    if texts.is_empty() {
        bail!("No input texts given");
    }

    tracing::info!(texts = texts.len(), "building suffix tree");
    let mut builder = SuffixTreeBuilder::new(config.clone())?;
    for (i, text) in texts.iter().enumerate() {
        builder
            .append_text(text)
            .with_context(|| format!("Rejected text {}", i))?;
    }
    let tree = builder.finish()?;

    Ok((tree, config))
}

fn print_network_json(tree: &SuffixTree, network: &TransitionNetwork) -> Result<()> {
    let texts = (0..tree.text_count())
        .map(|i| tree.text(i).map(|chars| chars.iter().collect()))
        .collect::<suffixnet::Result<Vec<String>>>()?;
    let labels = (0..network.suffix_elements().len())
        .map(|i| network.label(i))
        .collect::<suffixnet::Result<Vec<String>>>()?;

    let document = NetworkDocument {
        texts,
        labels,
        network,
    };
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
