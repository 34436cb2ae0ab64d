use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use std::io;
use tracing_subscriber::EnvFilter;
use wildtree::output::{print_reports, print_stats, QueryReport};
use wildtree::{IndexConfig, Pattern, WildcardIndex};

#[derive(Parser)]
#[command(name = "wildtree")]
#[command(about = "Suffix tree search with single-symbol wildcards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overrides WILDTREE_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct IndexArgs {
    /// Text to index
    #[arg(short, long)]
    text: String,

    /// Maximum number of wildcards per pattern
    #[arg(short = 'k', long = "wildcards")]
    wildcards: Option<u32>,

    /// Character that stands for a wildcard in patterns
    #[arg(long)]
    wildcard_char: Option<char>,

    /// JSON configuration document; flags override its fields
    #[arg(long)]
    config: Option<String>,
}

impl IndexArgs {
    fn to_config(&self) -> Result<IndexConfig> {
        let mut config = match &self.config {
            Some(json) => IndexConfig::from_json(json).context("Failed to parse --config")?,
            None => IndexConfig::default(),
        };
        if let Some(k) = self.wildcards {
            config.wildcard_budget = k;
        }
        if let Some(c) = self.wildcard_char {
            config.wildcard_char = c;
        }
        config.validate()?;
        Ok(config)
    }

    fn build(&self, config: &IndexConfig) -> Result<WildcardIndex> {
        WildcardIndex::from_text(&self.text, config.clone()).context("Failed to build index")
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search the text for one or more patterns
    Search {
        #[command(flatten)]
        index: IndexArgs,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Patterns to look up
        #[arg(required = true)]
        patterns: Vec<String>,
    },
    /// Show index statistics
    Stats {
        #[command(flatten)]
        index: IndexArgs,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the suffix tree of the text
    Tree {
        /// Text to index
        #[arg(short, long)]
        text: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Search {
            index,
            json,
            patterns,
        } => {
            let config = index.to_config()?;
            let wildcard_char = config.wildcard_char;
            let index = index.build(&config)?;

            // Patterns are independent; results keep input order
            let reports: Vec<QueryReport> = patterns
                .par_iter()
                .map(|raw| {
                    let pattern = Pattern::parse(raw, wildcard_char);
                    let offsets = index
                        .query(&pattern)
                        .with_context(|| format!("Query failed: {}", raw))?;
                    Ok(QueryReport {
                        pattern: raw.clone(),
                        offsets,
                    })
                })
                .collect::<Result<_>>()?;

            print_reports(&mut io::stdout().lock(), &reports, json)?;
        }
        Commands::Stats { index, json } => {
            let config = index.to_config()?;
            let index = index.build(&config)?;
            print_stats(&mut io::stdout().lock(), &index.stats(), json)?;
        }
        Commands::Tree { text } => {
            let index = WildcardIndex::from_text(&text, IndexConfig::with_budget(0))
                .context("Failed to build suffix tree")?;
            let tree = index.tree();
            print!("{}", tree.render(tree.root()));
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("wildtree=debug")
    } else {
        EnvFilter::try_from_env("WILDTREE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(config: Option<&str>) -> IndexArgs {
        IndexArgs {
            text: "BANANA".to_string(),
            wildcards: Some(2),
            wildcard_char: None,
            config: config.map(str::to_string),
        }
    }

    #[test]
    fn test_flags_override_config_document() {
        let config = args(Some(r#"{"wildcard_budget": 5, "wildcard_char": "?"}"#))
            .to_config()
            .unwrap();
        assert_eq!(config.wildcard_budget, 2);
        assert_eq!(config.wildcard_char, '?');
    }

    #[test]
    fn test_build_uses_resolved_config() {
        // The document is only read by to_config
        let index = args(Some("{not json")).build(&IndexConfig::with_budget(2)).unwrap();
        assert_eq!(index.config().wildcard_budget, 2);
        assert!(args(Some("{not json")).to_config().is_err());
    }
}
