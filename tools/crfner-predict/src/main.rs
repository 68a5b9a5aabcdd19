//! CRF Named-Entity Tagging Tool
//!
//! Reads CoNLL-formatted sentences, tags them with a trained CRF model and
//! prints the predictions as CoNLL or JSON lines.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crfner_core::conll::{load_conll, read_conll, write_conll};
use crfner_core::{AnnotatedSample, CrfPredictor, EntityMapping, PredictorConfig};
use serde::Serialize;
use tracing::{Level, info};

/// Output format
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Conll,
    Json,
}

/// CLI arguments
#[derive(Parser)]
#[command(name = "crfner-predict")]
#[command(about = "Tag CoNLL sentences with a trained CRF model")]
#[command(version)]
struct Cli {
    /// Trained CRFsuite model file
    #[arg(short, long, env = "CRFNER_MODEL")]
    model: Option<PathBuf>,

    /// Predictor configuration file (JSON); flags override its values
    #[arg(short, long, env = "CRFNER_CONFIG")]
    config: Option<PathBuf>,

    /// CoNLL input file; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Entity rename table applied to input tags before prediction (JSON)
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Entity rename table applied to predicted tags (JSON)
    #[arg(long)]
    output_mapping: Option<PathBuf>,

    /// Only keep these entity types in the output
    #[arg(short, long, value_delimiter = ',')]
    entities: Option<Vec<String>>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Conll)]
    format: Format,

    /// Log every prediction
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct PredictOutput<'a> {
    tokens: &'a [String],
    gold: &'a [String],
    predicted: Vec<String>,
    aligned: bool,
}

fn load_mapping(path: &Path) -> Result<EntityMapping> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading mapping {}", path.display()))?;
    EntityMapping::from_json(&json).with_context(|| format!("parsing mapping {}", path.display()))
}

fn build_config(cli: &Cli) -> Result<PredictorConfig> {
    let mut config = match &cli.config {
        Some(path) => PredictorConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => PredictorConfig::new(),
    };

    if let Some(model) = &cli.model {
        config = config.with_model_path(model);
    }
    if let Some(entities) = &cli.entities {
        config = config.with_entities_to_keep(entities.iter().cloned());
    }
    if let Some(path) = &cli.output_mapping {
        config = config.with_entity_mapping(load_mapping(path)?);
    }
    if cli.verbose {
        config = config.with_verbose(true);
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;
    let predictor = CrfPredictor::new(config).context("loading CRF model")?;

    let mut samples = match &cli.input {
        Some(path) => load_conll(path).with_context(|| format!("reading {}", path.display()))?,
        None => read_conll(io::stdin().lock()).context("reading stdin")?,
    };
    if let Some(path) = &cli.mapping {
        let mapping = load_mapping(path)?;
        samples = samples
            .into_iter()
            .map(|s| s.with_mapping(mapping.clone()))
            .collect();
    }
    info!(samples = samples.len(), "tagging");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut mismatched = 0usize;

    for sample in &samples {
        let predicted = predictor.predict(sample)?;
        let aligned = predicted.len() == sample.tokens().len();
        if !aligned {
            mismatched += 1;
        }
        let predicted = predictor.keep_entities(&predicted);

        match cli.format {
            Format::Conll => {
                write_conll(&mut out, sample.tokens(), sample.pos_tags(), &predicted)?
            }
            Format::Json => {
                let output = PredictOutput {
                    tokens: sample.tokens(),
                    gold: sample.tags(),
                    predicted,
                    aligned,
                };
                serde_json::to_writer(&mut out, &output)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;

    info!(samples = samples.len(), mismatched, "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_mapping_flags() {
        let cli = Cli::try_parse_from([
            "crfner-predict",
            "--model",
            "ner.crfsuite",
            "--mapping",
            "in.json",
            "--output-mapping",
            "out.json",
            "--entities",
            "PER,LOC",
        ])
        .unwrap();

        assert_eq!(cli.mapping, Some(PathBuf::from("in.json")));
        assert_eq!(cli.output_mapping, Some(PathBuf::from("out.json")));
        assert_eq!(cli.entities, Some(vec!["PER".to_string(), "LOC".to_string()]));
        assert!(Cli::try_parse_from(["crfner-predict", "--input-mapping", "in.json"]).is_err());
    }
}
