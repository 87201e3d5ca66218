use anyhow::Context;
use clap::{Parser, Subcommand};
use cardio_core::classifier::Classifier;
use cardio_core::evaluation::evaluate_path;
use cardio_core::metrics::{health_metrics, HealthMetricsInput};
use cardio_core::{HealthProfile, ModelArtifact};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cardio")]
#[command(about = "CardioCheck heart-risk model tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a model artifact and describe it
    Inspect {
        /// Path to the JSON model artifact
        model: PathBuf,
    },
    /// Predict heart-disease risk for one profile
    Predict {
        /// Path to the JSON model artifact
        model: PathBuf,
        /// Form field as key=value (repeatable), e.g. --field age=55
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Compute heart-rate zone, BMI, cholesterol and fitness metrics
    Metrics {
        #[arg(long, default_value_t = 30)]
        age: i64,
        #[arg(long, default_value_t = 5)]
        height_feet: i64,
        #[arg(long, default_value_t = 8)]
        height_inches: i64,
        /// Weight in pounds
        #[arg(long, default_value_t = 150)]
        weight: i64,
        /// Flag high cholesterol
        #[arg(long)]
        highchol: bool,
        /// Flag no physical activity
        #[arg(long)]
        inactive: bool,
        /// Current heart rate (defaults to the age-predicted maximum)
        #[arg(long)]
        current_hr: Option<f64>,
    },
    /// Evaluate a model against a labelled CSV dataset
    Evaluate {
        /// Path to the JSON model artifact
        model: PathBuf,
        /// CSV with the 21 feature columns and HeartDiseaseorAttack
        dataset: PathBuf,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    Ok((key.trim().to_lowercase(), value.to_string()))
}

fn load_model(path: &Path) -> anyhow::Result<ModelArtifact> {
    ModelArtifact::load(path).with_context(|| format!("loading model {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Inspect { model }) => {
            let artifact = load_model(&model)?;
            println!("Model: {}", artifact.name());
            println!("Format version: {}", artifact.format_version);
            println!("Features: {}", artifact.feature_names.join(", "));
            let scaled: Vec<&str> = artifact
                .preprocessor
                .scaled
                .iter()
                .map(|c| c.column.as_str())
                .collect();
            println!("Scaled columns: {}", scaled.join(", "));
            println!("Trees: {}", artifact.booster.trees.len());
            println!("Base score: {}", artifact.booster.base_score);
            println!("Decision threshold: {}", artifact.threshold);
        }
        Some(Commands::Predict { model, fields }) => {
            let artifact = load_model(&model)?;
            let form: HashMap<String, String> = fields.into_iter().collect();
            let features = HealthProfile::from_form(&form)?.feature_vector();
            let probability = artifact.probability(&features)?;
            let label = artifact.predict(&features)?;
            println!("{} (p = {:.3})", label.message(), probability);
        }
        Some(Commands::Metrics {
            age,
            height_feet,
            height_inches,
            weight,
            highchol,
            inactive,
            current_hr,
        }) => {
            let input = HealthMetricsInput {
                age,
                height_feet,
                height_inches,
                weight_pounds: weight,
                high_cholesterol: highchol,
                physically_active: !inactive,
                current_hr,
            };
            let metrics = health_metrics(&input)?;
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
        Some(Commands::Evaluate { model, dataset }) => {
            let artifact = load_model(&model)?;
            let report = evaluate_path(&artifact, &dataset)
                .with_context(|| format!("evaluating on {}", dataset.display()))?;
            println!("{report}");
        }
        None => {
            println!("Use 'cardio --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fields() {
        assert_eq!(
            parse_field("Age=55").unwrap(),
            ("age".to_string(), "55".to_string())
        );
        assert!(parse_field("age").is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
