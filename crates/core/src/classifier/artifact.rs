//! Serialized classifier artifact: feature preprocessing plus a gradient-boosted tree ensemble.
//!
//! The artifact is produced offline from the trained pipeline: the scaler's `mean_` and
//! `scale_` go into `preprocessor`, and `booster` holds either the compact tree layout or the
//! document XGBoost writes with `save_model`. It is self-describing: the feature schema it was trained on travels with it and is checked
//! against `FEATURE_COLUMNS` at load time, so a model trained on a different column order is
//! rejected before it can serve a prediction.
//!
//! Inference follows the usual boosted-tree recipe:
//! 1. Preprocess: standard-scale the configured columns and move them to the front, with the
//!    untouched columns following in schema order.
//! 2. Walk each tree to a leaf and sum the leaf values onto the base margin.
//! 3. Apply the logistic function and compare against the decision threshold.

use crate::classifier::xgboost::XgbDocument;
use crate::classifier::{Classifier, RiskLabel};
use crate::constants::{
    ARTIFACT_FORMAT_VERSION, DEFAULT_DECISION_THRESHOLD, FEATURE_COLUMNS, FEATURE_COUNT,
};
use crate::profile::{column_index, FeatureVector};
use crate::{CardioError, CardioResult};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The top-level, self-contained, trained model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    #[serde(default)]
    pub model_name: Option<String>,
    /// Training column order. Must match `FEATURE_COLUMNS` exactly.
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub preprocessor: Preprocessor,
    pub booster: Booster,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

/// Column transformer applied before the trees see a row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preprocessor {
    #[serde(default)]
    pub scaled: Vec<ScaledColumn>,
}

/// Standard-scaler parameters for one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaledColumn {
    pub column: String,
    pub mean: f64,
    pub scale: f64,
}

/// Tree ensemble. Reads either the compact layout below or an embedded XGBoost
/// `save_model` JSON document; always writes the compact layout.
#[derive(Debug, Clone, Serialize)]
pub struct Booster {
    /// Prior probability; its logit is the starting margin.
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

#[derive(Debug, Deserialize)]
struct CompactBooster {
    #[serde(default = "default_base_score")]
    base_score: f64,
    trees: Vec<Tree>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoosterDocument {
    Compact(CompactBooster),
    Native(XgbDocument),
}

impl<'de> Deserialize<'de> for Booster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match BoosterDocument::deserialize(deserializer)? {
            BoosterDocument::Compact(CompactBooster { base_score, trees }) => {
                Ok(Booster { base_score, trees })
            }
            BoosterDocument::Native(doc) => Booster::try_from(doc).map_err(D::Error::custom),
        }
    }
}

/// One regression tree. Node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Rows with `x < threshold` go left; missing (NaN) values follow `default_left`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        #[serde(default = "default_left")]
        default_left: bool,
    },
    Leaf {
        leaf: f64,
    },
}

fn default_threshold() -> f64 {
    DEFAULT_DECISION_THRESHOLD
}

fn default_base_score() -> f64 {
    0.5
}

fn default_left() -> bool {
    true
}

impl ModelArtifact {
    /// Loads and validates an artifact from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, if the format version is
    /// unsupported, if the feature schema differs from the one this build assembles, or if
    /// the tree structure is malformed.
    pub fn load(path: &Path) -> CardioResult<Self> {
        let json = fs::read_to_string(path).map_err(CardioError::ArtifactRead)?;
        Self::from_json_str(&json)
    }

    /// Parses and validates an artifact from a JSON string.
    pub fn from_json_str(json: &str) -> CardioResult<Self> {
        let artifact: ModelArtifact =
            serde_json::from_str(json).map_err(CardioError::ArtifactParse)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Saves the artifact as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> CardioResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(CardioError::ArtifactParse)?;
        let file = fs::File::create(path).map_err(CardioError::ArtifactRead)?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(json.as_bytes())
            .map_err(CardioError::ArtifactRead)?;
        writer.flush().map_err(CardioError::ArtifactRead)
    }

    pub fn validate(&self) -> CardioResult<()> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(CardioError::UnsupportedArtifactVersion(self.format_version));
        }

        if self.feature_names.iter().map(String::as_str).ne(FEATURE_COLUMNS) {
            return Err(CardioError::SchemaMismatch {
                expected: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
                found: self.feature_names.clone(),
            });
        }

        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(CardioError::InvalidArtifact(format!(
                "decision threshold must be in (0, 1), got {}",
                self.threshold
            )));
        }

        let base = self.booster.base_score;
        if !(base > 0.0 && base < 1.0) {
            return Err(CardioError::InvalidArtifact(format!(
                "base_score must be in (0, 1), got {base}"
            )));
        }

        let mut seen = [false; FEATURE_COUNT];
        for col in &self.preprocessor.scaled {
            let index = column_index(&col.column).ok_or_else(|| {
                CardioError::InvalidArtifact(format!("unknown scaled column {}", col.column))
            })?;
            if seen[index] {
                return Err(CardioError::InvalidArtifact(format!(
                    "column {} is scaled twice",
                    col.column
                )));
            }
            seen[index] = true;
            if !col.mean.is_finite() || !col.scale.is_finite() {
                return Err(CardioError::InvalidArtifact(format!(
                    "non-finite scaler parameters for {}",
                    col.column
                )));
            }
        }

        if self.booster.trees.is_empty() {
            return Err(CardioError::InvalidArtifact("booster has no trees".into()));
        }
        for (t, tree) in self.booster.trees.iter().enumerate() {
            tree.validate()
                .map_err(|msg| CardioError::InvalidArtifact(format!("tree {t}: {msg}")))?;
        }

        Ok(())
    }

    /// Display name for logs and the CLI.
    pub fn name(&self) -> &str {
        self.model_name.as_deref().unwrap_or("unnamed model")
    }

    /// Probability of the positive (high-risk) class for one row.
    pub fn probability(&self, features: &FeatureVector) -> CardioResult<f64> {
        let row = self.preprocessor.transform(features)?;
        let mut margin = logit(self.booster.base_score);
        for tree in &self.booster.trees {
            margin += tree.leaf_value(&row)?;
        }
        if margin.is_nan() {
            return Err(CardioError::Inference("margin is not a number".into()));
        }
        Ok(sigmoid(margin))
    }
}

impl Classifier for ModelArtifact {
    fn predict(&self, features: &FeatureVector) -> CardioResult<RiskLabel> {
        let p = self.probability(features)?;
        Ok(if p >= self.threshold {
            RiskLabel::High
        } else {
            RiskLabel::Low
        })
    }

    fn score(&self, features: &FeatureVector) -> CardioResult<Option<f64>> {
        self.probability(features).map(Some)
    }
}

impl Preprocessor {
    /// Scaled columns first, in configured order, then the rest in schema order.
    pub fn transform(&self, features: &FeatureVector) -> CardioResult<Vec<f64>> {
        let values = features.as_slice();
        let mut out = Vec::with_capacity(FEATURE_COUNT);
        let mut scaled = [false; FEATURE_COUNT];

        for col in &self.scaled {
            let index = column_index(&col.column).ok_or_else(|| {
                CardioError::Inference(format!("unknown scaled column {}", col.column))
            })?;
            scaled[index] = true;
            let scale = if col.scale == 0.0 { 1.0 } else { col.scale };
            out.push((values[index] - col.mean) / scale);
        }

        out.extend(
            values
                .iter()
                .zip(scaled)
                .filter(|(_, is_scaled)| !is_scaled)
                .map(|(v, _)| *v),
        );

        Ok(out)
    }
}

impl Tree {
    fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".into());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(format!("node {i} splits on feature {feature}"));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {i} has a NaN threshold"));
                    }
                    for child in [left, right] {
                        if *child >= self.nodes.len() || *child == i {
                            return Err(format!("node {i} has invalid child {child}"));
                        }
                    }
                }
                Node::Leaf { leaf } => {
                    if !leaf.is_finite() {
                        return Err(format!("node {i} has a non-finite leaf"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf. A walk longer than the node count means a cycle.
    fn leaf_value(&self, row: &[f64]) -> CardioResult<f64> {
        let mut index = 0;
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(Node::Leaf { leaf }) => return Ok(*leaf),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                }) => {
                    let x = *row.get(*feature).ok_or_else(|| {
                        CardioError::Inference(format!("row has no feature {feature}"))
                    })?;
                    let go_left = if x.is_nan() { *default_left } else { x < *threshold };
                    index = if go_left { *left } else { *right };
                }
                None => {
                    return Err(CardioError::Inference(format!(
                        "tree references missing node {index}"
                    )))
                }
            }
        }
        Err(CardioError::Inference(
            "tree traversal did not reach a leaf".into(),
        ))
    }
}

fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin.clamp(-700.0, 700.0)).exp())
}
