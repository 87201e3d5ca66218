//! Offline evaluation of a classifier against a labelled dataset.
//!
//! The dataset is a CSV with a header row naming all 21 feature columns plus
//! `HeartDiseaseorAttack`. Column order in the file does not matter; values are looked up by
//! name and assembled in trained order. Plotting and report files are left to external tools;
//! this only computes the headline numbers and the per-class report.

use crate::classifier::{Classifier, RiskLabel};
use crate::constants::{FEATURE_COLUMNS, FEATURE_COUNT, TARGET_COLUMN};
use crate::profile::FeatureVector;
use crate::{CardioError, CardioResult};
use std::fmt;
use std::io;
use std::path::Path;

/// Binary confusion matrix with the positive class meaning high risk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_negative: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_positive: usize,
}

impl ConfusionMatrix {
    pub fn record(&mut self, actual: RiskLabel, predicted: RiskLabel) {
        match (actual, predicted) {
            (RiskLabel::Low, RiskLabel::Low) => self.true_negative += 1,
            (RiskLabel::Low, RiskLabel::High) => self.false_positive += 1,
            (RiskLabel::High, RiskLabel::Low) => self.false_negative += 1,
            (RiskLabel::High, RiskLabel::High) => self.true_positive += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_negative + self.false_positive + self.false_negative + self.true_positive
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    /// Precision of the high-risk class.
    pub fn precision(&self) -> f64 {
        self.class_precision(RiskLabel::High)
    }

    /// Recall of the high-risk class.
    pub fn recall(&self) -> f64 {
        self.class_recall(RiskLabel::High)
    }

    /// F1 of the high-risk class.
    pub fn f1(&self) -> f64 {
        self.class_f1(RiskLabel::High)
    }

    /// Rows whose actual label is `label`.
    pub fn support(&self, label: RiskLabel) -> usize {
        match label {
            RiskLabel::Low => self.true_negative + self.false_positive,
            RiskLabel::High => self.false_negative + self.true_positive,
        }
    }

    fn predicted(&self, label: RiskLabel) -> usize {
        match label {
            RiskLabel::Low => self.true_negative + self.false_negative,
            RiskLabel::High => self.false_positive + self.true_positive,
        }
    }

    fn correct(&self, label: RiskLabel) -> usize {
        match label {
            RiskLabel::Low => self.true_negative,
            RiskLabel::High => self.true_positive,
        }
    }

    pub fn class_precision(&self, label: RiskLabel) -> f64 {
        ratio(self.correct(label), self.predicted(label))
    }

    pub fn class_recall(&self, label: RiskLabel) -> f64 {
        ratio(self.correct(label), self.support(label))
    }

    pub fn class_f1(&self, label: RiskLabel) -> f64 {
        let (p, r) = (self.class_precision(label), self.class_recall(label));
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

// Undefined ratios report 0, matching the usual zero-division convention.
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion matrix (rows = actual, columns = predicted):")?;
        writeln!(f, "            low     high")?;
        writeln!(
            f,
            "  low  {:>8} {:>8}",
            self.true_negative, self.false_positive
        )?;
        write!(
            f,
            "  high {:>8} {:>8}",
            self.false_negative, self.true_positive
        )
    }
}

/// Area under the ROC curve from `(score, actual)` pairs.
///
/// Uses the rank-sum form; tied scores share their mean rank. `None` when either class is
/// absent.
pub fn roc_auc(scores: &[(f64, RiskLabel)]) -> Option<f64> {
    let positives = scores
        .iter()
        .filter(|(_, actual)| *actual == RiskLabel::High)
        .count();
    let negatives = scores.len() - positives;
    if positives == 0 || negatives == 0 {
        return None;
    }

    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut positive_rank_sum = 0.0;
    let mut start = 0;
    while start < sorted.len() {
        let mut end = start + 1;
        while end < sorted.len() && sorted[end].0 == sorted[start].0 {
            end += 1;
        }
        // 1-based ranks start + 1 ..= end.
        let mean_rank = (start + 1 + end) as f64 / 2.0;
        let tied_positives = sorted[start..end]
            .iter()
            .filter(|(_, actual)| *actual == RiskLabel::High)
            .count();
        positive_rank_sum += mean_rank * tied_positives as f64;
        start = end;
    }

    let (p, n) = (positives as f64, negatives as f64);
    Some((positive_rank_sum - p * (p + 1.0) / 2.0) / (p * n))
}

/// Everything `evaluate` measures on one dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvaluationReport {
    pub matrix: ConfusionMatrix,
    /// Present only when the classifier scores every row and both classes occur.
    pub roc_auc: Option<f64>,
}

fn class_name(label: RiskLabel) -> &'static str {
    match label {
        RiskLabel::Low => "No Heart Disease",
        RiskLabel::High => "Heart Disease",
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.matrix;
        writeln!(f, "Rows evaluated: {}", m.total())?;
        writeln!(f, "Accuracy:  {:.4}", m.accuracy())?;
        writeln!(f, "Precision: {:.4}", m.precision())?;
        writeln!(f, "Recall:    {:.4}", m.recall())?;
        writeln!(f, "F1 score:  {:.4}", m.f1())?;
        match self.roc_auc {
            Some(auc) => writeln!(f, "ROC-AUC:   {auc:.4}")?,
            None => writeln!(f, "ROC-AUC:   n/a")?,
        }
        writeln!(f, "{m}")?;
        writeln!(f, "Classification report:")?;
        writeln!(
            f,
            "  {:<22} {:>9} {:>9} {:>9} {:>9}",
            "class", "precision", "recall", "f1-score", "support"
        )?;
        for label in [RiskLabel::Low, RiskLabel::High] {
            writeln!(
                f,
                "  {:<22} {:>9.4} {:>9.4} {:>9.4} {:>9}",
                format!("{} {}", label.class(), class_name(label)),
                m.class_precision(label),
                m.class_recall(label),
                m.class_f1(label),
                m.support(label)
            )?;
        }
        Ok(())
    }
}

/// Evaluate `classifier` on every row of a CSV file.
pub fn evaluate_path(classifier: &dyn Classifier, path: &Path) -> CardioResult<EvaluationReport> {
    let reader = csv::Reader::from_path(path)?;
    evaluate(classifier, reader)
}

/// Evaluate `classifier` on every row read from `reader`.
///
/// # Errors
/// Fails on a missing column, a non-numeric cell, or the first inference error.
pub fn evaluate<R: io::Read>(
    classifier: &dyn Classifier,
    mut reader: csv::Reader<R>,
) -> CardioResult<EvaluationReport> {
    let headers = reader.headers()?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| CardioError::MissingColumn(name.to_string()))
    };

    let mut feature_positions = [0usize; FEATURE_COUNT];
    for (slot, column) in feature_positions.iter_mut().zip(FEATURE_COLUMNS) {
        *slot = position(column)?;
    }
    let target_position = position(TARGET_COLUMN)?;

    let mut matrix = ConfusionMatrix::default();
    let mut scores = Vec::new();
    let mut every_row_scored = true;
    for record in reader.records() {
        let record = record?;
        let cell = |index: usize, column: &str| -> CardioResult<f64> {
            let raw = record.get(index).unwrap_or_default();
            raw.trim().parse::<f64>().map_err(|_| CardioError::InvalidInput {
                field: column.to_string(),
                value: raw.to_string(),
            })
        };

        let mut values = [0.0; FEATURE_COUNT];
        for ((value, index), column) in values
            .iter_mut()
            .zip(feature_positions)
            .zip(FEATURE_COLUMNS)
        {
            *value = cell(index, column)?;
        }

        let actual = if cell(target_position, TARGET_COLUMN)? != 0.0 {
            RiskLabel::High
        } else {
            RiskLabel::Low
        };
        let features = FeatureVector::new(values);
        matrix.record(actual, classifier.predict(&features)?);
        match classifier.score(&features)? {
            Some(score) => scores.push((score, actual)),
            None => every_row_scored = false,
        }
    }

    let roc_auc = if every_row_scored {
        roc_auc(&scores)
    } else {
        None
    };

    tracing::info!("Evaluated {} rows", matrix.total());
    Ok(EvaluationReport { matrix, roc_auc })
}
