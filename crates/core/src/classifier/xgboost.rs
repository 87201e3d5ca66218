//! XGBoost native model JSON, as written by `Booster.save_model("model.json")`.
//!
//! Only the parts inference needs are read: the base score, the objective and the per-tree
//! parallel arrays. A node whose `left_children` entry is `-1` is a leaf and stores its value
//! in `split_conditions`.

use crate::classifier::artifact::{Booster, Node, Tree};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct XgbDocument {
    learner: Learner,
}

#[derive(Debug, Deserialize)]
struct Learner {
    learner_model_param: LearnerModelParam,
    gradient_booster: GradientBooster,
    #[serde(default)]
    objective: Option<Objective>,
}

#[derive(Debug, Deserialize)]
struct LearnerModelParam {
    /// Stored as text, e.g. `"5E-1"`, or `"[5E-1]"` in newer releases.
    base_score: String,
}

#[derive(Debug, Deserialize)]
struct Objective {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GradientBooster {
    name: String,
    model: GbTreeModel,
}

#[derive(Debug, Deserialize)]
struct GbTreeModel {
    trees: Vec<XgbTree>,
}

#[derive(Debug, Deserialize)]
struct XgbTree {
    left_children: Vec<i64>,
    right_children: Vec<i64>,
    split_indices: Vec<i64>,
    split_conditions: Vec<f64>,
    default_left: Vec<Flag>,
}

/// `default_left` is a list of booleans in older releases and of 0/1 integers in newer ones.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(u8),
}

impl Flag {
    fn is_set(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        }
    }
}

impl TryFrom<XgbDocument> for Booster {
    type Error = String;

    fn try_from(doc: XgbDocument) -> Result<Self, Self::Error> {
        let learner = doc.learner;

        if let Some(objective) = &learner.objective {
            if objective.name != "binary:logistic" {
                return Err(format!(
                    "unsupported objective {}, expected binary:logistic",
                    objective.name
                ));
            }
        }
        if learner.gradient_booster.name != "gbtree" {
            return Err(format!(
                "unsupported booster {}, expected gbtree",
                learner.gradient_booster.name
            ));
        }

        let raw = learner.learner_model_param.base_score;
        let base_score = raw
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<f64>()
            .map_err(|_| format!("unreadable base_score {raw:?}"))?;

        let trees = learner
            .gradient_booster
            .model
            .trees
            .into_iter()
            .enumerate()
            .map(|(t, tree)| tree.into_tree().map_err(|msg| format!("tree {t}: {msg}")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Booster { base_score, trees })
    }
}

impl XgbTree {
    fn into_tree(self) -> Result<Tree, String> {
        let n = self.left_children.len();
        if [
            self.right_children.len(),
            self.split_indices.len(),
            self.split_conditions.len(),
            self.default_left.len(),
        ]
        .iter()
        .any(|len| *len != n)
        {
            return Err("node arrays have different lengths".into());
        }

        let index = |value: i64, what: &str, node: usize| {
            usize::try_from(value).map_err(|_| format!("node {node} has {what} {value}"))
        };

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            if self.left_children[i] == -1 {
                nodes.push(Node::Leaf {
                    leaf: self.split_conditions[i],
                });
            } else {
                nodes.push(Node::Split {
                    feature: index(self.split_indices[i], "feature", i)?,
                    threshold: self.split_conditions[i],
                    left: index(self.left_children[i], "left child", i)?,
                    right: index(self.right_children[i], "right child", i)?,
                    default_left: self.default_left[i].is_set(),
                });
            }
        }
        Ok(Tree { nodes })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Native dump of the same two stumps as the compact test artifact.
    pub(crate) fn native_booster_json() -> serde_json::Value {
        serde_json::json!({
            "learner": {
                "attributes": {},
                "feature_names": [],
                "gradient_booster": {
                    "name": "gbtree",
                    "model": {
                        "gbtree_model_param": { "num_trees": "2" },
                        "tree_info": [0, 0],
                        "trees": [
                            {
                                "id": 0,
                                "left_children": [1, -1, -1],
                                "right_children": [2, -1, -1],
                                "split_indices": [1, 0, 0],
                                "split_conditions": [0.5, -1.0, 1.5],
                                "default_left": [1, 0, 0],
                                "base_weights": [0.0, -1.0, 1.5]
                            },
                            {
                                "id": 1,
                                "left_children": [1, -1, -1],
                                "right_children": [2, -1, -1],
                                "split_indices": [0, 0, 0],
                                "split_conditions": [1.0, -0.5, 1.0],
                                "default_left": [false, false, false],
                                "base_weights": [0.0, -0.5, 1.0]
                            }
                        ]
                    }
                },
                "learner_model_param": { "base_score": "[5E-1]", "num_class": "0", "num_feature": "21" },
                "objective": { "name": "binary:logistic", "reg_loss_param": { "scale_pos_weight": "1" } }
            },
            "version": [2, 1, 0]
        })
    }

    fn parse(value: serde_json::Value) -> Result<Booster, String> {
        let doc: XgbDocument = serde_json::from_value(value).map_err(|e| e.to_string())?;
        Booster::try_from(doc)
    }

    #[test]
    fn converts_parallel_arrays_to_nodes() {
        let booster = parse(native_booster_json()).expect("native dump");
        assert_eq!(booster.base_score, 0.5);
        assert_eq!(booster.trees.len(), 2);
        assert_eq!(
            booster.trees[0].nodes,
            vec![
                Node::Split {
                    feature: 1,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                    default_left: true,
                },
                Node::Leaf { leaf: -1.0 },
                Node::Leaf { leaf: 1.5 },
            ]
        );
        match booster.trees[1].nodes[0] {
            Node::Split { default_left, .. } => assert!(!default_left),
            ref other => panic!("expected split, got {other:?}"),
        }
    }

    #[test]
    fn rejects_other_objectives_and_ragged_trees() {
        let mut value = native_booster_json();
        value["learner"]["objective"]["name"] = "reg:squarederror".into();
        let err = parse(value).expect_err("objective");
        assert!(err.contains("reg:squarederror"));

        let mut value = native_booster_json();
        value["learner"]["gradient_booster"]["model"]["trees"][1]["split_indices"] =
            serde_json::json!([0, 0]);
        let err = parse(value).expect_err("ragged");
        assert!(err.starts_with("tree 1"));
    }

    #[test]
    fn plain_base_score_is_accepted() {
        let mut value = native_booster_json();
        value["learner"]["learner_model_param"]["base_score"] = "2.5E-1".into();
        assert_eq!(parse(value).expect("base score").base_score, 0.25);
    }
}
