use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::period::Month;

/// The legal parameter tree as it stands for one period.
///
/// Nodes are navigated by dotted path, e.g.
/// `prestations.minima_sociaux.rsa.montant_de_base_du_rsa`. Leaves are numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSnapshot {
    root: JsonValue,
}

impl ParameterSnapshot {
    pub fn new(tree: JsonValue) -> Self {
        Self { root: tree }
    }

    pub fn node(&self, path: &str) -> Result<ParameterNode<'_>, ParameterError> {
        ParameterNode {
            path: String::new(),
            value: &self.root,
        }
        .child(path)
    }

    pub fn amount(&self, path: &str) -> Result<f64, ParameterError> {
        self.node(path)?.as_amount()
    }
}

/// Borrowed view on a branch or leaf of a [`ParameterSnapshot`].
#[derive(Debug, Clone)]
pub struct ParameterNode<'a> {
    path: String,
    value: &'a JsonValue,
}

impl<'a> ParameterNode<'a> {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn child(&self, path: &str) -> Result<ParameterNode<'a>, ParameterError> {
        let mut current = self.value;
        let mut walked = self.path.clone();

        for segment in path.split('.').filter(|segment| !segment.is_empty()) {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);

            current = current
                .as_object()
                .and_then(|children| children.get(segment))
                .ok_or_else(|| ParameterError::NotFound {
                    path: walked.clone(),
                })?;
        }

        Ok(ParameterNode {
            path: walked,
            value: current,
        })
    }

    pub fn amount(&self, path: &str) -> Result<f64, ParameterError> {
        self.child(path)?.as_amount()
    }

    pub fn as_amount(&self) -> Result<f64, ParameterError> {
        self.value.as_f64().ok_or_else(|| ParameterError::NotALeaf {
            path: self.path.clone(),
        })
    }
}

/// Period-indexed snapshots, each effective from its month until the next one.
#[derive(Debug, Clone, Default)]
pub struct ParameterTimeline {
    snapshots: BTreeMap<Month, ParameterSnapshot>,
}

impl ParameterTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, effective_from: Month, snapshot: ParameterSnapshot) {
        self.snapshots.insert(effective_from, snapshot);
    }

    pub fn at(&self, period: Month) -> Option<&ParameterSnapshot> {
        self.snapshots
            .range(..=period)
            .next_back()
            .map(|(_, snapshot)| snapshot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    #[error("parameter '{path}' not found")]
    NotFound { path: String },
    #[error("parameter '{path}' is not a numeric leaf")]
    NotALeaf { path: String },
}

impl ParameterError {
    pub fn path(&self) -> &str {
        match self {
            ParameterError::NotFound { path } | ParameterError::NotALeaf { path } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> ParameterSnapshot {
        ParameterSnapshot::new(json!({
            "prestations": {
                "minima_sociaux": {
                    "rsa": {
                        "montant_de_base_du_rsa": 559.74,
                        "forfait_logement": { "taux_1_personne": 0.12 }
                    }
                }
            }
        }))
    }

    #[test]
    fn navigates_dotted_paths() {
        let params = snapshot();
        let rsa = params
            .node("prestations.minima_sociaux.rsa")
            .expect("rsa branch present");
        assert_eq!(rsa.path(), "prestations.minima_sociaux.rsa");
        assert_eq!(rsa.amount("montant_de_base_du_rsa"), Ok(559.74));
        assert_eq!(rsa.amount("forfait_logement.taux_1_personne"), Ok(0.12));
    }

    #[test]
    fn reports_the_first_missing_segment() {
        let params = snapshot();
        let error = params
            .amount("prestations.minima_sociaux.ass.montant")
            .expect_err("ass is absent");
        assert_eq!(
            error,
            ParameterError::NotFound {
                path: "prestations.minima_sociaux.ass".to_string()
            }
        );
    }

    #[test]
    fn branches_are_not_amounts() {
        let params = snapshot();
        assert!(matches!(
            params.amount("prestations.minima_sociaux"),
            Err(ParameterError::NotALeaf { .. })
        ));
    }

    #[test]
    fn timeline_picks_latest_snapshot_not_after_period() {
        let mut timeline = ParameterTimeline::new();
        let jan = Month::new(2020, 1).expect("valid");
        let apr = Month::new(2020, 4).expect("valid");
        timeline.insert(jan, ParameterSnapshot::new(json!({ "montant": 1.0 })));
        timeline.insert(apr, ParameterSnapshot::new(json!({ "montant": 2.0 })));

        let march = Month::new(2020, 3).expect("valid");
        let may = Month::new(2020, 5).expect("valid");
        let before = Month::new(2019, 12).expect("valid");

        assert_eq!(timeline.at(march).map(|s| s.amount("montant")), Some(Ok(1.0)));
        assert_eq!(timeline.at(may).map(|s| s.amount("montant")), Some(Ok(2.0)));
        assert!(timeline.at(before).is_none());
    }
}
