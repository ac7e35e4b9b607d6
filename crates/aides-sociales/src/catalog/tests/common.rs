use std::collections::HashMap;

use serde_json::json;

use crate::context::{EvaluationContext, EvaluationError};
use crate::entity::{EntityKind, EntityRef, Relation};
use crate::parameters::ParameterSnapshot;
use crate::period::Month;
use crate::value::{TypesActivite, TypesScolarite, Value};

pub(super) fn period() -> Month {
    Month::new(2021, 3).expect("valid month")
}

pub(super) fn rsa_parameters() -> ParameterSnapshot {
    ParameterSnapshot::new(json!({
        "prestations": {
            "minima_sociaux": {
                "rsa": {
                    "montant_de_base_du_rsa": 564.78,
                    "forfait_logement": {
                        "taux_1_personne": 0.12,
                        "taux_2_personnes": 0.16
                    }
                }
            }
        }
    }))
}

/// Context answering from fixed maps, standing in for an engine.
pub(super) struct FakeIndividu {
    entity: EntityRef,
    values: HashMap<&'static str, Value>,
    famille: HashMap<&'static str, Value>,
    menage: HashMap<&'static str, Value>,
    parameters: Option<ParameterSnapshot>,
}

impl FakeIndividu {
    pub(super) fn new() -> Self {
        Self {
            entity: EntityRef::new(EntityKind::Individu, "demandeur"),
            values: HashMap::new(),
            famille: HashMap::new(),
            menage: HashMap::new(),
            parameters: None,
        }
    }

    pub(super) fn with(mut self, variable: &'static str, value: impl Into<Value>) -> Self {
        self.values.insert(variable, value.into());
        self
    }

    pub(super) fn with_famille(mut self, variable: &'static str, value: impl Into<Value>) -> Self {
        self.famille.insert(variable, value.into());
        self
    }

    pub(super) fn with_menage(mut self, variable: &'static str, value: impl Into<Value>) -> Self {
        self.menage.insert(variable, value.into());
        self
    }

    pub(super) fn with_parameters(mut self, parameters: ParameterSnapshot) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub(super) fn as_context(&self) -> &dyn EvaluationContext {
        self
    }
}

fn lookup(values: &HashMap<&'static str, Value>, variable: &str) -> Result<Value, EvaluationError> {
    values
        .get(variable)
        .cloned()
        .ok_or_else(|| EvaluationError::UnknownVariable(variable.to_string()))
}

impl EvaluationContext for FakeIndividu {
    fn entity(&self) -> &EntityRef {
        &self.entity
    }

    fn get(&self, variable: &str, _period: Month) -> Result<Value, EvaluationError> {
        lookup(&self.values, variable)
    }

    fn related(
        &self,
        relation: Relation,
        variable: &str,
        _period: Month,
    ) -> Result<Value, EvaluationError> {
        match relation {
            Relation::Famille => lookup(&self.famille, variable),
            Relation::Menage => lookup(&self.menage, variable),
        }
    }

    fn parameters(&self, period: Month) -> Result<&ParameterSnapshot, EvaluationError> {
        self.parameters
            .as_ref()
            .ok_or(EvaluationError::NoParameters { period })
    }
}

/// Young person with no job, schooling or training.
pub(super) fn neet() -> FakeIndividu {
    FakeIndividu::new()
        .with("salaire_net", 0.0)
        .with("scolarite", TypesScolarite::Inconnue)
        .with("activite", TypesActivite::Chomeur)
        .with("indemnites_stage", 0.0)
        .with("revenus_stage_formation_pro", 0.0)
}

/// Disabled EEE national living in Eure-et-Loir, receiving no excluded aid.
pub(super) fn pch_claimant() -> FakeIndividu {
    FakeIndividu::new()
        .with_menage("eure_et_loir_eligibilite_residence", true)
        .with("ressortissant_eee", true)
        .with("titre_sejour", false)
        .with("refugie", false)
        .with("apatride", false)
        .with("handicap", true)
        .with_famille("aeeh", 0.0)
        .with("apa_domicile", 0.0)
        .with("actp", false)
        .with_famille("place_hebergement", true)
}
