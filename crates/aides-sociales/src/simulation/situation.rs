use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::{EntityKind, EntityRef};
use crate::period::Month;
use crate::value::Value;

/// Supplied values of one entity instance, by variable then month.
pub type InputValues = BTreeMap<String, BTreeMap<Month, Value>>;

/// A family or household and the individuals it groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub membres: Vec<String>,
    #[serde(flatten)]
    pub inputs: InputValues,
}

/// Test case handed to the stub engine.
///
/// The JSON form mirrors the engine's test cases:
///
/// ```json
/// {
///   "individus": { "lea": { "age": { "2021-03": 19 } } },
///   "familles": { "f": { "membres": ["lea"], "aeeh": { "2021-03": 0 } } },
///   "menages": { "m": { "membres": ["lea"] } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Situation {
    #[serde(default)]
    pub individus: BTreeMap<String, InputValues>,
    #[serde(default)]
    pub familles: BTreeMap<String, Group>,
    #[serde(default)]
    pub menages: BTreeMap<String, Group>,
}

impl Situation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(raw: &str) -> Result<Self, SituationError> {
        serde_json::from_str(raw).map_err(|err| SituationError::Json(err.to_string()))
    }

    pub fn with_individu(mut self, id: &str) -> Self {
        self.individus.entry(id.to_string()).or_default();
        self
    }

    pub fn with_famille(mut self, id: &str, membres: &[&str]) -> Self {
        self.groups_mut(EntityKind::Famille)
            .entry(id.to_string())
            .or_default()
            .membres
            .extend(membres.iter().map(|membre| membre.to_string()));
        self
    }

    pub fn with_menage(mut self, id: &str, membres: &[&str]) -> Self {
        self.groups_mut(EntityKind::Menage)
            .entry(id.to_string())
            .or_default()
            .membres
            .extend(membres.iter().map(|membre| membre.to_string()));
        self
    }

    /// Record a supplied value, creating the entity instance if needed.
    pub fn set(
        &mut self,
        entity: &EntityRef,
        variable: &str,
        period: Month,
        value: impl Into<Value>,
    ) -> &mut Self {
        let inputs = match entity.kind {
            EntityKind::Individu => self.individus.entry(entity.id.clone()).or_default(),
            kind => {
                &mut self
                    .groups_mut(kind)
                    .entry(entity.id.clone())
                    .or_default()
                    .inputs
            }
        };
        inputs
            .entry(variable.to_string())
            .or_default()
            .insert(period, value.into());
        self
    }

    pub(crate) fn groups(&self, kind: EntityKind) -> &BTreeMap<String, Group> {
        match kind {
            EntityKind::Menage => &self.menages,
            _ => &self.familles,
        }
    }

    fn groups_mut(&mut self, kind: EntityKind) -> &mut BTreeMap<String, Group> {
        match kind {
            EntityKind::Menage => &mut self.menages,
            _ => &mut self.familles,
        }
    }
}

/// A situation the stub engine refuses to load.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SituationError {
    #[error("invalid situation JSON: {0}")]
    Json(String),
    #[error("{group} lists unknown individual '{membre}'")]
    UnknownMember { group: EntityRef, membre: String },
    #[error("{group} uses an id reserved for implicit groups")]
    ReservedGroupId { group: EntityRef },
    #[error("individual '{individu}' belongs to more than one {kind}")]
    MultipleGroups { individu: String, kind: EntityKind },
    #[error("{entity} supplies unknown variable '{variable}'")]
    UnknownVariable { entity: EntityRef, variable: String },
    #[error("variable '{variable}' belongs to {declared}, supplied on {entity}")]
    EntityMismatch {
        entity: EntityRef,
        variable: String,
        declared: EntityKind,
    },
    #[error("value supplied for '{variable}' on {entity} at {period} is not a valid {expected}")]
    InvalidValue {
        entity: EntityRef,
        variable: String,
        period: Month,
        expected: &'static str,
    },
}
