//! Registry of the variables this crate declares, populated explicitly at
//! start-up.

pub mod eure_et_loir;
pub mod garantie_jeune;
mod inputs;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::entity::EntityKind;
use crate::period::Month;
use crate::value::{Value, ValueType};
use crate::variable::{DefinitionPeriod, Variable};

pub use crate::variable::CatalogError;

#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    variables: BTreeMap<&'static str, Variable>,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inputs plus every rule of the catalog.
    pub fn standard() -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for variable in inputs::input_variables() {
            catalog.register(variable)?;
        }
        for variable in garantie_jeune::variables()? {
            catalog.register(variable)?;
        }
        for variable in eure_et_loir::variables()? {
            catalog.register(variable)?;
        }

        info!(
            variables = catalog.len(),
            rules = catalog.rules().count(),
            "rule catalog registered"
        );
        Ok(catalog)
    }

    pub fn register(&mut self, variable: Variable) -> Result<(), CatalogError> {
        variable.validate()?;
        if self.variables.contains_key(variable.name) {
            return Err(CatalogError::DuplicateVariable(variable.name.to_string()));
        }
        debug!(
            variable = variable.name,
            entity = %variable.entity,
            formulas = variable.formulas.starts().len(),
            "variable registered"
        );
        self.variables.insert(variable.name, variable);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn rules(&self) -> impl Iterator<Item = &Variable> {
        self.variables().filter(|variable| !variable.is_input())
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Variable> {
        self.variables().filter(|variable| variable.is_input())
    }

    pub fn for_entity(&self, entity: EntityKind) -> impl Iterator<Item = &Variable> {
        self.variables()
            .filter(move |variable| variable.entity == entity)
    }

    pub fn summaries(&self) -> Vec<VariableSummary> {
        self.variables().map(VariableSummary::from).collect()
    }
}

/// Serializable description of a registered variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableSummary {
    pub name: &'static str,
    pub entity: EntityKind,
    pub value_type: ValueType,
    pub definition_period: DefinitionPeriod,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reference: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<&'static str>,
    pub default_value: Value,
    /// Start month of each formula; `null` for a formula without start.
    pub formulas: Vec<Option<Month>>,
}

impl From<&Variable> for VariableSummary {
    fn from(variable: &Variable) -> Self {
        Self {
            name: variable.name,
            entity: variable.entity,
            value_type: variable.value_type,
            definition_period: variable.definition_period,
            label: variable.label,
            reference: variable.reference.clone(),
            documentation: variable.documentation,
            default_value: variable.default_value.clone(),
            formulas: variable.formulas.starts(),
        }
    }
}
