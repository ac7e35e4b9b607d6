//! The contract rule bodies are written against.
//!
//! An engine hands a rule an [`EvaluationContext`] bound to one entity
//! instance. The rule asks it for other variables of the same instance, for
//! variables of the groups the instance belongs to, and for the parameter
//! tree of a period. Resolution, caching and formula selection stay on the
//! engine side.

use crate::entity::{EntityKind, EntityRef, Relation};
use crate::parameters::{ParameterError, ParameterSnapshot};
use crate::period::Month;
use crate::value::{Value, VariableEnum};

pub trait EvaluationContext {
    /// Entity instance the context is bound to.
    fn entity(&self) -> &EntityRef;

    /// Value of a same-entity variable.
    fn get(&self, variable: &str, period: Month) -> Result<Value, EvaluationError>;

    /// Value of a variable of the group `relation` points to.
    fn related(
        &self,
        relation: Relation,
        variable: &str,
        period: Month,
    ) -> Result<Value, EvaluationError>;

    fn parameters(&self, period: Month) -> Result<&ParameterSnapshot, EvaluationError>;
}

impl<'c> dyn EvaluationContext + 'c {
    pub fn boolean(&self, variable: &str, period: Month) -> Result<bool, EvaluationError> {
        let value = self.get(variable, period)?;
        expect_bool(variable, value)
    }

    pub fn amount(&self, variable: &str, period: Month) -> Result<f64, EvaluationError> {
        let value = self.get(variable, period)?;
        expect_amount(variable, value)
    }

    pub fn integer(&self, variable: &str, period: Month) -> Result<i64, EvaluationError> {
        let value = self.get(variable, period)?;
        value
            .as_i64()
            .ok_or_else(|| EvaluationError::type_mismatch(variable, "int", &value))
    }

    pub fn enumeration<E: VariableEnum>(
        &self,
        variable: &str,
        period: Month,
    ) -> Result<E, EvaluationError> {
        let value = self.get(variable, period)?;
        value
            .as_enum_key()
            .and_then(E::from_key)
            .ok_or_else(|| EvaluationError::type_mismatch(variable, "enum", &value))
    }

    pub fn famille(&self) -> Projection<'_, 'c> {
        Projection {
            context: self,
            relation: Relation::Famille,
        }
    }

    pub fn menage(&self) -> Projection<'_, 'c> {
        Projection {
            context: self,
            relation: Relation::Menage,
        }
    }
}

/// Reads variables of one of the groups an individual belongs to.
pub struct Projection<'a, 'c> {
    context: &'a (dyn EvaluationContext + 'c),
    relation: Relation,
}

impl Projection<'_, '_> {
    pub fn get(&self, variable: &str, period: Month) -> Result<Value, EvaluationError> {
        self.context.related(self.relation, variable, period)
    }

    pub fn boolean(&self, variable: &str, period: Month) -> Result<bool, EvaluationError> {
        let value = self.get(variable, period)?;
        expect_bool(variable, value)
    }

    pub fn amount(&self, variable: &str, period: Month) -> Result<f64, EvaluationError> {
        let value = self.get(variable, period)?;
        expect_amount(variable, value)
    }
}

fn expect_bool(variable: &str, value: Value) -> Result<bool, EvaluationError> {
    value
        .as_bool()
        .ok_or_else(|| EvaluationError::type_mismatch(variable, "bool", &value))
}

fn expect_amount(variable: &str, value: Value) -> Result<f64, EvaluationError> {
    value
        .as_f64()
        .ok_or_else(|| EvaluationError::type_mismatch(variable, "float", &value))
}

/// Failures an engine raises while resolving a rule's inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),
    #[error("no parameters available for {period}")]
    NoParameters { period: Month },
    #[error("{period}: {source}")]
    ParameterNotFound {
        period: Month,
        #[source]
        source: ParameterError,
    },
    #[error("variable '{variable}' is declared {expected} but resolved to {found}")]
    TypeMismatch {
        variable: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("variable '{variable}' belongs to {declared}, not {requested}")]
    EntityMismatch {
        variable: String,
        declared: EntityKind,
        requested: EntityKind,
    },
    #[error("unknown entity {0}")]
    UnknownEntity(EntityRef),
    #[error("{entity} is not a member of any {relation:?}")]
    NotAMember { entity: EntityRef, relation: Relation },
    #[error("circular definition: '{variable}' for {entity} at {period} depends on itself")]
    CircularDefinition {
        variable: String,
        entity: EntityRef,
        period: Month,
    },
    #[error("dependency depth exceeded {limit} while computing '{variable}'")]
    MaxDepthExceeded { variable: String, limit: usize },
}

impl EvaluationError {
    /// Adapter for `map_err` on parameter lookups.
    pub fn parameter(period: Month) -> impl Fn(ParameterError) -> Self {
        move |source| EvaluationError::ParameterNotFound { period, source }
    }

    pub(crate) fn type_mismatch(variable: &str, expected: &'static str, found: &Value) -> Self {
        EvaluationError::TypeMismatch {
            variable: variable.to_string(),
            expected,
            found: found.value_type_label(),
        }
    }
}
