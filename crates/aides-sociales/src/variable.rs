use serde::Serialize;

use crate::context::{EvaluationContext, EvaluationError};
use crate::entity::EntityKind;
use crate::period::{Month, PeriodError};
use crate::value::{Value, ValueType};

pub type BooleanFormula = fn(&dyn EvaluationContext, Month) -> Result<bool, EvaluationError>;
pub type AmountFormula = fn(&dyn EvaluationContext, Month) -> Result<f64, EvaluationError>;

/// Time granularity a variable is defined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionPeriod {
    Month,
}

/// A rule body. The variant fixes the Rust type the body produces.
#[derive(Clone, Copy)]
pub enum FormulaBody {
    Boolean(BooleanFormula),
    Amount(AmountFormula),
}

impl FormulaBody {
    pub fn produces(self) -> ValueType {
        match self {
            FormulaBody::Boolean(_) => ValueType::Bool,
            FormulaBody::Amount(_) => ValueType::Float,
        }
    }

    pub fn evaluate(
        self,
        context: &dyn EvaluationContext,
        period: Month,
    ) -> Result<Value, EvaluationError> {
        match self {
            FormulaBody::Boolean(body) => body(context, period).map(Value::Bool),
            FormulaBody::Amount(body) => body(context, period).map(Value::Float),
        }
    }
}

impl std::fmt::Debug for FormulaBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormulaBody::Boolean(_) => f.write_str("FormulaBody::Boolean"),
            FormulaBody::Amount(_) => f.write_str("FormulaBody::Amount"),
        }
    }
}

/// One body of a rule, applicable from `start` onwards (`None`: always).
#[derive(Debug, Clone, Copy)]
pub struct Formula {
    pub start: Option<Month>,
    pub body: FormulaBody,
}

impl Formula {
    pub fn always(body: FormulaBody) -> Self {
        Self { start: None, body }
    }

    pub fn starting(start: Month, body: FormulaBody) -> Self {
        Self {
            start: Some(start),
            body,
        }
    }
}

/// Bodies of a rule sorted by effective date.
#[derive(Debug, Clone, Default)]
pub struct FormulaSet {
    formulas: Vec<Formula>,
}

impl FormulaSet {
    pub fn new(variable: &str, mut formulas: Vec<Formula>) -> Result<Self, CatalogError> {
        formulas.sort_by_key(|formula| formula.start);
        if let Some(pair) = formulas
            .windows(2)
            .find(|pair| pair[0].start == pair[1].start)
        {
            return Err(CatalogError::DuplicateFormula {
                variable: variable.to_string(),
                start: pair[0].start,
            });
        }
        Ok(Self { formulas })
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    pub fn starts(&self) -> Vec<Option<Month>> {
        self.formulas.iter().map(|formula| formula.start).collect()
    }

    /// Latest body whose start is not after `period`.
    pub fn select(&self, period: Month) -> Option<&Formula> {
        self.formulas
            .iter()
            .rev()
            .find(|formula| formula.start.map_or(true, |start| start <= period))
    }
}

/// Declaration of a variable: an input when it has no formulas, a rule otherwise.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: &'static str,
    pub entity: EntityKind,
    pub value_type: ValueType,
    pub definition_period: DefinitionPeriod,
    pub label: &'static str,
    pub reference: Vec<&'static str>,
    pub documentation: Option<&'static str>,
    pub default_value: Value,
    pub formulas: FormulaSet,
}

impl Variable {
    /// A formula-less variable whose values are supplied by the engine's data.
    pub fn input(
        name: &'static str,
        entity: EntityKind,
        value_type: ValueType,
        label: &'static str,
    ) -> Self {
        Self {
            name,
            entity,
            value_type,
            definition_period: DefinitionPeriod::Month,
            label,
            reference: Vec::new(),
            documentation: None,
            default_value: value_type.zero(),
            formulas: FormulaSet::default(),
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn is_input(&self) -> bool {
        self.formulas.is_empty()
    }

    pub(crate) fn validate(&self) -> Result<(), CatalogError> {
        if !self.value_type.admits(&self.default_value) {
            return Err(CatalogError::InvalidDefault {
                variable: self.name.to_string(),
            });
        }

        for formula in &self.formulas.formulas {
            if formula.body.produces() != self.value_type {
                return Err(CatalogError::FormulaType {
                    variable: self.name.to_string(),
                    declared: self.value_type,
                });
            }
        }

        Ok(())
    }
}

/// Registration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("variable '{0}' is registered twice")]
    DuplicateVariable(String),
    #[error("variable '{variable}' has two formulas starting {start:?}")]
    DuplicateFormula {
        variable: String,
        start: Option<Month>,
    },
    #[error("variable '{variable}' is declared {declared} but a formula produces another type")]
    FormulaType {
        variable: String,
        declared: ValueType,
    },
    #[error("default value of '{variable}' does not match its declared type")]
    InvalidDefault { variable: String },
    #[error(transparent)]
    Period(#[from] PeriodError),
}
