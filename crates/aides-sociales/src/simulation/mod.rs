//! Minimal engine driving the catalog against an in-memory [`Situation`].
//!
//! It resolves one (variable, entity, period) at a time, recursing through
//! the evaluation contract, and memoizes every resolved key. Vectorized
//! evaluation and parameter loading belong to the host engine.

mod situation;

pub use situation::{Group, InputValues, Situation, SituationError};

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::catalog::RuleCatalog;
use crate::config::SimulationConfig;
use crate::context::{EvaluationContext, EvaluationError};
use crate::entity::{EntityKind, EntityRef, Relation};
use crate::parameters::{ParameterSnapshot, ParameterTimeline};
use crate::period::Month;
use crate::value::Value;

type Key = (String, EntityRef, Month);

/// How a traced value was obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueSource {
    Input,
    Formula { start: Option<Month> },
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    pub variable: String,
    pub entity: EntityRef,
    pub period: Month,
    pub value: Value,
    pub source: ValueSource,
}

#[derive(Debug, Clone, Default)]
struct Membership {
    famille: BTreeMap<String, String>,
    menage: BTreeMap<String, String>,
}

pub struct Simulation {
    catalog: Arc<RuleCatalog>,
    parameters: ParameterTimeline,
    config: SimulationConfig,
    entities: BTreeMap<EntityKind, Vec<String>>,
    membership: Membership,
    inputs: HashMap<Key, Value>,
    cache: RefCell<HashMap<Key, Value>>,
    stack: RefCell<Vec<Key>>,
    trace: RefCell<Vec<TraceEntry>>,
}

impl Simulation {
    pub fn new(
        catalog: Arc<RuleCatalog>,
        situation: Situation,
        parameters: ParameterTimeline,
        config: SimulationConfig,
    ) -> Result<Self, SituationError> {
        let mut entities = BTreeMap::new();
        let mut membership = Membership::default();
        let mut inputs = HashMap::new();

        let individus: Vec<String> = situation.individus.keys().cloned().collect();

        for kind in [EntityKind::Famille, EntityKind::Menage] {
            let assigned = match kind {
                EntityKind::Menage => &mut membership.menage,
                _ => &mut membership.famille,
            };
            let mut ids = Vec::new();

            for (group_id, group) in situation.groups(kind) {
                if group_id.starts_with(&implicit_prefix(kind)) {
                    return Err(SituationError::ReservedGroupId {
                        group: EntityRef::new(kind, group_id.clone()),
                    });
                }
                ids.push(group_id.clone());
                for membre in &group.membres {
                    if !situation.individus.contains_key(membre) {
                        return Err(SituationError::UnknownMember {
                            group: EntityRef::new(kind, group_id.clone()),
                            membre: membre.clone(),
                        });
                    }
                    if assigned.insert(membre.clone(), group_id.clone()).is_some() {
                        return Err(SituationError::MultipleGroups {
                            individu: membre.clone(),
                            kind,
                        });
                    }
                }
                let entity = EntityRef::new(kind, group_id.clone());
                load_inputs(&catalog, &entity, &group.inputs, &mut inputs)?;
            }

            for individu in &individus {
                if !assigned.contains_key(individu) {
                    let implicit = format!("{}{}", implicit_prefix(kind), individu);
                    debug!(%individu, group = %implicit, "implicit single-member group");
                    assigned.insert(individu.clone(), implicit.clone());
                    ids.push(implicit);
                }
            }

            entities.insert(kind, ids);
        }

        for (id, values) in &situation.individus {
            let entity = EntityRef::new(EntityKind::Individu, id.clone());
            load_inputs(&catalog, &entity, values, &mut inputs)?;
        }
        entities.insert(EntityKind::Individu, individus);

        Ok(Self {
            catalog,
            parameters,
            config,
            entities,
            membership,
            inputs,
            cache: RefCell::new(HashMap::new()),
            stack: RefCell::new(Vec::new()),
            trace: RefCell::new(Vec::new()),
        })
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn entity_ids(&self, kind: EntityKind) -> &[String] {
        self.entities.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Value of `variable` for the instance `id` of the variable's entity.
    pub fn calculate(
        &self,
        variable: &str,
        id: &str,
        period: Month,
    ) -> Result<Value, EvaluationError> {
        let declared = self
            .catalog
            .get(variable)
            .ok_or_else(|| EvaluationError::UnknownVariable(variable.to_string()))?;
        let entity = EntityRef::new(declared.entity, id);
        if !self.entity_ids(entity.kind).iter().any(|known| known == id) {
            return Err(EvaluationError::UnknownEntity(entity));
        }
        self.resolve(&entity, variable, period)
    }

    /// Value of `variable` for every instance of its entity.
    pub fn calculate_all(
        &self,
        variable: &str,
        period: Month,
    ) -> Result<BTreeMap<String, Value>, EvaluationError> {
        let declared = self
            .catalog
            .get(variable)
            .ok_or_else(|| EvaluationError::UnknownVariable(variable.to_string()))?;
        self.entity_ids(declared.entity)
            .iter()
            .map(|id| {
                let entity = EntityRef::new(declared.entity, id.clone());
                self.resolve(&entity, variable, period)
                    .map(|value| (id.clone(), value))
            })
            .collect()
    }

    /// Resolutions recorded so far; empty unless tracing is enabled.
    pub fn trace(&self) -> Vec<TraceEntry> {
        self.trace.borrow().clone()
    }

    fn group_of(&self, individu: &str, relation: Relation) -> Option<&String> {
        match relation {
            Relation::Famille => self.membership.famille.get(individu),
            Relation::Menage => self.membership.menage.get(individu),
        }
    }

    fn resolve(
        &self,
        entity: &EntityRef,
        name: &str,
        period: Month,
    ) -> Result<Value, EvaluationError> {
        let variable = self
            .catalog
            .get(name)
            .ok_or_else(|| EvaluationError::UnknownVariable(name.to_string()))?;
        if variable.entity != entity.kind {
            return Err(EvaluationError::EntityMismatch {
                variable: name.to_string(),
                declared: variable.entity,
                requested: entity.kind,
            });
        }

        let key: Key = (name.to_string(), entity.clone(), period);
        if let Some(value) = self.cache.borrow().get(&key) {
            trace!(variable = name, %entity, %period, "cache hit");
            return Ok(value.clone());
        }

        let (value, source) = if let Some(value) = self.inputs.get(&key) {
            (value.clone(), ValueSource::Input)
        } else if let Some(formula) = variable.formulas.select(period) {
            {
                let mut stack = self.stack.borrow_mut();
                if stack.contains(&key) {
                    return Err(EvaluationError::CircularDefinition {
                        variable: name.to_string(),
                        entity: entity.clone(),
                        period,
                    });
                }
                if stack.len() >= self.config.max_depth {
                    return Err(EvaluationError::MaxDepthExceeded {
                        variable: name.to_string(),
                        limit: self.config.max_depth,
                    });
                }
                stack.push(key.clone());
            }

            debug!(variable = name, %entity, %period, start = ?formula.start, "evaluating formula");
            let resolver = Resolver {
                simulation: self,
                entity: entity.clone(),
            };
            let outcome = formula.body.evaluate(&resolver, period);
            self.stack.borrow_mut().pop();

            (
                outcome?,
                ValueSource::Formula {
                    start: formula.start,
                },
            )
        } else {
            debug!(variable = name, %entity, %period, "no input or formula, using default");
            (variable.default_value.clone(), ValueSource::Default)
        };

        if self.config.trace {
            self.trace.borrow_mut().push(TraceEntry {
                variable: name.to_string(),
                entity: entity.clone(),
                period,
                value: value.clone(),
                source,
            });
        }
        self.cache.borrow_mut().insert(key, value.clone());
        Ok(value)
    }
}

/// Prefix of the ids given to implicit single-member groups.
fn implicit_prefix(kind: EntityKind) -> String {
    format!("_{}_", kind.label())
}

fn load_inputs(
    catalog: &RuleCatalog,
    entity: &EntityRef,
    values: &InputValues,
    inputs: &mut HashMap<Key, Value>,
) -> Result<(), SituationError> {
    for (name, by_period) in values {
        let variable = catalog
            .get(name)
            .ok_or_else(|| SituationError::UnknownVariable {
                entity: entity.clone(),
                variable: name.clone(),
            })?;
        if variable.entity != entity.kind {
            return Err(SituationError::EntityMismatch {
                entity: entity.clone(),
                variable: name.clone(),
                declared: variable.entity,
            });
        }

        for (period, value) in by_period {
            let value = variable.value_type.coerce(value.clone()).ok_or_else(|| {
                SituationError::InvalidValue {
                    entity: entity.clone(),
                    variable: name.clone(),
                    period: *period,
                    expected: variable.value_type.label(),
                }
            })?;
            inputs.insert((name.clone(), entity.clone(), *period), value);
        }
    }
    Ok(())
}

/// Context handed to a formula body, bound to one entity instance.
struct Resolver<'s> {
    simulation: &'s Simulation,
    entity: EntityRef,
}

impl EvaluationContext for Resolver<'_> {
    fn entity(&self) -> &EntityRef {
        &self.entity
    }

    fn get(&self, variable: &str, period: Month) -> Result<Value, EvaluationError> {
        self.simulation.resolve(&self.entity, variable, period)
    }

    fn related(
        &self,
        relation: Relation,
        variable: &str,
        period: Month,
    ) -> Result<Value, EvaluationError> {
        let group = (self.entity.kind == EntityKind::Individu)
            .then(|| self.simulation.group_of(&self.entity.id, relation))
            .flatten()
            .ok_or_else(|| EvaluationError::NotAMember {
                entity: self.entity.clone(),
                relation,
            })?;
        let target = EntityRef::new(relation.target(), group.clone());
        self.simulation.resolve(&target, variable, period)
    }

    fn parameters(&self, period: Month) -> Result<&ParameterSnapshot, EvaluationError> {
        self.simulation
            .parameters
            .at(period)
            .ok_or(EvaluationError::NoParameters { period })
    }
}
