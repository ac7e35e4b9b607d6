//! Eligibility and amount rules for French social benefits.
//!
//! Each rule is a pure function of other variables and of legal parameters,
//! written against [`context::EvaluationContext`] and registered explicitly
//! in [`catalog::RuleCatalog`]. A host simulation engine resolves the rules'
//! inputs; [`simulation::Simulation`] is a small in-memory stand-in for it.

pub mod catalog;
pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod parameters;
pub mod period;
pub mod simulation;
pub mod telemetry;
pub mod value;
pub mod variable;

pub use catalog::{RuleCatalog, VariableSummary};
pub use context::{EvaluationContext, EvaluationError};
pub use entity::{EntityKind, EntityRef, Relation};
pub use parameters::{ParameterSnapshot, ParameterTimeline};
pub use period::Month;
pub use simulation::{Simulation, Situation};
pub use value::{TypesActivite, TypesScolarite, Value, ValueType};

use config::AppConfig;
use error::AppError;

/// Load configuration, install logging and register the standard catalog.
pub fn bootstrap() -> Result<(AppConfig, RuleCatalog), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;
    let catalog = RuleCatalog::standard()?;
    tracing::info!(?config.environment, variables = catalog.len(), "rule catalog ready");
    Ok((config, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::{env_guard, reset_env};
    use crate::config::AppEnvironment;

    #[test]
    fn bootstrap_loads_config_and_registers_the_standard_catalog() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        std::env::set_var("AIDES_ENV", "test");
        std::env::set_var("AIDES_LOG_LEVEL", "debug");
        let outcome = bootstrap();
        reset_env();

        let (config, catalog) = outcome.expect("bootstrap succeeds");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.telemetry.log_level, "debug");
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.rules().count(), 4);
    }
}
