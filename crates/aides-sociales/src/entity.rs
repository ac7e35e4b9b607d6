use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity kinds of the population model. A household groups families, a
/// family groups individuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Individu,
    Famille,
    Menage,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            EntityKind::Individu => "individu",
            EntityKind::Famille => "famille",
            EntityKind::Menage => "menage",
        }
    }

    pub const fn plural(self) -> &'static str {
        match self {
            EntityKind::Individu => "individus",
            EntityKind::Famille => "familles",
            EntityKind::Menage => "menages",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accessor from an individual to one of the groups it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Famille,
    Menage,
}

impl Relation {
    pub const fn target(self) -> EntityKind {
        match self {
            Relation::Famille => EntityKind::Famille,
            Relation::Menage => EntityKind::Menage,
        }
    }
}

/// Identifies one entity instance inside a simulation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
