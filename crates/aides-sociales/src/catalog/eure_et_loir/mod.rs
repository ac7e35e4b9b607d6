//! Departmental aid of Eure-et-Loir (28).

mod pch;

pub use pch::{
    condition_nationalite, eure_et_loir_eligibilite_pch_domicile,
    eure_et_loir_eligibilite_pch_etablissement,
};

pub(crate) use pch::variables;
