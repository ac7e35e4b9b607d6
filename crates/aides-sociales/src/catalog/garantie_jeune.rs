use crate::catalog::CatalogError;
use crate::context::{EvaluationContext, EvaluationError};
use crate::entity::EntityKind;
use crate::period::Month;
use crate::value::{TypesActivite, TypesScolarite, Value, ValueType};
use crate::variable::{DefinitionPeriod, Formula, FormulaBody, FormulaSet, Variable};

pub const RSA: &str = "prestations.minima_sociaux.rsa";
pub const MONTANT_DE_BASE_DU_RSA: &str = "montant_de_base_du_rsa";
pub const TAUX_FORFAIT_LOGEMENT_1_PERSONNE: &str = "forfait_logement.taux_1_personne";

pub(crate) fn variables() -> Result<Vec<Variable>, CatalogError> {
    Ok(vec![
        Variable {
            name: "garantie_jeune_neet",
            entity: EntityKind::Individu,
            value_type: ValueType::Bool,
            definition_period: DefinitionPeriod::Month,
            label: "Variable NEET - Not in Employment, Education or Training",
            reference: Vec::new(),
            documentation: None,
            default_value: Value::Bool(false),
            formulas: FormulaSet::new(
                "garantie_jeune_neet",
                vec![Formula::always(FormulaBody::Boolean(garantie_jeune_neet))],
            )?,
        },
        Variable {
            name: "garantie_jeune_max",
            entity: EntityKind::Individu,
            value_type: ValueType::Float,
            definition_period: DefinitionPeriod::Month,
            label: "Montant maximal de l'allocation Garantie Jeune",
            reference: vec![
                "Article D5131-20 du code du travail",
                "https://www.legifrance.gouv.fr/affichCodeArticle.do;jsessionid=DED54A598193DDE1DF59E0AE16BDE87D.tplgfr21s_3?idArticle=LEGIARTI000033709227&cidTexte=LEGITEXT000006072050",
            ],
            documentation: None,
            default_value: Value::Float(0.0),
            formulas: FormulaSet::new(
                "garantie_jeune_max",
                vec![Formula::always(FormulaBody::Amount(garantie_jeune_max))],
            )?,
        },
    ])
}

/// Neither employed, in education nor in training during the month.
pub fn garantie_jeune_neet(
    individu: &dyn EvaluationContext,
    period: Month,
) -> Result<bool, EvaluationError> {
    let not_in_employment = individu.amount("salaire_net", period)? == 0.0;

    let scolarite: TypesScolarite = individu.enumeration("scolarite", period)?;
    let activite: TypesActivite = individu.enumeration("activite", period)?;
    let not_in_education =
        scolarite == TypesScolarite::Inconnue && activite != TypesActivite::Etudiant;

    let no_indemnites_stage = individu.amount("indemnites_stage", period)? == 0.0;
    let no_revenus_stage_formation_pro =
        individu.amount("revenus_stage_formation_pro", period)? == 0.0;
    let not_in_training = no_indemnites_stage && no_revenus_stage_formation_pro;

    Ok(not_in_employment && not_in_education && not_in_training)
}

/// RSA base amount for one person, net of the single-person housing deduction.
pub fn garantie_jeune_max(
    individu: &dyn EvaluationContext,
    period: Month,
) -> Result<f64, EvaluationError> {
    let params = individu.parameters(period)?;
    let rsa = params
        .node(RSA)
        .map_err(EvaluationError::parameter(period))?;
    let montant_base = rsa
        .amount(MONTANT_DE_BASE_DU_RSA)
        .map_err(EvaluationError::parameter(period))?;
    let taux_1_personne = rsa
        .amount(TAUX_FORFAIT_LOGEMENT_1_PERSONNE)
        .map_err(EvaluationError::parameter(period))?;

    if individu.integer("age", period)? > 0 {
        Ok(montant_base * (1.0 - taux_1_personne))
    } else {
        Ok(0.0)
    }
}
