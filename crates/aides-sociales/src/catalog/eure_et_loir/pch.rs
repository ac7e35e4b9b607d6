use crate::catalog::CatalogError;
use crate::context::{EvaluationContext, EvaluationError};
use crate::entity::EntityKind;
use crate::period::Month;
use crate::value::{Value, ValueType};
use crate::variable::{DefinitionPeriod, Formula, FormulaBody, FormulaSet, Variable};

const RDAS_REFERENCE: &str = "https://github.com/openfisca/openfisca-france-local/wiki/files/departements/eure-et-loir/RDAS_valide__decembre_2019.pdf";

pub(crate) fn variables() -> Result<Vec<Variable>, CatalogError> {
    let reglement = Month::new(2020, 1)?;

    Ok(vec![
        Variable {
            name: "eure_et_loir_eligibilite_pch_domicile",
            entity: EntityKind::Individu,
            value_type: ValueType::Bool,
            definition_period: DefinitionPeriod::Month,
            label: "En Eure-et-Loir, éligibilité d'une personne en situation de handicap à la prestation de compensation de handicap à domicile",
            reference: vec![
                "Titre 3 Chapitre 1-3 du Règlement départemental d'Aide Sociale PA PH de l'Eure et Loir",
                RDAS_REFERENCE,
            ],
            documentation: Some(concat!(
                "La Prestation de compensation du handicap à domicile (PCH) a pour but de compenser les conséquences du handicap. ",
                "C’est une aide personnalisée, modulable en fonction des besoins de chaque bénéficiaire. ",
                "Elle peut financer des aides humaines, des aides techniques, des aides pour l’aménagement du logement et/ou du véhicule, ",
                "les surcoûts liés au transport, des aides animalières, des charges spécifiques (service de téléalarme, etc.) ou exceptionnelles.\n",
                "Cette aide n’est pas cumulable avec l’Allocation compensatrice pour tierce personne (ACTP), ",
                "l’Allocation personnalisée d’autonomie (APA) et l’Allocation d’éducation de l’enfant handicapé (AEEH)\n",
                "L’attribution de l’aide est soumise à une évaluation de la situation du demandeur par la Maison départementale de l’autonomie (MDA)."
            )),
            default_value: Value::Bool(false),
            formulas: FormulaSet::new(
                "eure_et_loir_eligibilite_pch_domicile",
                vec![Formula::starting(
                    reglement,
                    FormulaBody::Boolean(eure_et_loir_eligibilite_pch_domicile),
                )],
            )?,
        },
        Variable {
            name: "eure_et_loir_eligibilite_pch_etablissement",
            entity: EntityKind::Individu,
            value_type: ValueType::Bool,
            definition_period: DefinitionPeriod::Month,
            label: "En Eure-et-Loir, éligibilité d'une personne en situation de handicap à la prestation de compensation de handicap en établissement",
            reference: vec![
                "Titre 3 Chapitre 2-2 du Règlement départemental d'Aide Sociale PA PH de l'Eure et Loir",
                RDAS_REFERENCE,
            ],
            documentation: Some(concat!(
                "La PCH en établissement a pour but de compenser les conséquences du handicap durant les périodes ",
                "d’interruption d’hospitalisation ou d’hébergement en établissement. ",
                "C’est une aide personnalisée, modulable en fonction des besoins de chaque bénéficiaire. ",
                "Elle peut financer des aides humaines, des aides techniques, des aides pour l’aménagement du logement et/ou du véhicule, ",
                "les surcoûts liés au transport, etc.\n",
                "Cette aide n’est pas cumulable avec l’Allocation compensatrice pour tierce personne (ACTP), ",
                "l’Allocation personnalisée d’autonomie (APA) et l’Allocation d’éducation de l’enfant handicapé (AEEH)\n",
                "L’attribution de l’aide est soumise à une évaluation de la situation du demandeur par la Maison départementale de l’autonomie (MDA)."
            )),
            default_value: Value::Bool(false),
            formulas: FormulaSet::new(
                "eure_et_loir_eligibilite_pch_etablissement",
                vec![Formula::starting(
                    reglement,
                    FormulaBody::Boolean(eure_et_loir_eligibilite_pch_etablissement),
                )],
            )?,
        },
    ])
}

/// EEE national, holder of a residence permit, refugee or stateless.
pub fn condition_nationalite(
    individu: &dyn EvaluationContext,
    period: Month,
) -> Result<bool, EvaluationError> {
    let statuts = [
        individu.boolean("ressortissant_eee", period)?,
        individu.boolean("titre_sejour", period)?,
        individu.boolean("refugie", period)?,
        individu.boolean("apatride", period)?,
    ];
    Ok(statuts.into_iter().any(|statut| statut))
}

fn condition_residence(
    individu: &dyn EvaluationContext,
    period: Month,
) -> Result<bool, EvaluationError> {
    individu
        .menage()
        .boolean("eure_et_loir_eligibilite_residence", period)
}

pub fn eure_et_loir_eligibilite_pch_domicile(
    individu: &dyn EvaluationContext,
    period: Month,
) -> Result<bool, EvaluationError> {
    let condition_residence = condition_residence(individu, period)?;
    let condition_nationalite = condition_nationalite(individu, period)?;
    let condition_handicap = individu.boolean("handicap", period)?;

    let possede_aeeh = individu.famille().amount("aeeh", period)? > 0.0;
    let possede_apa = individu.amount("apa_domicile", period)? > 0.0;
    let possede_actp = individu.boolean("actp", period)?;

    Ok(condition_residence
        && condition_nationalite
        && condition_handicap
        && !possede_aeeh
        && !possede_apa
        && !possede_actp)
}

pub fn eure_et_loir_eligibilite_pch_etablissement(
    individu: &dyn EvaluationContext,
    period: Month,
) -> Result<bool, EvaluationError> {
    let condition_residence = condition_residence(individu, period)?;
    let condition_nationalite = condition_nationalite(individu, period)?;
    let condition_handicap = individu.boolean("handicap", period)?;
    let condition_hebergement = individu.famille().boolean("place_hebergement", period)?;

    Ok(condition_residence && condition_nationalite && condition_handicap && condition_hebergement)
}
