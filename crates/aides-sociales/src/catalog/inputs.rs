use crate::entity::EntityKind::{Famille, Individu, Menage};
use crate::value::{TypesActivite, TypesScolarite, ValueType, VariableEnum};
use crate::variable::Variable;

/// Variables the rules read but do not compute. Their values come from the
/// engine's input data; a missing value resolves to the declared default.
pub(crate) fn input_variables() -> Vec<Variable> {
    vec![
        Variable::input("salaire_net", Individu, ValueType::Float, "Salaire net"),
        Variable::input(
            "scolarite",
            Individu,
            TypesScolarite::value_type(),
            "Modalité de l'accueil en établissement scolaire",
        ),
        Variable::input(
            "activite",
            Individu,
            TypesActivite::value_type(),
            "Activité normale",
        )
        .with_default(TypesActivite::Inactif),
        Variable::input(
            "indemnites_stage",
            Individu,
            ValueType::Float,
            "Indemnités de stage",
        ),
        Variable::input(
            "revenus_stage_formation_pro",
            Individu,
            ValueType::Float,
            "Revenus de stage de formation professionnelle",
        ),
        Variable::input("age", Individu, ValueType::Int, "Âge (en années)"),
        Variable::input(
            "ressortissant_eee",
            Individu,
            ValueType::Bool,
            "Ressortissant de l'Espace économique européen (EEE)",
        ),
        Variable::input(
            "titre_sejour",
            Individu,
            ValueType::Bool,
            "Titulaire d'un titre de séjour",
        ),
        Variable::input("refugie", Individu, ValueType::Bool, "Réfugié"),
        Variable::input("apatride", Individu, ValueType::Bool, "Apatride"),
        Variable::input("handicap", Individu, ValueType::Bool, "En situation de handicap"),
        Variable::input(
            "apa_domicile",
            Individu,
            ValueType::Float,
            "Allocation personnalisée d'autonomie à domicile",
        ),
        Variable::input(
            "actp",
            Individu,
            ValueType::Bool,
            "Bénéficiaire de l'allocation compensatrice pour tierce personne",
        ),
        Variable::input(
            "aeeh",
            Famille,
            ValueType::Float,
            "Allocation d'éducation de l'enfant handicapé",
        ),
        Variable::input(
            "place_hebergement",
            Famille,
            ValueType::Bool,
            "Dispose d'une place dans un établissement d'hébergement",
        ),
        Variable::input(
            "eure_et_loir_eligibilite_residence",
            Menage,
            ValueType::Bool,
            "Résidence en Eure-et-Loir",
        ),
    ]
}
