use super::common::*;
use crate::catalog::garantie_jeune::{garantie_jeune_max, garantie_jeune_neet};
use crate::context::EvaluationError;
use crate::parameters::ParameterError;
use crate::value::{TypesActivite, TypesScolarite};

#[test]
fn neet_holds_without_employment_education_or_training() {
    let individu = neet();
    assert_eq!(garantie_jeune_neet(individu.as_context(), period()), Ok(true));
}

#[test]
fn neet_fails_when_any_single_condition_flips() {
    let cases = [
        ("salaire", neet().with("salaire_net", 850.0)),
        ("scolarite", neet().with("scolarite", TypesScolarite::Lycee)),
        ("etudiant", neet().with("activite", TypesActivite::Etudiant)),
        ("stage", neet().with("indemnites_stage", 300.0)),
        (
            "formation",
            neet().with("revenus_stage_formation_pro", 200.0),
        ),
    ];

    for (label, individu) in cases {
        assert_eq!(
            garantie_jeune_neet(individu.as_context(), period()),
            Ok(false),
            "{label} should break the NEET condition"
        );
    }
}

#[test]
fn neet_accepts_any_non_student_activity() {
    for activite in [
        TypesActivite::Actif,
        TypesActivite::Chomeur,
        TypesActivite::Retraite,
        TypesActivite::Inactif,
    ] {
        let individu = neet().with("activite", activite);
        assert_eq!(
            garantie_jeune_neet(individu.as_context(), period()),
            Ok(true),
            "{activite:?}"
        );
    }
}

#[test]
fn neet_propagates_missing_inputs() {
    let individu = FakeIndividu::new().with("salaire_net", 0.0);
    assert_eq!(
        garantie_jeune_neet(individu.as_context(), period()),
        Err(EvaluationError::UnknownVariable("scolarite".to_string()))
    );
}

#[test]
fn max_is_rsa_base_net_of_housing_deduction() {
    let expected = 564.78 * (1.0 - 0.12);
    for age in [1_i64, 18, 25, 64] {
        let individu = FakeIndividu::new()
            .with("age", age)
            .with("salaire_net", 1_200.0)
            .with_parameters(rsa_parameters());
        let amount = garantie_jeune_max(individu.as_context(), period()).expect("amount computed");
        assert!((amount - expected).abs() < 1e-9, "age {age}: {amount}");
    }
}

#[test]
fn max_is_zero_unless_age_is_strictly_positive() {
    for age in [0_i64, -1] {
        let individu = FakeIndividu::new()
            .with("age", age)
            .with_parameters(rsa_parameters());
        assert_eq!(
            garantie_jeune_max(individu.as_context(), period()),
            Ok(0.0),
            "age {age}"
        );
    }
}

#[test]
fn max_reports_missing_parameter_path() {
    let individu = FakeIndividu::new()
        .with("age", 20_i64)
        .with_parameters(crate::parameters::ParameterSnapshot::new(
            serde_json::json!({ "prestations": { "minima_sociaux": {} } }),
        ));

    match garantie_jeune_max(individu.as_context(), period()) {
        Err(EvaluationError::ParameterNotFound { source, .. }) => assert_eq!(
            source,
            ParameterError::NotFound {
                path: "prestations.minima_sociaux.rsa".to_string()
            }
        ),
        other => panic!("expected missing parameter, got {other:?}"),
    }
}
