use crate::catalog::{CatalogError, RuleCatalog};
use crate::entity::EntityKind;
use crate::period::Month;
use crate::value::{TypesActivite, Value, ValueType};
use crate::variable::Variable;

#[test]
fn standard_catalog_registers_the_four_rules() {
    let catalog = RuleCatalog::standard().expect("standard catalog registers");

    let rules: Vec<&str> = catalog.rules().map(|variable| variable.name).collect();
    assert_eq!(
        rules,
        vec![
            "eure_et_loir_eligibilite_pch_domicile",
            "eure_et_loir_eligibilite_pch_etablissement",
            "garantie_jeune_max",
            "garantie_jeune_neet",
        ]
    );
    assert!(catalog
        .rules()
        .all(|variable| variable.entity == EntityKind::Individu));
    assert_eq!(catalog.inputs().count(), 16);
}

#[test]
fn rule_types_match_their_outputs() {
    let catalog = RuleCatalog::standard().expect("standard catalog registers");
    assert_eq!(
        catalog.get("garantie_jeune_max").map(|v| v.value_type),
        Some(ValueType::Float)
    );
    assert_eq!(
        catalog.get("garantie_jeune_neet").map(|v| v.value_type),
        Some(ValueType::Bool)
    );
}

#[test]
fn eure_et_loir_rules_start_in_january_2020() {
    let catalog = RuleCatalog::standard().expect("standard catalog registers");
    let january_2020 = Month::new(2020, 1).expect("valid");

    for name in [
        "eure_et_loir_eligibilite_pch_domicile",
        "eure_et_loir_eligibilite_pch_etablissement",
    ] {
        let variable = catalog.get(name).expect("registered");
        assert_eq!(variable.formulas.starts(), vec![Some(january_2020)]);
        assert!(variable.reference.iter().any(|r| r.contains("Règlement départemental")));
    }

    let neet = catalog.get("garantie_jeune_neet").expect("registered");
    assert_eq!(neet.formulas.starts(), vec![None]);
}

#[test]
fn activite_defaults_to_inactif() {
    let catalog = RuleCatalog::standard().expect("standard catalog registers");
    assert_eq!(
        catalog.get("activite").map(|v| v.default_value.clone()),
        Some(Value::from(TypesActivite::Inactif))
    );
    assert_eq!(
        catalog.get("age").map(|v| v.default_value.clone()),
        Some(Value::Int(0))
    );
}

#[test]
fn registering_a_name_twice_is_rejected() {
    let mut catalog = RuleCatalog::standard().expect("standard catalog registers");
    let duplicate = Variable::input("age", EntityKind::Individu, ValueType::Int, "Âge");
    assert_eq!(
        catalog.register(duplicate),
        Err(CatalogError::DuplicateVariable("age".to_string()))
    );
}

#[test]
fn defaults_must_match_declared_type() {
    let mut catalog = RuleCatalog::new();
    let variable =
        Variable::input("handicap", EntityKind::Individu, ValueType::Bool, "").with_default(3.5);
    assert!(matches!(
        catalog.register(variable),
        Err(CatalogError::InvalidDefault { .. })
    ));
    assert!(catalog.is_empty());
}

#[test]
fn summaries_serialize_metadata() {
    let catalog = RuleCatalog::standard().expect("standard catalog registers");
    let summaries = catalog.summaries();
    let max = summaries
        .iter()
        .find(|summary| summary.name == "garantie_jeune_max")
        .expect("summary present");

    let json = serde_json::to_value(max).expect("summary serializes");
    assert_eq!(json["entity"], "individu");
    assert_eq!(json["value_type"]["type"], "float");
    assert_eq!(json["definition_period"], "month");
    assert_eq!(json["formulas"], serde_json::json!([null]));
    assert_eq!(json["reference"][0], "Article D5131-20 du code du travail");

    let domicile = summaries
        .iter()
        .find(|summary| summary.name == "eure_et_loir_eligibilite_pch_domicile")
        .expect("summary present");
    let json = serde_json::to_value(domicile).expect("summary serializes");
    assert_eq!(json["formulas"], serde_json::json!(["2020-01"]));
}

#[test]
fn pch_documentation_names_every_excluded_benefit() {
    let catalog = RuleCatalog::standard().expect("standard catalog registers");

    for name in [
        "eure_et_loir_eligibilite_pch_domicile",
        "eure_et_loir_eligibilite_pch_etablissement",
    ] {
        let documentation = catalog
            .get(name)
            .and_then(|variable| variable.documentation)
            .expect("documented");
        assert!(documentation.contains("C’est une aide personnalisée, modulable"));
        assert!(documentation.contains("Allocation compensatrice pour tierce personne (ACTP)"));
        assert!(documentation.contains("Allocation personnalisée d’autonomie (APA)"));
        assert!(documentation.contains("Allocation d’éducation de l’enfant handicapé (AEEH)"));
    }

    let domicile = catalog
        .get("eure_et_loir_eligibilite_pch_domicile")
        .and_then(|variable| variable.documentation)
        .expect("documented");
    assert!(domicile.contains("(service de téléalarme, etc.)"));
}

#[test]
fn garantie_jeune_max_cites_the_labour_code_article() {
    let catalog = RuleCatalog::standard().expect("standard catalog registers");
    let reference = &catalog.get("garantie_jeune_max").expect("registered").reference;
    assert_eq!(reference[0], "Article D5131-20 du code du travail");
    assert!(reference[1].contains("idArticle=LEGIARTI000033709227&cidTexte=LEGITEXT000006072050"));
}
