//! End-to-end checks: JSON sources into the search and the feeding session.

use std::io::{Cursor, Write};

use microbe_web::command::{Session, Tally};
use microbe_web::config::RunConfig;
use microbe_web::error::{Error, SearchError};
use microbe_web::foodweb::{FeedOutcome, FoodWeb, TrophicLayer};
use microbe_web::io::{load_microbes, parse_species};
use microbe_web::search::{find_best, find_best_with, rank_all};
use microbe_web::SiteProfile;

const MICROBES: &str = r#"[
    {"name": "A", "permeability": 1, "mobility": 2, "energy": 8, "desireable": ["Aerobic"]},
    {"name": "B", "permeability": 1, "mobility": 2, "energy": 8, "desireable": []},
    {"name": "C", "permeability": 5, "mobility": 5, "energy": 5, "desireable": []},
    {"name": "D", "permeability": 2, "mobility": 4, "energy": 10, "desireable": ["Toxic"]},
    {"name": "E", "permeability": 1.5, "mobility": 3, "energy": 9, "desireable": ["Aerobic"]}
]"#;

const SPECIES: &str = r#"[
    {"name": "Phytoplankton", "type": "producer", "calories_needed": 0, "calories_provided": 200, "eaten_by": ["Zooplankton", "Sardine"]},
    {"name": "Zooplankton", "type": "consumer", "calories_needed": 10, "calories_provided": 40, "eaten_by": ["Sardine"]},
    {"name": "Sardine", "type": "consumer", "calories_needed": 30, "calories_provided": 60, "eaten_by": ["Tuna", "SeaLion"]},
    {"name": "Tuna", "type": "consumer", "calories_needed": 50, "calories_provided": 60, "eaten_by": ["Orca"]},
    {"name": "SeaLion", "type": "consumer", "calories_needed": 100, "calories_provided": 80, "eaten_by": ["Orca"]},
    {"name": "Orca", "type": "consumer", "calories_needed": 150, "calories_provided": 0}
]"#;

fn microbe_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(MICROBES.as_bytes()).unwrap();
    file
}

#[test]
fn worked_example_group_scores_forty() {
    let pool = load_microbes(microbe_file().path()).unwrap();
    let ranked = rank_all(&pool[..3], &SiteProfile::default(), 3, Default::default()).unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].score, 40);
}

#[test]
fn selects_best_group_from_file() {
    let pool = load_microbes(microbe_file().path()).unwrap();
    let best = find_best(&pool, &SiteProfile::default(), 3).unwrap();
    assert_eq!(best.score, 80);
    // {A, B, D}: perm 1.33, mobility 2.67, energy 8.67, Aerobic; {A, B, E} ties later
    assert_eq!(best.group.names(), vec!["A", "B", "D"]);
}

#[test]
fn configured_undesired_trait_check_is_applied() {
    let config = RunConfig::from_toml_str(
        r#"
        [profile]
        permeability = [1, 2]
        mobility = [2, 4]
        energy = [8, 10]
        desirable = ["Aerobic"]
        undesirable = ["Toxic"]

        [scoring]
        undesired-trait-check = true
        "#,
    )
    .unwrap();
    let pool = load_microbes(microbe_file().path()).unwrap();
    let best = find_best_with(&pool, &config.profile, config.group_size, config.rules).unwrap();
    assert_eq!(best.score, 100);
    assert_eq!(best.group.names(), vec!["A", "B", "E"]);
}

#[test]
fn too_small_pool_is_an_error() {
    let pool = load_microbes(microbe_file().path()).unwrap();
    let err = find_best(&pool, &SiteProfile::default(), 6).unwrap_err();
    assert_eq!(err, SearchError::InsufficientCandidates { needed: 6, available: 5 });
    let wrapped: Error = err.into();
    assert!(wrapped.to_string().contains("only 5 available"));
}

#[test]
fn feeding_session_over_parsed_species() {
    let web = FoodWeb::build(parse_species(SPECIES).unwrap()).unwrap();
    assert_eq!(web.trophic_layer("Sardine").unwrap(), TrophicLayer::Mixed);
    assert_eq!(web.trophic_layer("Tuna").unwrap(), TrophicLayer::SecondaryConsumer);
    assert_eq!(web.trophic_layer("Orca").unwrap(), TrophicLayer::Apex);

    let mut session = Session::new(web);
    let mut outcomes = Vec::new();
    let commands = "Sardine\nOrca\nTuna\nPhytoplankton\nKraken\nexit\nTuna\n";
    let tally = session.run(Cursor::new(commands), |o, _| outcomes.push(o.clone())).unwrap();

    assert_eq!(tally, Tally { fed: 2, hungry: 1, ignored: 2 });
    assert_eq!(
        outcomes[0],
        FeedOutcome::Fed { predator: "Sardine".into(), prey: vec!["Phytoplankton".into()], portion: 30.0 }
    );
    // SeaLion (80) is the single top prey, 80 < 150
    assert_eq!(
        outcomes[1],
        FeedOutcome::InsufficientCalories { predator: "Orca".into(), needed: 150.0, available: 80.0 }
    );
    assert_eq!(
        outcomes[2],
        FeedOutcome::Fed { predator: "Tuna".into(), prey: vec!["Sardine".into()], portion: 50.0 }
    );

    let web = session.into_web();
    assert_eq!(web.species("Phytoplankton").unwrap().calories_provided, 170.0);
    assert_eq!(web.species("Sardine").unwrap().calories_provided, 10.0);
    assert_eq!(web.species("Sardine").unwrap().calories_needed, 0.0);
    assert_eq!(web.species("Orca").unwrap().calories_needed, 150.0);
}
