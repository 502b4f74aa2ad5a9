use std::io::Write;
use std::path::PathBuf;

use combat_content::{ContentError, ContentFactory, EncounterLoader};
use combat_core::{CombatEngine, CombatError, Phase, Stats};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn sample_encounter_builds_a_scaled_roster() {
    let factory = ContentFactory::new(data_dir());
    let content = factory.load_content().unwrap();
    let encounter = factory.load_encounter("sample").unwrap();

    let (heroes, boss) = encounter.build_roster(&content).unwrap();
    assert_eq!(heroes.len(), 4);
    assert_eq!(boss.name, "Big Bloob");
    assert_eq!(boss.stats, Stats::full(180, 10));
    assert!(boss.modifier("hat_hard_hat").is_some());

    let spoob = &heroes[0];
    assert_eq!(spoob.name, "Spoob");
    assert_eq!(spoob.stats, Stats::full(20, 6));
    assert!(spoob.modifier("hat_wizard").is_some());

    let ugly = &heroes[3];
    assert_eq!(ugly.name, "Ugly Spoob");
    assert_eq!(ugly.stats, Stats::full(19, 6));
    assert_eq!(ugly.abilities().len(), 3);
}

#[test]
fn sample_encounter_plays_to_an_outcome() {
    let factory = ContentFactory::new(data_dir());
    let content = factory.load_content().unwrap();
    let mut engine = CombatEngine::new(factory.load_config().unwrap());
    factory
        .load_encounter("sample")
        .unwrap()
        .load_into(&content, &mut engine)
        .unwrap();

    for _ in 0..200 {
        if engine.is_game_over() {
            break;
        }
        engine.start_round();
        while engine.phase() == Phase::Action {
            engine.process_next_action().unwrap();
        }
    }
    assert!(engine.is_game_over());
}

#[test]
fn encounter_files_reject_unknown_content() {
    let factory = ContentFactory::new(data_dir());
    let content = factory.load_content().unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[boss]
name = "Hatless"

[[heroes]]
id = "cat"
character_type = "Cat"
abilities = ["basic_attack"]
hat = 99
"#
    )
    .unwrap();

    let encounter = EncounterLoader::load(file.path()).unwrap();
    assert_eq!(encounter.boss.level, 1);
    assert_eq!(
        encounter.build_roster(&content).unwrap_err(),
        ContentError::UnknownEquipment { hat_id: 99 }
    );
}

#[test]
fn encounters_reject_shared_character_ids() {
    let factory = ContentFactory::new(data_dir());
    let content = factory.load_content().unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[boss]
name = "Big Bloob"
abilities = ["basic_attack"]

[[heroes]]
id = "boss"
character_type = "Spoob"
abilities = ["basic_attack"]
"#
    )
    .unwrap();

    let encounter = EncounterLoader::load(file.path()).unwrap();
    let mut engine = CombatEngine::default();
    assert_eq!(
        encounter.load_into(&content, &mut engine).unwrap_err(),
        ContentError::Combat(CombatError::DuplicateCharacter { id: "boss".into() })
    );
    assert!(engine.heroes().is_empty());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[boss]\nname = \"Boss\"\n[[heroes]]\nid = \"cat\"\ncharacter_type = \"Cat\"\n\
         [[heroes]]\nid = \"cat\"\ncharacter_type = \"Duck\""
    )
    .unwrap();

    let encounter = EncounterLoader::load(file.path()).unwrap();
    assert_eq!(
        encounter.load_into(&content, &mut engine).unwrap_err(),
        ContentError::Combat(CombatError::DuplicateCharacter { id: "cat".into() })
    );
}

#[test]
fn oversized_encounters_fail_at_initialization() {
    let factory = ContentFactory::new(data_dir());
    let content = factory.load_content().unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[boss]\nname = \"Boss\"\nlevel = 2").unwrap();
    for i in 0..6 {
        writeln!(
            file,
            "[[heroes]]\nid = \"duck{i}\"\ncharacter_type = \"Duck\""
        )
        .unwrap();
    }

    let encounter = EncounterLoader::load(file.path()).unwrap();
    let mut engine = CombatEngine::default();
    assert_eq!(
        encounter.load_into(&content, &mut engine).unwrap_err(),
        ContentError::Combat(CombatError::TooManyHeroes { count: 6, max: 5 })
    );
}
