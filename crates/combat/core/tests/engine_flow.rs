use combat_core::{
    Ability, Character, CombatConfig, CombatEngine, CombatError, ContextKind, Effect, Executor,
    Modifier, Phase, Stats, Trigger,
};

fn ability(executor: Executor, cooldown: u32) -> Ability {
    let id = executor.to_string();
    Ability::new(id.clone(), id, executor.context_kind(), cooldown, executor)
}

fn hero(id: &str, stats: Stats, abilities: Vec<Ability>) -> Character {
    Character::new(id, id, stats, abilities, Vec::new())
}

fn idle_boss(health: i32) -> Character {
    Character::new("boss", "Boss", Stats::full(health, 0), Vec::new(), Vec::new())
}

fn engine(heroes: Vec<Character>, enemy: Character) -> CombatEngine {
    let mut engine = CombatEngine::new(CombatConfig::default());
    engine.initialize(heroes, Some(enemy)).unwrap();
    engine
}

/// Plays one full round and returns the number of `process_next_action` calls.
fn play_round(engine: &mut CombatEngine) -> usize {
    engine.start_round();
    let mut calls = 0;
    while engine.phase() == Phase::Action {
        engine.process_next_action().unwrap();
        calls += 1;
    }
    calls
}

#[test]
fn basic_attacks_defeat_the_boss() {
    let mut engine = engine(
        vec![hero(
            "hero",
            Stats::full(30, 10),
            vec![ability(Executor::BasicAttack, 0)],
        )],
        idle_boss(20),
    );

    play_round(&mut engine);
    assert_eq!(engine.enemy().unwrap().stats.health, 10);
    assert!(!engine.is_game_over());

    play_round(&mut engine);
    assert_eq!(engine.enemy().unwrap().stats.health, 0);
    assert!(engine.is_game_over());
    assert!(engine.is_victory());
}

#[test]
fn boss_acts_once_after_the_last_hero() {
    let boss = Character::new(
        "boss",
        "Boss",
        Stats::full(100, 3),
        vec![ability(Executor::BasicAttack, 0)],
        Vec::new(),
    );
    let mut engine = engine(
        vec![
            hero("a", Stats::full(30, 1), vec![ability(Executor::BasicAttack, 0)]),
            hero("b", Stats::full(30, 1), vec![ability(Executor::BasicAttack, 0)]),
        ],
        boss,
    );

    engine.start_round();
    assert_eq!(engine.phase(), Phase::Action);

    let first = engine.process_next_action().unwrap().unwrap();
    assert_eq!(first.actor.as_str(), "a");
    engine.process_next_action().unwrap();
    assert_eq!(engine.phase(), Phase::Action);

    let boss_turn = engine.process_next_action().unwrap().unwrap();
    assert_eq!(boss_turn.actor.as_str(), "boss");
    assert_eq!(boss_turn.target.as_ref().map(|id| id.as_str()), Some("a"));
    assert_eq!(engine.phase(), Phase::RoundEnd);
    assert!(engine.boss_acted());

    // Outside the action phase nothing moves.
    let snapshot: Vec<Stats> = engine.heroes().iter().map(|h| h.stats).collect();
    assert_eq!(engine.process_next_action().unwrap(), None);
    let after: Vec<Stats> = engine.heroes().iter().map(|h| h.stats).collect();
    assert_eq!(snapshot, after);
    assert_eq!(engine.heroes()[0].stats.health, 27);
    assert_eq!(engine.enemy().unwrap().stats.health, 98);
}

#[test]
fn processing_before_the_first_round_is_a_no_op() {
    let mut engine = engine(
        vec![hero("a", Stats::full(30, 5), vec![ability(Executor::BasicAttack, 0)])],
        idle_boss(50),
    );
    assert_eq!(engine.phase(), Phase::RoundStart);
    assert_eq!(engine.process_next_action().unwrap(), None);
    assert_eq!(engine.enemy().unwrap().stats.health, 50);
    assert_eq!(engine.phase(), Phase::RoundStart);
}

#[test]
fn fallen_heroes_are_skipped_in_the_same_call() {
    let mut engine = engine(
        vec![
            hero("fallen", Stats::new(0, 30, 9), vec![ability(Executor::BasicAttack, 0)]),
            hero("alive", Stats::full(30, 4), vec![ability(Executor::BasicAttack, 0)]),
        ],
        idle_boss(50),
    );

    assert_eq!(play_round(&mut engine), 2);
    assert_eq!(engine.enemy().unwrap().stats.health, 46);
}

#[test]
fn cooldowns_gate_the_strongest_ability() {
    let mut engine = engine(
        vec![hero(
            "hero",
            Stats::full(30, 10),
            vec![
                ability(Executor::BasicAttack, 0),
                ability(Executor::PowerAttack, 2),
            ],
        )],
        idle_boss(200),
    );

    play_round(&mut engine);
    assert_eq!(engine.enemy().unwrap().stats.health, 185);
    play_round(&mut engine);
    assert_eq!(engine.enemy().unwrap().stats.health, 175);
    play_round(&mut engine);
    assert_eq!(engine.enemy().unwrap().stats.health, 160);
}

#[test]
fn attack_gear_rewrites_outgoing_damage() {
    let wizard = Modifier::on_trigger(
        "hat_wizard",
        "Wizard Hat",
        Trigger::On(ContextKind::Attack),
        Effect::MultiplyDamage { factor: 2 },
    );
    let gunner = Character::new(
        "hero",
        "Hero",
        Stats::full(30, 10),
        vec![ability(Executor::BasicAttack, 0)],
        vec![wizard],
    );
    let mut engine = engine(vec![gunner], idle_boss(100));

    play_round(&mut engine);
    assert_eq!(engine.enemy().unwrap().stats.health, 80);
}

#[test]
fn heals_land_on_the_first_living_hero() {
    let mut engine = engine(
        vec![
            hero("tank", Stats::new(10, 50, 1), Vec::new()),
            hero("cleric", Stats::full(50, 2), vec![ability(Executor::Heal, 3)]),
        ],
        idle_boss(100),
    );

    assert_eq!(play_round(&mut engine), 3);
    assert_eq!(engine.heroes()[0].stats.health, 22);
}

#[test]
fn poison_ticks_on_turn_end_until_it_expires() {
    let mut engine = engine(
        vec![hero(
            "hero",
            Stats::full(30, 10),
            vec![ability(Executor::Poison, 3)],
        )],
        idle_boss(100),
    );

    play_round(&mut engine);
    assert_eq!(engine.enemy().unwrap().stats.health, 99);
    play_round(&mut engine);
    play_round(&mut engine);
    let boss = engine.enemy().unwrap();
    assert_eq!(boss.stats.health, 97);
    assert!(boss.modifiers().is_empty());
}

#[test]
fn damage_over_time_stacks_burn_down_and_merge() {
    let mut engine = engine(
        vec![hero(
            "hero",
            Stats::full(30, 10),
            vec![ability(Executor::LightUp, 3)],
        )],
        idle_boss(100),
    );

    play_round(&mut engine);
    assert_eq!(engine.enemy().unwrap().stats.health, 95);
    play_round(&mut engine);
    assert_eq!(engine.enemy().unwrap().stats.health, 91);
    play_round(&mut engine);
    assert_eq!(engine.enemy().unwrap().stats.health, 88);

    // Ready again: the fresh five stacks merge into the remaining two.
    play_round(&mut engine);
    let boss = engine.enemy().unwrap();
    assert_eq!(boss.stats.health, 81);
    assert_eq!(boss.modifiers().len(), 1);
    assert_eq!(boss.modifier("burn_light_up").map(|m| m.stacks), Some(6));
}

#[test]
fn damage_over_time_stops_after_its_last_stack() {
    let burn = Modifier::on_trigger(
        "burn_light_up",
        "Burning",
        Trigger::On(ContextKind::TurnEnd),
        Effect::None,
    )
    .with_stacks(3)
    .stackable();
    let boss = Character::new("boss", "Boss", Stats::full(50, 0), Vec::new(), vec![burn]);
    let mut engine = engine(vec![hero("hero", Stats::full(10, 0), Vec::new())], boss);

    for expected in [47, 45, 44, 44] {
        engine.end_round();
        assert_eq!(engine.enemy().unwrap().stats.health, expected);
    }
    assert!(engine.enemy().unwrap().modifiers().is_empty());
}

#[test]
fn buffs_expire_and_revert() {
    let mut engine = engine(
        vec![hero(
            "hero",
            Stats::full(30, 10),
            vec![ability(Executor::BuffAttack, 4)],
        )],
        idle_boss(100),
    );

    play_round(&mut engine);
    assert_eq!(engine.heroes()[0].stats.attack, 12);
    play_round(&mut engine);
    play_round(&mut engine);
    assert_eq!(engine.heroes()[0].stats.attack, 10);
}

#[test]
fn party_wipe_is_a_loss() {
    let boss = Character::new(
        "boss",
        "Boss",
        Stats::full(100, 50),
        vec![ability(Executor::BasicAttack, 0)],
        Vec::new(),
    );
    let mut engine = engine(vec![hero("hero", Stats::full(20, 1), Vec::new())], boss);

    play_round(&mut engine);
    assert!(engine.is_game_over());
    assert!(!engine.is_victory());
}

#[test]
fn a_hero_sharing_the_boss_id_is_rejected() {
    let mut empty = CombatEngine::default();
    let twin = hero(
        "boss",
        Stats::full(30, 5),
        vec![ability(Executor::BasicAttack, 0)],
    );
    assert_eq!(
        empty.initialize(vec![twin], Some(idle_boss(50))),
        Err(CombatError::DuplicateCharacter { id: "boss".into() })
    );
    assert!(empty.heroes().is_empty());
    assert!(empty.enemy().is_none());

    // Distinct ids route the hero's attack onto the boss.
    let knight = hero(
        "knight",
        Stats::full(30, 5),
        vec![ability(Executor::BasicAttack, 0)],
    );
    let mut engine = engine(vec![knight], idle_boss(50));
    play_round(&mut engine);
    assert_eq!(engine.enemy().unwrap().stats.health, 45);
    assert_eq!(engine.heroes()[0].stats.health, 30);
}

#[test]
fn party_size_is_capped() {
    let mut engine = CombatEngine::default();
    let heroes = (0..6)
        .map(|i| hero(&format!("h{i}"), Stats::full(10, 1), Vec::new()))
        .collect();
    assert_eq!(
        engine.initialize(heroes, Some(idle_boss(10))),
        Err(CombatError::TooManyHeroes { count: 6, max: 5 })
    );
}
