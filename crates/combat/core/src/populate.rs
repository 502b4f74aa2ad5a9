//! Builds the typed context for one ability invocation.

use crate::ability::Ability;
use crate::character::Character;
use crate::config::CombatConfig;
use crate::context::{Context, ContextKind};
use crate::error::CombatError;
use crate::stats::StatKind;

/// Synthesizes the context `ability` produces when `actor` uses it.
///
/// `target` overrides the default target. Otherwise helpful contexts fall back
/// to the first living ally (or the actor) and hostile ones to `opponent`.
/// Hostile contexts without any resolvable target fail with
/// [`CombatError::MissingTarget`]. Pure: nothing is mutated.
pub fn populate_context(
    ability: &Ability,
    actor: &Character,
    target: Option<&Character>,
    allies: &[Character],
    opponent: Option<&Character>,
    config: &CombatConfig,
) -> Result<Context, CombatError> {
    let stats = &actor.stats;

    let friendly = || {
        target
            .or_else(|| allies.iter().find(|ally| ally.is_alive()))
            .unwrap_or(actor)
            .id
            .clone()
    };
    let hostile = || {
        target
            .or(opponent)
            .map(|character| character.id.clone())
            .ok_or_else(|| CombatError::MissingTarget {
                ability: ability.id.clone(),
                kind: ability.context_kind,
            })
    };

    let ctx = match ability.context_kind {
        ContextKind::Attack => Context::Attack {
            target: hostile()?,
            damage: stats.attack,
        },
        ContextKind::Heal => Context::Heal {
            target: friendly(),
            amount: CombatConfig::portion(stats.max_health, config.heal_ratio_percent),
        },
        ContextKind::Buff => Context::Buff {
            target: friendly(),
            stat: StatKind::Attack,
            value: CombatConfig::portion(stats.attack, config.buff_ratio_percent),
            duration: Some(config.status_duration),
        },
        ContextKind::Debuff => Context::Debuff {
            target: hostile()?,
            stat: StatKind::Attack,
            value: CombatConfig::portion(stats.attack, config.debuff_ratio_percent),
            duration: Some(config.status_duration),
        },
        ContextKind::Damage => Context::Damage {
            target: hostile()?,
            damage: stats.attack,
            source: actor.id.clone(),
        },
        ContextKind::TurnStart => Context::turn_start(actor.id.clone()),
        ContextKind::TurnEnd => Context::turn_end(actor.id.clone()),
    };
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::Executor;
    use crate::stats::Stats;

    fn ability(kind: ContextKind) -> Ability {
        Ability::new("probe", "Probe", kind, 0, Executor::BasicAttack)
    }

    fn character(id: &str, health: i32, max_health: i32, attack: i32) -> Character {
        Character::new(
            id,
            id,
            Stats::new(health, max_health, attack),
            Vec::new(),
            Vec::new(),
        )
    }

    #[test]
    fn attack_targets_opponent_with_actor_attack() {
        let actor = character("hero", 30, 30, 12);
        let boss = character("boss", 100, 100, 10);
        let ctx = populate_context(
            &ability(ContextKind::Attack),
            &actor,
            None,
            &[],
            Some(&boss),
            &CombatConfig::default(),
        )
        .unwrap();
        assert_eq!(
            ctx,
            Context::Attack {
                target: "boss".into(),
                damage: 12
            }
        );
    }

    #[test]
    fn heal_prefers_first_living_ally() {
        let fallen = character("fallen", 0, 30, 1);
        let tank = character("tank", 10, 40, 1);
        let actor = character("cleric", 30, 47, 4);
        let allies = [fallen, tank, actor.clone()];

        let ctx = populate_context(
            &ability(ContextKind::Heal),
            &actor,
            None,
            &allies,
            None,
            &CombatConfig::default(),
        )
        .unwrap();
        assert_eq!(
            ctx,
            Context::Heal {
                target: "tank".into(),
                amount: 9
            }
        );
    }

    #[test]
    fn buff_without_allies_targets_self() {
        let actor = character("boss", 100, 100, 14);
        let ctx = populate_context(
            &ability(ContextKind::Buff),
            &actor,
            None,
            &[],
            None,
            &CombatConfig::default(),
        )
        .unwrap();
        assert_eq!(
            ctx,
            Context::Buff {
                target: "boss".into(),
                stat: StatKind::Attack,
                value: 2,
                duration: Some(3)
            }
        );
    }

    #[test]
    fn hostile_contexts_fail_without_target() {
        let actor = character("hero", 30, 30, 5);
        for kind in [ContextKind::Attack, ContextKind::Debuff, ContextKind::Damage] {
            let err = populate_context(
                &ability(kind),
                &actor,
                None,
                &[],
                None,
                &CombatConfig::default(),
            )
            .unwrap_err();
            assert_eq!(
                err,
                CombatError::MissingTarget {
                    ability: "probe".into(),
                    kind
                }
            );
        }
    }

    #[test]
    fn damage_records_source_and_explicit_target_wins() {
        let actor = character("hero", 30, 30, 5);
        let boss = character("boss", 100, 100, 10);
        let decoy = character("decoy", 5, 5, 0);
        let ctx = populate_context(
            &ability(ContextKind::Damage),
            &actor,
            Some(&decoy),
            &[],
            Some(&boss),
            &CombatConfig::default(),
        )
        .unwrap();
        assert_eq!(
            ctx,
            Context::Damage {
                target: "decoy".into(),
                damage: 5,
                source: "hero".into()
            }
        );
    }
}
