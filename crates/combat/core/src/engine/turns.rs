use tracing::{debug, info};

use crate::ability::Ability;
use crate::context::{Context, ContextKind};
use crate::error::CombatError;
use crate::populate::populate_context;

use super::{AbilityDisplay, ActionRecord, AttackMarker, CombatEngine, Phase, Side};

/// Turn scheduling methods for CombatEngine.
impl CombatEngine {
    /// Opens a round: notifies every character of turn start and enters the
    /// action phase with a fresh cursor.
    pub fn start_round(&mut self) {
        self.phase = Phase::RoundStart;
        self.round += 1;
        info!(target: "combat::engine", round = self.round, "round started");

        for character in self.characters_mut() {
            let mut ctx = Context::turn_start(character.id.clone());
            character.process_modifiers(&mut ctx);
        }

        self.phase = Phase::Action;
        self.current_hero_index = 0;
        self.boss_acted = false;
    }

    /// Resolves the next turn in the round.
    ///
    /// Heroes act in roster order, dead heroes are skipped within the same
    /// call, then the boss acts once and the round ends in that same call.
    /// Outside the action phase this is a no-op returning `Ok(None)`.
    pub fn process_next_action(&mut self) -> Result<Option<ActionRecord>, CombatError> {
        if self.phase != Phase::Action {
            return Ok(None);
        }

        while self.current_hero_index < self.heroes.len() {
            let index = self.current_hero_index;
            self.current_hero_index += 1;

            if !self.heroes[index].is_alive() {
                debug!(
                    target: "combat::engine",
                    hero = %self.heroes[index].id,
                    "skipping fallen hero"
                );
                continue;
            }
            return self.take_turn(Side::Heroes, index);
        }

        let mut record = None;
        if !self.boss_acted && self.enemy.as_ref().is_some_and(|enemy| enemy.is_alive()) {
            self.boss_acted = true;
            record = self.take_turn(Side::Enemy, 0)?;
        }
        self.end_round();
        Ok(record)
    }

    /// Closes the round: turn-end notifications, damage-over-time ticks,
    /// modifier expiry and cooldown ticks, in that order, for every character.
    pub fn end_round(&mut self) {
        self.phase = Phase::RoundEnd;

        for character in self.characters_mut() {
            let mut ctx = Context::turn_end(character.id.clone());
            character.process_modifiers(&mut ctx);
        }
        for character in self.characters_mut() {
            character.tick_damage_over_time();
        }
        for character in self.characters_mut() {
            character.tick_modifier_durations();
        }
        for character in self.characters_mut() {
            character.tick_cooldowns();
        }

        info!(
            target: "combat::engine",
            round = self.round,
            game_over = self.is_game_over(),
            victory = self.is_victory(),
            "round ended"
        );
    }

    /// Plays one character's turn. Returns `None` when the turn is skipped.
    fn take_turn(
        &mut self,
        side: Side,
        index: usize,
    ) -> Result<Option<ActionRecord>, CombatError> {
        let Some((ability_id, mut ctx)) = self.prepare_turn(side, index)? else {
            return Ok(None);
        };

        let actor = match side {
            Side::Heroes => &mut self.heroes[index],
            Side::Enemy => match self.enemy.as_mut() {
                Some(enemy) => enemy,
                None => return Ok(None),
            },
        };
        let ability_name = actor
            .ability(&ability_id)
            .map(|ability| ability.name.clone())
            .unwrap_or_default();

        // Outgoing attacks pass through the attacker's own gear first.
        if ctx.kind() == ContextKind::Attack {
            actor.process_modifiers(&mut ctx);
        }
        let modifiers = actor.use_ability(&ability_id, &ctx)?;
        let actor_id = actor.id.clone();

        debug!(
            target: "combat::engine",
            actor = %actor_id,
            %side,
            ability = %ability_id,
            kind = %ctx.kind(),
            target_id = ?ctx.target(),
            modifiers = modifiers.len(),
            "action resolved"
        );

        self.markers.show_ability(AbilityDisplay {
            character_id: actor_id.clone(),
            ability_id: ability_id.clone(),
            ability_name,
        });
        if !ctx.kind().targets_own_side()
            && let Some(target) = ctx.target()
        {
            self.markers.show_attack(AttackMarker {
                attacker_id: actor_id.clone(),
                target_id: target.clone(),
            });
        }

        for modifier in modifiers {
            self.apply_modifier(&actor_id, &ctx, modifier)?;
        }

        Ok(Some(ActionRecord {
            actor: actor_id,
            side,
            ability_id,
            kind: ctx.kind(),
            target: ctx.target().cloned(),
        }))
    }

    /// Picks an ability and populates its context without mutating anything.
    fn prepare_turn(
        &self,
        side: Side,
        index: usize,
    ) -> Result<Option<(String, Context)>, CombatError> {
        let (actor, allies, opponent) = match side {
            Side::Heroes => (
                &self.heroes[index],
                &self.heroes[..],
                self.enemy.as_ref().filter(|enemy| enemy.is_alive()),
            ),
            Side::Enemy => match self.enemy.as_ref() {
                Some(enemy) => (
                    enemy,
                    &[][..],
                    self.heroes.iter().find(|hero| hero.is_alive()),
                ),
                None => return Ok(None),
            },
        };

        if opponent.is_none() {
            debug!(
                target: "combat::engine",
                actor = %actor.id,
                %side,
                "no living opponent, turn skipped"
            );
            return Ok(None);
        }

        let Some(ability) = select_ability(actor.abilities()) else {
            debug!(
                target: "combat::engine",
                actor = %actor.id,
                %side,
                "no ability ready, turn skipped"
            );
            return Ok(None);
        };
        debug!(
            target: "combat::engine",
            actor = %actor.id,
            ability = %ability.id,
            cooldown = ability.cooldown,
            "ability selected"
        );

        let ctx = populate_context(ability, actor, None, allies, opponent, &self.config)?;
        Ok(Some((ability.id.clone(), ctx)))
    }
}

/// Ready ability with the highest cooldown; ties keep definition order.
fn select_ability(abilities: &[Ability]) -> Option<&Ability> {
    abilities
        .iter()
        .filter(|ability| ability.is_ready())
        .fold(None, |best: Option<&Ability>, ability| match best {
            Some(best) if best.cooldown >= ability.cooldown => Some(best),
            _ => Some(ability),
        })
}
