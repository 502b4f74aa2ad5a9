//! Cooldown-gated abilities.

mod executor;

pub use executor::{Executor, Invocation};

use crate::character::CharacterId;
use crate::context::{Context, ContextKind};
use crate::error::CombatError;
use crate::modifier::Modifier;

/// A named action owned by one character.
///
/// Each character gets its own instance so cooldowns are tracked per owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ability {
    pub id: String,
    pub name: String,
    pub description: String,
    pub context_kind: ContextKind,
    pub cooldown: u32,
    current_cooldown: u32,
    executor: Executor,
    invocations: u64,
}

impl Ability {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        context_kind: ContextKind,
        cooldown: u32,
        executor: Executor,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            context_kind,
            cooldown,
            current_cooldown: 0,
            executor,
            invocations: 0,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn executor(&self) -> Executor {
        self.executor
    }

    pub fn current_cooldown(&self) -> u32 {
        self.current_cooldown
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    /// Executes the ability and starts its cooldown.
    ///
    /// Nothing changes when the ability is not ready or the context has the
    /// wrong shape.
    pub fn activate(
        &mut self,
        ctx: &Context,
        source: &CharacterId,
    ) -> Result<Vec<Modifier>, CombatError> {
        if !self.is_ready() {
            return Err(CombatError::OnCooldown {
                ability: self.id.clone(),
                remaining: self.current_cooldown,
            });
        }
        if ctx.kind() != self.context_kind {
            return Err(CombatError::ContextMismatch {
                ability: self.id.clone(),
                expected: self.context_kind,
                found: ctx.kind(),
            });
        }

        let invocation = Invocation {
            ability_id: self.id.clone(),
            source: source.clone(),
            serial: self.invocations,
        };
        let modifiers = self.executor.execute(ctx, &invocation)?;

        self.invocations += 1;
        self.current_cooldown = self.cooldown;
        Ok(modifiers)
    }

    /// Decrements the remaining cooldown, floored at 0.
    pub fn tick_cooldown(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heal_ctx() -> Context {
        Context::Heal {
            target: "hero".into(),
            amount: 10,
        }
    }

    #[test]
    fn cooldown_round_trip() {
        let mut heal = Ability::new("heal", "Heal", ContextKind::Heal, 3, Executor::Heal);
        let source = CharacterId::from("hero");

        heal.activate(&heal_ctx(), &source).unwrap();
        assert_eq!(heal.current_cooldown(), 3);
        assert!(!heal.is_ready());

        for _ in 0..3 {
            heal.tick_cooldown();
        }
        assert!(heal.is_ready());

        heal.tick_cooldown();
        assert_eq!(heal.current_cooldown(), 0);
    }

    #[test]
    fn using_a_cooling_ability_fails_loudly() {
        let mut heal = Ability::new("heal", "Heal", ContextKind::Heal, 3, Executor::Heal);
        let source = CharacterId::from("hero");
        heal.activate(&heal_ctx(), &source).unwrap();

        let err = heal.activate(&heal_ctx(), &source).unwrap_err();
        assert_eq!(
            err,
            CombatError::OnCooldown {
                ability: "heal".into(),
                remaining: 3
            }
        );
    }

    #[test]
    fn mismatched_context_leaves_cooldown_untouched() {
        let mut strike = Ability::new(
            "power_attack",
            "Power Attack",
            ContextKind::Attack,
            2,
            Executor::PowerAttack,
        );
        let result = strike.activate(&heal_ctx(), &CharacterId::from("hero"));
        assert!(matches!(result, Err(CombatError::ContextMismatch { .. })));
        assert!(strike.is_ready());
    }

    #[test]
    fn invocations_produce_distinct_modifier_ids() {
        let mut strike = Ability::new(
            "basic_attack",
            "Basic Attack",
            ContextKind::Attack,
            0,
            Executor::BasicAttack,
        );
        let ctx = Context::Attack {
            target: "boss".into(),
            damage: 3,
        };
        let source = CharacterId::from("hero");
        let first = strike.activate(&ctx, &source).unwrap();
        let second = strike.activate(&ctx, &source).unwrap();
        assert_eq!(first[0].id, "basic_attack_hero_0");
        assert_eq!(second[0].id, "basic_attack_hero_1");
    }
}
