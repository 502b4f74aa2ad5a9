//! Equipment (hat) catalogue.
//!
//! A hat grants a flat stat bonus plus one passive `OnTrigger` modifier with a
//! fixed id, so re-equipping never stacks two copies of the same passive.

use std::collections::HashMap;

use combat_core::{Effect, Modifier, Stats, Trigger};

use crate::error::ContentError;

/// Flat stat bonus granted while a hat is worn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct StatBonus {
    pub attack: i32,
    pub max_health: i32,
}

impl StatBonus {
    pub fn apply_to(self, stats: Stats) -> Stats {
        let max_health = stats.max_health + self.max_health;
        Stats::new(max_health, max_health, stats.attack + self.attack)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HatDefinition {
    pub hat_id: u32,
    pub modifier_id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub trigger: Trigger,
    pub effect: Effect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus: StatBonus,
}

impl HatDefinition {
    /// The hat's passive, ready to attach.
    pub fn modifier(&self) -> Modifier {
        Modifier::on_trigger(
            self.modifier_id.clone(),
            self.name.clone(),
            self.trigger,
            self.effect.clone(),
        )
        .with_description(self.description.clone())
    }
}

#[derive(Clone, Debug, Default)]
pub struct EquipmentRegistry {
    hats: HashMap<u32, HatDefinition>,
}

impl EquipmentRegistry {
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = HatDefinition>,
    ) -> Result<Self, ContentError> {
        let mut hats = HashMap::new();
        for hat in definitions {
            let hat_id = hat.hat_id;
            if hats.insert(hat_id, hat).is_some() {
                return Err(ContentError::DuplicateEquipment { hat_id });
            }
        }
        Ok(Self { hats })
    }

    pub fn get(&self, hat_id: u32) -> Result<&HatDefinition, ContentError> {
        self.hats
            .get(&hat_id)
            .ok_or(ContentError::UnknownEquipment { hat_id })
    }

    pub fn modifier(&self, hat_id: u32) -> Result<Modifier, ContentError> {
        self.get(hat_id).map(HatDefinition::modifier)
    }

    pub fn bonus(&self, hat_id: u32) -> Result<StatBonus, ContentError> {
        self.get(hat_id).map(|hat| hat.bonus)
    }

    pub fn len(&self) -> usize {
        self.hats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hats.is_empty()
    }

    /// Recomputes stats for a character switching to `hat_id`.
    ///
    /// Starts from `base` at full health and adds the new hat's bonus, so the
    /// previous hat's bonus is dropped. A wounded character keeps its current
    /// health, capped at the new max.
    pub fn restat(
        &self,
        base: Stats,
        current: Stats,
        hat_id: Option<u32>,
    ) -> Result<Stats, ContentError> {
        let bonus = hat_id.map(|id| self.bonus(id)).transpose()?.unwrap_or_default();
        let mut stats = bonus.apply_to(base);
        if !current.is_full_health() {
            stats.health = current.health.min(stats.max_health);
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::ContextKind;

    fn registry() -> EquipmentRegistry {
        EquipmentRegistry::from_definitions([
            HatDefinition {
                hat_id: 1,
                modifier_id: "hat_wizard".into(),
                name: "Wizard Hat".into(),
                description: "+3 Attack + Double Damage".into(),
                trigger: Trigger::On(ContextKind::Attack),
                effect: Effect::MultiplyDamage { factor: 2 },
                bonus: StatBonus {
                    attack: 3,
                    max_health: 0,
                },
            },
            HatDefinition {
                hat_id: 14,
                modifier_id: "hat_hard_hat".into(),
                name: "Hard Hat".into(),
                description: "+30 Max Health + -5 Damage taken".into(),
                trigger: Trigger::On(ContextKind::Damage),
                effect: Effect::ReduceDamage { amount: 5 },
                bonus: StatBonus {
                    attack: 0,
                    max_health: 30,
                },
            },
        ])
        .unwrap()
    }

    #[test]
    fn hats_build_fixed_id_passives() {
        let modifier = registry().modifier(1).unwrap();
        assert_eq!(modifier.id, "hat_wizard");
        assert!(!modifier.is_one_time());
        assert_eq!(modifier.trigger, Trigger::On(ContextKind::Attack));
        assert_eq!(modifier.description, "+3 Attack + Double Damage");
    }

    #[test]
    fn unknown_hats_are_rejected() {
        assert_eq!(
            registry().modifier(42).unwrap_err(),
            ContentError::UnknownEquipment { hat_id: 42 }
        );
    }

    #[test]
    fn restat_replaces_the_previous_bonus() {
        let registry = registry();
        let base = Stats::full(20, 3);
        let wizard = registry.restat(base, base, Some(1)).unwrap();
        assert_eq!(wizard, Stats::full(20, 6));

        let hard_hat = registry.restat(base, wizard, Some(14)).unwrap();
        assert_eq!(hard_hat, Stats::full(50, 3));
    }

    #[test]
    fn restat_does_not_heal_the_wounded() {
        let registry = registry();
        let base = Stats::full(20, 3);
        let wounded = Stats::new(7, 20, 3);
        assert_eq!(
            registry.restat(base, wounded, Some(14)).unwrap(),
            Stats::new(7, 50, 3)
        );

        let bare = registry.restat(base, Stats::new(45, 50, 3), None).unwrap();
        assert_eq!(bare, Stats::new(20, 20, 3));
    }

    #[test]
    fn duplicate_hat_ids_are_rejected() {
        let hat = registry().get(1).unwrap().clone();
        let err = EquipmentRegistry::from_definitions([hat.clone(), hat]).unwrap_err();
        assert_eq!(err, ContentError::DuplicateEquipment { hat_id: 1 });
    }
}
