//! Ability catalogue.
//!
//! Definitions are static data. Every character receives fresh [`Ability`]
//! instances from [`AbilityRegistry::instantiate`] so cooldowns stay per owner.

use std::collections::HashMap;

use combat_core::{Ability, ContextKind, Executor};

use crate::error::ContentError;

/// One catalogue entry as it appears in data files.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Context tag such as `attack` or `debuff`.
    pub context: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    /// Explicit executor. When absent it is resolved from `id`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub executor: Option<Executor>,
}

impl AbilityDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        context: impl Into<String>,
        cooldown: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            context: context.into(),
            cooldown,
            executor: None,
        }
    }

    #[must_use]
    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = Some(executor);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Clone, Debug)]
struct AbilityTemplate {
    definition: AbilityDefinition,
    context_kind: ContextKind,
    executor: Executor,
}

/// Validated ability catalogue keyed by ability id.
#[derive(Clone, Debug, Default)]
pub struct AbilityRegistry {
    templates: HashMap<String, AbilityTemplate>,
    order: Vec<String>,
}

impl AbilityRegistry {
    /// Builds a registry, resolving each definition's executor and context.
    ///
    /// Fails on duplicate ids, definitions with no resolvable executor, and
    /// executors that cannot read the declared context kind.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = AbilityDefinition>,
    ) -> Result<Self, ContentError> {
        let mut registry = Self::default();
        for definition in definitions {
            if registry.templates.contains_key(&definition.id) {
                return Err(ContentError::DuplicateAbility { id: definition.id });
            }

            let executor = definition
                .executor
                .or_else(|| definition.id.parse::<Executor>().ok())
                .ok_or_else(|| ContentError::MissingExecutor {
                    id: definition.id.clone(),
                })?;
            let context_kind = ContextKind::from_tag(&definition.context);
            if executor.context_kind() != context_kind {
                return Err(ContentError::ExecutorContextMismatch {
                    id: definition.id,
                    executor,
                    context: context_kind,
                    expected: executor.context_kind(),
                });
            }

            registry.order.push(definition.id.clone());
            registry.templates.insert(
                definition.id.clone(),
                AbilityTemplate {
                    definition,
                    context_kind,
                    executor,
                },
            );
        }
        Ok(registry)
    }

    pub fn get(&self, id: &str) -> Option<&AbilityDefinition> {
        self.templates.get(id).map(|template| &template.definition)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Ability ids in catalogue order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// A fresh, ready ability instance.
    pub fn instantiate(&self, id: &str) -> Result<Ability, ContentError> {
        let template = self
            .templates
            .get(id)
            .ok_or_else(|| ContentError::UnknownAbility { id: id.to_owned() })?;
        let definition = &template.definition;
        Ok(Ability::new(
            definition.id.clone(),
            definition.name.clone(),
            template.context_kind,
            definition.cooldown,
            template.executor,
        )
        .with_description(definition.description.clone()))
    }

    /// Instantiates every id in order, failing on the first unknown one.
    pub fn instantiate_all<I, S>(&self, ids: I) -> Result<Vec<Ability>, ContentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .map(|id| self.instantiate(id.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> AbilityRegistry {
        AbilityRegistry::from_definitions([
            AbilityDefinition::new("basic_attack", "Basic Attack", "attack", 0),
            AbilityDefinition::new("heal", "Heal", "heal", 3),
            AbilityDefinition::new("smite", "Smite", "attack", 2)
                .with_executor(Executor::PowerAttack),
        ])
        .unwrap()
    }

    #[test]
    fn executors_resolve_from_ids_or_explicit_names() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.instantiate("heal").unwrap().executor(),
            Executor::Heal
        );
        assert_eq!(
            registry.instantiate("smite").unwrap().executor(),
            Executor::PowerAttack
        );
        assert_eq!(
            registry.ids().collect::<Vec<_>>(),
            ["basic_attack", "heal", "smite"]
        );
    }

    #[test]
    fn instances_are_independent() {
        let registry = registry();
        let abilities = registry.instantiate_all(["heal", "heal"]).unwrap();
        assert_eq!(abilities.len(), 2);
        assert!(abilities.iter().all(Ability::is_ready));
        assert_eq!(abilities[0].cooldown, 3);
        assert_eq!(abilities[0].context_kind, ContextKind::Heal);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let err = registry().instantiate_all(["basic_attack", "fireball"]).unwrap_err();
        assert_eq!(
            err,
            ContentError::UnknownAbility {
                id: "fireball".into()
            }
        );
    }

    #[test]
    fn invalid_catalogues_are_rejected() {
        let duplicate = AbilityRegistry::from_definitions([
            AbilityDefinition::new("heal", "Heal", "heal", 3),
            AbilityDefinition::new("heal", "Heal", "heal", 3),
        ]);
        assert_eq!(
            duplicate.unwrap_err(),
            ContentError::DuplicateAbility { id: "heal".into() }
        );

        let dance = AbilityDefinition::new("dance", "Dance", "buff", 1);
        let orphan = AbilityRegistry::from_definitions([dance]);
        assert_eq!(
            orphan.unwrap_err(),
            ContentError::MissingExecutor { id: "dance".into() }
        );

        let heal = AbilityDefinition::new("heal", "Heal", "attack", 3);
        let mismatch = AbilityRegistry::from_definitions([heal]);
        assert!(matches!(
            mismatch.unwrap_err(),
            ContentError::ExecutorContextMismatch { .. }
        ));
    }
}
