use tracing::{debug, warn};

use crate::character::{Character, CharacterId};
use crate::context::Context;
use crate::error::CombatError;
use crate::modifier::Modifier;

use super::{CombatEngine, Side};

impl CombatEngine {
    /// Routes a modifier produced by `source` under `ctx` to its destination.
    ///
    /// Helpful contexts land on the source's own side, hostile ones on the
    /// opposing side. Among heroes the context's declared target wins if it
    /// is alive, otherwise the first living hero. The destination may reshape
    /// the modifier before it is applied once or attached.
    pub fn apply_modifier(
        &mut self,
        source: &CharacterId,
        ctx: &Context,
        modifier: Modifier,
    ) -> Result<(), CombatError> {
        let source_side = self
            .side_of(source)
            .ok_or_else(|| CombatError::CharacterNotFound(source.clone()))?;
        let destination_side = if ctx.kind().targets_own_side() {
            source_side
        } else {
            source_side.opponent()
        };

        let Some(destination) = self.destination(destination_side, ctx.target()) else {
            warn!(
                target: "combat::engine",
                source = %source,
                modifier = %modifier.id,
                side = %destination_side,
                "no living destination, modifier dropped"
            );
            return Ok(());
        };

        let mut ctx = ctx.clone();
        let modifier = destination.process_modifiers_on_modifier(modifier, &ctx);
        debug!(
            target: "combat::engine",
            source = %source,
            destination = %destination.id,
            modifier = %modifier.id,
            modifier_type = %modifier.modifier_type,
            "routing modifier"
        );

        if modifier.is_one_time() {
            modifier.apply(&mut ctx, destination);
        } else if modifier.is_permanent() {
            destination.attach_permanent(modifier, &mut ctx);
        } else {
            destination.add_modifier(modifier);
        }
        Ok(())
    }

    fn destination(
        &mut self,
        side: Side,
        preferred: Option<&CharacterId>,
    ) -> Option<&mut Character> {
        match side {
            Side::Enemy => self.enemy.as_mut().filter(|enemy| enemy.is_alive()),
            Side::Heroes => {
                let index = preferred
                    .and_then(|id| {
                        self.heroes
                            .iter()
                            .position(|hero| &hero.id == id && hero.is_alive())
                    })
                    .or_else(|| self.heroes.iter().position(Character::is_alive))?;
                self.heroes.get_mut(index)
            }
        }
    }
}
