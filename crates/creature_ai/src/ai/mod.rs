//! AI decision-making module
//!
//! Per-creature decision loop: tick scheduler с desync, дерево решений и
//! MonsterState guard. Логика тика: чистая функция над `CreatureWorld`,
//! ECS-привязка: в `ecs_world` + `systems`.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod config;
pub mod creature;
pub mod decision;
pub mod ecs_world;
pub mod events;
pub mod schedule;
pub mod state;
pub mod systems;
pub mod variants;
pub mod world;

#[cfg(test)]
mod test_support;


// Re-export основных типов
pub use config::AiConfig;
pub use creature::{Activation, CreatureAi, CreatureKind};
pub use decision::{monster_tick, TickOutcome};
pub use ecs_world::{Bodies, EcsCreatureWorld, OwnComponents};
pub use events::CreatureIntent;
pub use schedule::{CheckClock, TickSchedule};
pub use state::{MonsterState, MonsterTransition};
pub use world::{CreatureWorld, TargetStatus};

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. creature_ai_tick: решения (SimulationSet::Decide)
/// 2. check_monsters / draw_aggro / wake_on_damage / alert_nearby_creatures:
///    пробуждение спящих (SimulationSet::Awareness, после резолва атак)
pub struct CreatureAiPlugin;

impl Plugin for CreatureAiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AiConfig>()
            .add_event::<CreatureIntent>()
            .add_systems(FixedUpdate, systems::creature_ai_tick.in_set(SimulationSet::Decide))
            .add_systems(
                FixedUpdate,
                (
                    systems::check_monsters,
                    systems::draw_aggro,
                    systems::wake_on_damage,
                    systems::alert_nearby_creatures,
                )
                    .chain() // Все пишут CreatureAi
                    .in_set(SimulationSet::Awareness),
            );
    }
}
