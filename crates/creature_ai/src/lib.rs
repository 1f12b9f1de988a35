//! Creature AI Simulation Core
//!
//! Per-creature decision loop на Bevy 0.16 (headless ECS):
//! - ai: tick scheduler с desync, дерево решений, MonsterState guard
//! - combat / equipment / movement: headless коллабораторы, исполняющие intents
//!
//! Tick → CreatureIntent → резолверы → awareness → интеграция движения,
//! всё в FixedUpdate для детерминизма.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod equipment;
pub mod logger;
pub mod movement;

// Re-export базовых типов для удобства
pub use ai::{AiConfig, CreatureAi, CreatureAiPlugin, CreatureIntent, CreatureKind, MonsterState, TickOutcome};
pub use combat::{CombatPlugin, DamageDealt, Dead, EntityDied};
pub use components::*;
pub use equipment::EquipmentPlugin;
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use movement::MovementPlugin;

/// Фазы FixedUpdate тика симуляции (строго последовательно)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// AI тики существ → CreatureIntent
    Decide,
    /// Исполнение intents: атаки, экипировка, movement команды
    Resolve,
    /// Пробуждение спящих (урон, alert, aggro)
    Awareness,
    /// Интеграция поворотов и перемещений
    Integrate,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Decide,
                    SimulationSet::Resolve,
                    SimulationSet::Awareness,
                    SimulationSet::Integrate,
                )
                    .chain(),
            )
            .add_plugins((CreatureAiPlugin, CombatPlugin, EquipmentPlugin, MovementPlugin));

        // create_headless_app мог уже вставить RNG со своим seed
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
