//! Movement module: headless резолв movement intents
//!
//! Не pathfinding и не физика: прямолинейное движение по плоскости и поворот
//! с фиксированной угловой скоростью. Хост с настоящей навигацией заменяет
//! эти системы своими, читая те же MovementCommand / MovementState.

pub mod systems;

use bevy::prelude::*;

use crate::SimulationSet;

pub use systems::{apply_movement_intents, integrate_movement};

/// Movement Plugin
///
/// Intents применяются вместе с остальными резолверами, интеграция позиций:
/// последней, после всех решений тика.
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, apply_movement_intents.in_set(SimulationSet::Resolve))
            .add_systems(FixedUpdate, integrate_movement.in_set(SimulationSet::Integrate));
    }
}
