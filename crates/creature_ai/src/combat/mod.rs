//! Combat module: выбор attack type + резолв атак
//!
//! ECS ответственность:
//! - selection: weighted выбор attack type, max effective range
//! - attack: CreatureIntent::Attack → Health, DamageDealt / EntityDied
//!
//! Формулы урона: не здесь: атака наносит плоский `damage` из intent.

pub mod attack;
pub mod selection;


use bevy::prelude::*;

use crate::SimulationSet;

pub use attack::{resolve_attack_intents, DamageDealt, Dead, EntityDied};
pub use selection::{attack_max_range, select_attack_type};

/// Combat Plugin
///
/// Регистрирует combat события и резолв атак в FixedUpdate (SimulationSet::Resolve).
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_systems(FixedUpdate, resolve_attack_intents.in_set(SimulationSet::Resolve));
    }
}
