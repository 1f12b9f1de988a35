//! Equipment module: резолв equip/switch intents и расход боеприпасов
//!
//! # Systems
//! - `process_equip_intents`: Equip { prefer_missile } / SwitchToMelee
//! - `consume_missile_ammo`: каждая Missile атака тратит один боеприпас

pub mod systems;

use bevy::prelude::*;

use crate::SimulationSet;

pub use systems::{consume_missile_ammo, process_equip_intents};

pub struct EquipmentPlugin;

impl Plugin for EquipmentPlugin {
    fn build(&self, app: &mut App) {
        // Обе системы пишут Loadout: порядок фиксирован
        app.add_systems(
            FixedUpdate,
            (consume_missile_ammo, process_equip_intents)
                .chain()
                .in_set(SimulationSet::Resolve),
        );
    }
}
