//! Equipment system implementations

use bevy::prelude::*;

use crate::ai::CreatureIntent;
use crate::components::{AttackType, Loadout};

/// Process equip intents от AI tick
pub fn process_equip_intents(
    mut intents: EventReader<CreatureIntent>,
    mut loadouts: Query<&mut Loadout>,
) {
    for intent in intents.read() {
        match *intent {
            CreatureIntent::Equip { creature, prefer_missile } => {
                let Ok(mut loadout) = loadouts.get_mut(creature) else {
                    crate::log_error(&format!("Entity {:?} missing Loadout", creature));
                    continue;
                };

                if loadout.equip_from_inventory(prefer_missile) {
                    crate::log(&format!(
                        "🗡️ {:?} equipped {:?}",
                        creature,
                        loadout.equipped.as_ref().map(|w| w.name.as_str())
                    ));
                } else {
                    crate::log(&format!("{:?} has nothing to equip", creature));
                }
            }
            CreatureIntent::SwitchToMelee { creature } => {
                let Ok(mut loadout) = loadouts.get_mut(creature) else {
                    crate::log_error(&format!("Entity {:?} missing Loadout", creature));
                    continue;
                };

                loadout.switch_to_melee();
                crate::log(&format!(
                    "{:?} switched to melee ({:?})",
                    creature,
                    loadout.equipped.as_ref().map(|w| w.name.as_str())
                ));
            }
            _ => {}
        }
    }
}

/// System: расход ammo на missile атаках
pub fn consume_missile_ammo(
    mut intents: EventReader<CreatureIntent>,
    mut loadouts: Query<&mut Loadout>,
) {
    for intent in intents.read() {
        let CreatureIntent::Attack {
            attacker,
            attack_type: AttackType::Missile,
            ..
        } = *intent
        else {
            continue;
        };

        let Ok(mut loadout) = loadouts.get_mut(attacker) else {
            continue;
        };

        if let Some(launcher) = loadout.equipped.as_mut().filter(|w| w.is_launcher()) {
            launcher.ammo = launcher.ammo.saturating_sub(1);
            if launcher.ammo == 0 {
                crate::log(&format!("🏹 {:?} ran out of ammo", attacker));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Weapon;

    fn app_with_equipment_systems() -> App {
        let mut app = App::new();
        app.add_event::<CreatureIntent>()
            .add_systems(Update, (process_equip_intents, consume_missile_ammo));
        app
    }

    #[test]
    fn test_missile_attack_consumes_ammo() {
        let mut app = app_with_equipment_systems();
        let archer = app
            .world_mut()
            .spawn(Loadout {
                equipped: Some(Weapon::launcher("shortbow", 25.0, 1)),
                inventory: vec![Weapon::melee("dagger", 1.5)],
            })
            .id();

        app.world_mut().send_event(CreatureIntent::Attack {
            attacker: archer,
            target: Entity::PLACEHOLDER,
            attack_type: AttackType::Missile,
            damage: 5,
        });
        app.update();

        let loadout = app.world().get::<Loadout>(archer).cloned().unwrap_or_default();
        assert_eq!(loadout.equipped.map(|w| w.ammo), Some(0));
    }

    #[test]
    fn test_switch_to_melee_intent() {
        let mut app = app_with_equipment_systems();
        let archer = app
            .world_mut()
            .spawn(Loadout {
                equipped: Some(Weapon::launcher("shortbow", 25.0, 0)),
                inventory: vec![Weapon::melee("dagger", 1.5)],
            })
            .id();

        app.world_mut().send_event(CreatureIntent::SwitchToMelee { creature: archer });
        app.update();

        let loadout = app.world().get::<Loadout>(archer).cloned().unwrap_or_default();
        assert_eq!(loadout.equipped.map(|w| w.name), Some("dagger".to_string()));
    }
}
