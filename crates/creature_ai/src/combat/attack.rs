//! Attack резолв: CreatureIntent::Attack → урон
//!
//! AI tick уже проверил range/facing и запустил cooldown. Здесь только
//! применяем плоский урон и генерируем события для остальных систем.

use bevy::prelude::*;

use crate::ai::CreatureIntent;
use crate::components::{AttackType, Health};

/// Событие: урон нанесен
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub attack_type: AttackType,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв. Трупы остаются на месте.
#[derive(Component, Debug)]
pub struct Dead;

/// System: применить атаки из AI intents
pub fn resolve_attack_intents(
    mut commands: Commands,
    mut intents: EventReader<CreatureIntent>,
    mut targets: Query<&mut Health>,
    mut damage_events: EventWriter<DamageDealt>,
    mut death_events: EventWriter<EntityDied>,
) {
    for intent in intents.read() {
        let CreatureIntent::Attack {
            attacker,
            target,
            attack_type,
            damage,
        } = *intent
        else {
            continue;
        };

        if attacker == target {
            crate::log_error(&format!("⚠️ {:?} tried to attack itself, skipping", attacker));
            continue;
        }

        let Ok(mut health) = targets.get_mut(target) else {
            crate::log_error(&format!("Attack target {:?} has no Health", target));
            continue;
        };

        if !health.is_alive() {
            continue;
        }

        let actual_damage = damage.min(health.current);
        health.take_damage(actual_damage);

        damage_events.write(DamageDealt {
            attacker,
            target,
            damage: actual_damage,
            attack_type,
        });

        crate::log(&format!(
            "💥 {:?} hit {:?} with {:?} for {} (HP: {} → {})",
            attacker,
            target,
            attack_type,
            actual_damage,
            health.current + actual_damage,
            health.current
        ));

        if !health.is_alive() {
            commands.entity(target).insert(Dead);
            death_events.write(EntityDied {
                entity: target,
                killer: Some(attacker),
            });
            crate::log_info(&format!("💀 {:?} killed by {:?}", target, attacker));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_kills_and_marks_dead() {
        let mut app = App::new();
        app.add_event::<CreatureIntent>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_systems(Update, resolve_attack_intents);

        let attacker = app.world_mut().spawn(Health::new(100)).id();
        let target = app.world_mut().spawn(Health::new(15)).id();

        for _ in 0..2 {
            app.world_mut().send_event(CreatureIntent::Attack {
                attacker,
                target,
                attack_type: AttackType::Melee,
                damage: 10,
            });
        }
        app.update();

        let health = app.world().get::<Health>(target).map(|h| h.current);
        assert_eq!(health, Some(0));
        assert!(app.world().get::<Dead>(target).is_some());

        let deaths = app.world().resource::<Events<EntityDied>>();
        assert_eq!(deaths.len(), 1);
    }
}
