//! AI systems: driver (creature_ai_tick) + awareness (пробуждение)
//!
//! Driver тикает только существ, у которых `now >= next_tick_time`, по одному за
//! раз внутри системы: это и есть single-writer-per-entity.
//! Awareness системы: внешние коллабораторы: будят спящих и оставляют aggro
//! hint, но цель выбирает только тик самого существа.

use bevy::prelude::*;

use crate::combat::DamageDealt;
use crate::components::{
    Actor, Alerter, Attacker, Emote, FactionMob, Health, HomePosition, Loadout, MotionStance, MovementState,
};
use crate::DeterministicRng;
use super::config::AiConfig;
use super::creature::CreatureAi;
use super::decision::monster_tick;
use super::ecs_world::{Bodies, EcsCreatureWorld, OwnComponents};
use super::events::CreatureIntent;

/// System: AI tick для всех существ, чьё время пришло
pub fn creature_ai_tick(
    mut creatures: Query<(
        Entity,
        &mut CreatureAi,
        &mut MotionStance,
        &mut Attacker,
        &MovementState,
        Option<&Loadout>,
        &HomePosition,
        Option<&Emote>,
        Has<FactionMob>,
    )>,
    bodies: Bodies<'_, '_>,
    config: Res<AiConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut intent_events: EventWriter<CreatureIntent>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs_f64();
    let mut intents = Vec::new();

    for (entity, mut ai, mut stance, mut attacker, movement, loadout, home, emote, faction_mob) in
        creatures.iter_mut()
    {
        if !ai.schedule.is_due(now) {
            continue;
        }

        let own = OwnComponents {
            stance: &mut *stance,
            attacker: &mut *attacker,
            movement,
            loadout,
            home: home.0,
            emote,
            faction_mob,
        };
        let mut world = EcsCreatureWorld::new(entity, own, &bodies, &config, now, &mut rng.rng, &mut intents);

        monster_tick(entity, &mut ai, &mut world, now, &config);
    }

    for intent in intents {
        intent_events.write(intent);
    }
}

/// Живой враг `observer`'а в радиусе
fn hostile_nearby(bodies: &Bodies<'_, '_>, observer: Entity, range: f32) -> bool {
    let Ok((_, observer_actor, _, observer_transform)) = bodies.get(observer) else {
        return false;
    };

    bodies.iter().any(|(other, actor, health, transform)| {
        other != observer
            && health.is_alive()
            && observer_actor.is_hostile_to(actor)
            && observer_transform.translation.distance(transform.translation) <= range
    })
}

/// System: CheckMonsters: спящий faction mob просыпается, если рядом враг
pub fn check_monsters(
    mut intents: EventReader<CreatureIntent>,
    mut creatures: Query<&mut CreatureAi>,
    bodies: Bodies<'_, '_>,
    config: Res<AiConfig>,
) {
    for intent in intents.read() {
        let CreatureIntent::CheckMonsters { creature } = *intent else {
            continue;
        };

        if !hostile_nearby(&bodies, creature, config.detection_range) {
            continue;
        }

        if let Ok(mut ai) = creatures.get_mut(creature) {
            if ai.wake() {
                crate::log(&format!("👁️ {:?} sensed a hostile monster nearby, waking up", creature));
            }
        }
    }
}

/// System: DrawAggro: combat pet перетягивает на себя врагов вокруг.
///
/// Цель не переписывается напрямую: враг получает aggro hint и сам сменит
/// цель на своём тике.
pub fn draw_aggro(
    mut intents: EventReader<CreatureIntent>,
    mut creatures: Query<(Entity, &mut CreatureAi)>,
    bodies: Bodies<'_, '_>,
    config: Res<AiConfig>,
) {
    for intent in intents.read() {
        let CreatureIntent::DrawAggro { creature: pet } = *intent else {
            continue;
        };
        let Ok((_, pet_actor, pet_health, pet_transform)) = bodies.get(pet) else {
            continue;
        };
        if !pet_health.is_alive() {
            continue;
        }

        for (entity, mut ai) in creatures.iter_mut() {
            let Ok((_, actor, health, transform)) = bodies.get(entity) else {
                continue;
            };
            if entity == pet || !health.is_alive() || !pet_actor.is_hostile_to(actor) {
                continue;
            }
            if pet_transform.translation.distance(transform.translation) > config.detection_range {
                continue;
            }
            if ai.attack_target == Some(pet) || ai.aggro_hint() == Some(pet) {
                continue;
            }

            let woke = ai.draw_aggro(pet);
            crate::log(&format!(
                "🐺 {:?} drew aggro from {:?}{}",
                pet,
                entity,
                if woke { " (woke up)" } else { "" }
            ));
        }
    }
}

/// System: спящий монстр просыпается от удара
pub fn wake_on_damage(mut damage_events: EventReader<DamageDealt>, mut creatures: Query<&mut CreatureAi>) {
    for damage in damage_events.read() {
        let Ok(mut ai) = creatures.get_mut(damage.target) else {
            continue;
        };

        if ai.wake() {
            crate::log(&format!("⚠️ {:?} woken up by {:?}", damage.target, damage.attacker));
        }
    }
}

/// System: Alerter (игрок и т.п.) будит спящих врагов в радиусе detection
pub fn alert_nearby_creatures(
    alerters: Query<(Entity, &Actor, &Health, &Transform), With<Alerter>>,
    mut creatures: Query<(Entity, &mut CreatureAi, &Actor, &Health, &Transform)>,
    config: Res<AiConfig>,
) {
    for (alerter, alerter_actor, alerter_health, alerter_transform) in alerters.iter() {
        if !alerter_health.is_alive() {
            continue;
        }

        for (entity, mut ai, actor, health, transform) in creatures.iter_mut() {
            if entity == alerter || ai.awake || !health.is_alive() || !actor.is_hostile_to(alerter_actor) {
                continue;
            }

            let distance = alerter_transform.translation.distance(transform.translation);
            if distance <= config.detection_range && ai.wake() {
                crate::log(&format!(
                    "🔔 {:?} alerted by {:?} at {:.1}m",
                    entity, alerter, distance
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::CreatureKind;

    fn spawn_body(world: &mut World, faction_id: u64, position: Vec3) -> Entity {
        world
            .spawn((Actor { faction_id }, Health::new(50), Transform::from_translation(position)))
            .id()
    }

    #[test]
    fn test_draw_aggro_hints_awake_hostiles_and_wakes_sleepers() {
        let mut app = App::new();
        app.add_event::<CreatureIntent>()
            .init_resource::<AiConfig>()
            .add_systems(Update, draw_aggro);

        let world = app.world_mut();
        let owner = spawn_body(world, 1, Vec3::ZERO);
        let pet = spawn_body(world, 1, Vec3::new(2.0, 0.0, 0.0));
        let fighting = spawn_body(world, 2, Vec3::new(4.0, 0.0, 0.0));
        let sleeping = spawn_body(world, 2, Vec3::new(0.0, 0.0, 5.0));
        let far_away = spawn_body(world, 2, Vec3::new(500.0, 0.0, 0.0));
        let ally = spawn_body(world, 1, Vec3::new(3.0, 0.0, 0.0));

        let mut engaged = CreatureAi::awake(CreatureKind::Monster);
        engaged.attack_target = Some(owner);
        world.entity_mut(fighting).insert(engaged);
        world.entity_mut(sleeping).insert(CreatureAi::new(CreatureKind::Monster));
        world.entity_mut(far_away).insert(CreatureAi::new(CreatureKind::Monster));
        world.entity_mut(ally).insert(CreatureAi::awake(CreatureKind::Monster));

        world.send_event(CreatureIntent::DrawAggro { creature: pet });
        app.update();

        let ai = |entity: Entity| app.world().get::<CreatureAi>(entity).cloned();

        let fighting = ai(fighting).expect("fighting hostile has CreatureAi");
        assert_eq!(fighting.aggro_hint(), Some(pet));
        assert_eq!(fighting.attack_target, Some(owner), "target is switched by its own tick");

        let sleeping = ai(sleeping).expect("sleeping hostile has CreatureAi");
        assert!(sleeping.awake);
        assert_eq!(sleeping.aggro_hint(), Some(pet));

        assert_eq!(ai(far_away).and_then(|ai| ai.aggro_hint()), None);
        assert_eq!(ai(ally).and_then(|ai| ai.aggro_hint()), None);
    }
}
