//! Movement systems

use std::collections::HashMap;

use bevy::prelude::*;

use crate::ai::{AiConfig, CreatureAi, CreatureIntent};
use crate::combat::Dead;
use crate::components::{AttackType, HomePosition, MovementCommand, MovementSpeed, MovementState};

/// Follow останавливается чуть ближе max range, чтобы следующий тик был в радиусе
const FOLLOW_RANGE_FACTOR: f32 = 0.8;

fn chase_stop_distance(ai: Option<&CreatureAi>) -> f32 {
    ai.map(|ai| ai.max_effective_range * FOLLOW_RANGE_FACTOR)
        .unwrap_or(1.0)
        .max(0.1)
}

/// System: CreatureIntent → MovementCommand / MovementState
pub fn apply_movement_intents(
    mut intents: EventReader<CreatureIntent>,
    mut movers: Query<(
        &mut MovementCommand,
        &mut MovementState,
        &mut Transform,
        Option<&HomePosition>,
        Option<&CreatureAi>,
    )>,
    config: Res<AiConfig>,
) {
    for intent in intents.read() {
        let creature = match *intent {
            CreatureIntent::StartTurn { creature, .. }
            | CreatureIntent::ContinueMovement { creature, .. }
            | CreatureIntent::UpdatePosition { creature }
            | CreatureIntent::MoveHome { creature, .. }
            | CreatureIntent::Follow { creature, .. } => creature,
            _ => continue,
        };

        let Ok((mut command, mut state, mut transform, home, ai)) = movers.get_mut(creature) else {
            crate::log_error(&format!("Entity {:?} has no movement components", creature));
            continue;
        };

        match *intent {
            CreatureIntent::StartTurn { target, .. } => {
                state.turn_target = Some(target);
            }
            CreatureIntent::ContinueMovement { target, .. } => {
                // Поворот доиграет сам, движение уже идёт
                if state.is_turning() || state.is_moving() {
                    continue;
                }
                *command = MovementCommand::FollowEntity {
                    target,
                    stop_distance: chase_stop_distance(ai),
                };
                state.moving = true;
            }
            CreatureIntent::MoveHome { home, .. } => {
                if !matches!(*command, MovementCommand::MoveToPosition { target } if target == home) {
                    crate::log(&format!("🏠 {:?} heading home to {:?}", creature, home));
                    *command = MovementCommand::MoveToPosition { target: home };
                }
                state.turn_target = None;
                state.moving = true;
            }
            CreatureIntent::Follow { leader, .. } => {
                *command = MovementCommand::FollowEntity {
                    target: leader,
                    stop_distance: config.pet_follow_distance * 0.5,
                };
                state.moving = true;
            }
            CreatureIntent::UpdatePosition { .. } => {
                // Sticky: прижимаемся к поверхности (высота дома = высота земли)
                if let Some(home) = home {
                    transform.translation.y = home.0.y;
                }
            }
            _ => {}
        }
    }
}

/// Повернуть transform к направлению на `max_angle` радиан. true если уже смотрим.
fn rotate_towards(transform: &mut Transform, direction: Vec3, max_angle: f32, tolerance: f32) -> bool {
    let direction = direction.with_y(0.0);
    if direction.length_squared() < 1e-6 {
        return true;
    }

    let desired = Transform::default().looking_to(direction, Vec3::Y).rotation;
    let angle = transform.rotation.angle_between(desired);

    if angle <= max_angle {
        transform.rotation = desired;
    } else {
        transform.rotation = transform.rotation.slerp(desired, max_angle / angle);
    }

    transform.rotation.angle_between(desired) <= tolerance
}

/// System: поворот + прямолинейное движение
///
/// После окончания поворота melee/magic существо, цель которого вне радиуса,
/// само начинает преследование (missile: никогда не догоняет).
pub fn integrate_movement(
    mut queries: ParamSet<(
        Query<(Entity, &Transform)>,
        Query<(
            &mut Transform,
            &mut MovementState,
            &mut MovementCommand,
            Option<&MovementSpeed>,
            Option<&CreatureAi>,
            Has<Dead>,
        )>,
    )>,
    config: Res<AiConfig>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let max_turn = config.turn_rate * delta;
    let tolerance = config.facing_tolerance() * 0.5;

    // Snapshot позиций всех тел (цели могут и не двигаться сами)
    let positions: HashMap<Entity, Vec3> = queries
        .p0()
        .iter()
        .map(|(entity, transform)| (entity, transform.translation))
        .collect();

    let mut movers = queries.p1();
    for (mut transform, mut state, mut command, speed, ai, dead) in movers.iter_mut() {
        if dead {
            state.turn_target = None;
            state.moving = false;
            *command = MovementCommand::Idle;
            continue;
        }

        if let Some(target) = state.turn_target {
            let Some(&target_pos) = positions.get(&target) else {
                state.turn_target = None;
                continue;
            };

            let to_target = target_pos - transform.translation;
            let facing = rotate_towards(&mut transform, to_target, max_turn, tolerance);
            if !facing {
                continue;
            }
            state.turn_target = None;

            let chases = ai
                .filter(|ai| ai.attack_type != Some(AttackType::Missile))
                .is_some_and(|ai| transform.translation.distance(target_pos) > ai.max_effective_range);
            if chases {
                *command = MovementCommand::FollowEntity {
                    target,
                    stop_distance: chase_stop_distance(ai),
                };
                state.moving = true;
            }
        }

        if !state.moving {
            continue;
        }

        let (destination, stop_distance) = match *command {
            MovementCommand::Idle => {
                state.moving = false;
                continue;
            }
            MovementCommand::MoveToPosition { target } => (target, config.arrival_radius * 0.5),
            MovementCommand::FollowEntity { target, stop_distance } => match positions.get(&target) {
                Some(&position) => (position, stop_distance),
                None => {
                    state.moving = false;
                    *command = MovementCommand::Idle;
                    continue;
                }
            },
        };

        let to_destination = destination - transform.translation;
        let distance = to_destination.length();

        if distance <= stop_distance {
            state.moving = false;
            *command = MovementCommand::Idle;
            continue;
        }

        let step = speed.copied().unwrap_or_default().speed * delta;
        let travel = step.min(distance - stop_distance);
        let direction = to_destination / distance;
        transform.translation += direction * travel;
        rotate_towards(&mut transform, direction, max_turn * 4.0, tolerance);
    }
}
