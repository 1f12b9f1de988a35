//! Собственные тики вариантов существ (game piece, passive pet)
//!
//! Общий только вход: `monster_tick` диспатчит сюда по `CreatureKind`
//! до основного дерева решений.

use bevy::prelude::*;

use super::config::AiConfig;
use super::creature::CreatureAi;
use super::decision::TickOutcome;
use super::world::{CreatureWorld, TargetStatus};

/// Game piece: ходы и атаки отдаёт управляющий матч через свои intents,
/// AI тик только держит расписание.
pub fn game_piece_tick(entity: Entity, ai: &CreatureAi) -> TickOutcome {
    if ai.attack_target.is_some() {
        crate::log(&format!("♟️ {:?}: game piece ignores AI target, waiting for its match", entity));
    }
    TickOutcome::GamePiece
}

/// Passive pet: держится рядом с владельцем, не дерётся
pub fn passive_pet_tick<W: CreatureWorld>(world: &mut W, owner: Entity, config: &AiConfig) -> TickOutcome {
    if world.is_dead() || world.target_status(owner) != TargetStatus::Alive {
        return TickOutcome::Pet;
    }

    if !world.is_moving() && world.distance_to(owner) > config.pet_follow_distance {
        world.follow(owner);
    }

    TickOutcome::Pet
}
