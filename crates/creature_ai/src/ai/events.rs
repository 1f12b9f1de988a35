//! AI intents: всё, что AI tick просит сделать коллабораторов
//!
//! Architecture: AI tick (strategic decision) → CreatureIntent → movement / combat /
//! equipment / awareness системы (execution). Tick сам не трогает чужие entity.

use bevy::prelude::*;

use crate::components::AttackType;

#[derive(Event, Debug, Clone, PartialEq)]
pub enum CreatureIntent {
    /// Начать поворот к цели (после поворота movement сам решит, догонять ли)
    StartTurn { creature: Entity, target: Entity },

    /// Продолжить текущее движение / преследование
    ContinueMovement { creature: Entity, target: Entity },

    /// Sticky коррекция позиции
    UpdatePosition { creature: Entity },

    /// Идти к точке спавна
    MoveHome { creature: Entity, home: Vec3 },

    /// Следовать за лидером (passive pet → owner)
    Follow { creature: Entity, leader: Entity },

    /// Атака (cooldown уже запущен тиком)
    Attack {
        attacker: Entity,
        target: Entity,
        attack_type: AttackType,
        damage: u32,
    },

    /// Экипировать оружие из inventory
    Equip { creature: Entity, prefer_missile: bool },

    /// Убрать launcher, взять melee
    SwitchToMelee { creature: Entity },

    /// Faction mob во сне сканирует соседей
    CheckMonsters { creature: Entity },

    /// Combat pet перетягивает aggro ближайших врагов
    DrawAggro { creature: Entity },
}
