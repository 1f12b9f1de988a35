//! Movement компоненты: команды перемещения, состояние поворота/движения, дом
//!
//! Архитектура:
//! - AI tick пишет только intents (CreatureIntent)
//! - movement системы конвертируют intents → MovementCommand / MovementState
//! - AI tick на следующем тике читает MovementState (is_turning / is_moving)

use bevy::prelude::*;

/// Команда движения (high-level intent для movement резолвера)
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub enum MovementCommand {
    /// Стоять на месте
    #[default]
    Idle,
    /// Двигаться к позиции (world coordinates)
    MoveToPosition { target: Vec3 },
    /// Следовать за entity, остановиться на `stop_distance`
    FollowEntity { target: Entity, stop_distance: f32 },
}

/// Текущее состояние поворота и движения существа
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementState {
    /// К кому разворачиваемся (Some = поворот в процессе)
    pub turn_target: Option<Entity>,
    /// Идёт перемещение по MovementCommand
    pub moving: bool,
    /// Sticky movement mode: позиция требует постоянной коррекции
    /// (существо «прилипает» к поверхности)
    pub sticky: bool,
}

impl MovementState {
    pub fn is_turning(&self) -> bool {
        self.turn_target.is_some()
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }
}

/// Точка спавна (leash anchor)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct HomePosition(pub Vec3);

/// Скорость движения (метры/сек)
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 4.0 }
    }
}
