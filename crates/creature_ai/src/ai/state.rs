//! Combat State Transition Guard
//!
//! Явный конечный автомат поверх decision engine:
//!
//! ```text
//!   from \ event   Sleep   Engage      Leash
//!   Idle           Idle    Attacking   Return
//!   Attacking      Idle    Attacking   Return
//!   Return         Idle    Return      Return
//! ```
//!
//! Все переходы перечислены в `MonsterState::apply`: таблица тотальная,
//! недопустимый переход оставляет состояние как есть.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Грубый поведенческий режим существа
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum MonsterState {
    /// Начальное состояние: нет цели или спим
    #[default]
    Idle,
    /// Возвращаемся домой (атаки отключены)
    Return,
    /// Есть живая валидная цель
    Attacking,
}

/// Событие, которое двигает автомат
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterTransition {
    /// Существо засыпает
    Sleep,
    /// Валидная цель пережила проверку: вступаем в бой
    Engage,
    /// Leash превышен: возвращаемся домой
    Leash,
}

impl MonsterState {
    pub fn apply(self, transition: MonsterTransition) -> MonsterState {
        use MonsterState::*;
        use MonsterTransition::*;

        match (self, transition) {
            (_, Sleep) => Idle,

            (Idle, Engage) | (Attacking, Engage) => Attacking,
            // Пока возвращаемся: в бой не вступаем
            (Return, Engage) => Return,

            (Idle, Leash) | (Attacking, Leash) | (Return, Leash) => Return,
        }
    }

    /// Разрешены ли ветки атаки/сближения в этом состоянии
    pub fn allows_combat(self) -> bool {
        !matches!(self, MonsterState::Return)
    }

    pub fn is_returning(self) -> bool {
        matches!(self, MonsterState::Return)
    }
}
