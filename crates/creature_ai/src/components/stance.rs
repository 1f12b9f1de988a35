//! Stance компоненты: боевая стойка и блокирующие emote-последовательности

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Стойка существа (motion stance)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum Stance {
    /// Мирная стойка
    NonCombat,
    /// Готов к бою
    Combat,
}

/// Текущая motion stance + таймер анимации смены стойки
///
/// `stance == None`: существо заспавнено без motion state (аномалия данных,
/// AI подставит NonCombat на первом тике).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MotionStance {
    pub stance: Option<Stance>,
    /// Время симуляции, когда закончится анимация смены стойки
    pub animating_until: f64,
}

impl MotionStance {
    pub fn new(stance: Stance) -> Self {
        Self {
            stance: Some(stance),
            animating_until: 0.0,
        }
    }

    pub fn is_animating(&self, now: f64) -> bool {
        now < self.animating_until
    }

    /// Сменить стойку, запуская анимацию перехода (если стойка реально меняется)
    pub fn transition_to(&mut self, stance: Stance, now: f64, duration: f64) {
        if self.stance != Some(stance) {
            self.stance = Some(stance);
            self.animating_until = now + duration;
        }
    }
}

/// Блокирующая emote-последовательность (скрипт, анимация реплики)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Emote {
    pub busy_until: f64,
}

impl Emote {
    pub fn is_busy(&self, now: f64) -> bool {
        now < self.busy_until
    }
}
