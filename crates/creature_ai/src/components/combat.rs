//! Combat компоненты: Attacker, AttackType

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Тип атаки. Отсутствие типа моделируется через `Option<AttackType>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AttackType {
    Melee,
    Missile,
    Magic,
}

/// Боевые характеристики существа
///
/// Cooldown хранится как абсолютное время следующей атаки (`next_attack_time`),
/// чтобы AI tick мог проверять готовность без отдельной cooldown системы.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Attacker {
    /// Плоский урон одной атаки
    pub base_damage: u32,
    /// Пауза между атаками (секунды)
    pub attack_cooldown: f64,
    /// Время симуляции, с которого разрешена следующая атака
    pub next_attack_time: f64,
    /// Дистанция melee атаки (метры)
    pub melee_range: f32,
    /// Дистанция каста (метры)
    pub magic_range: f32,
    /// Магия кастуется на себя (баф/хил): не требует facing
    pub self_cast_magic: bool,
    /// Веса выбора attack type
    pub melee_weight: f32,
    pub missile_weight: f32,
    pub magic_weight: f32,
}

impl Default for Attacker {
    fn default() -> Self {
        Self {
            base_damage: 10,
            attack_cooldown: 1.5,
            next_attack_time: 0.0,
            melee_range: 2.0,
            magic_range: 18.0,
            self_cast_magic: false,
            melee_weight: 1.0,
            missile_weight: 0.0,
            magic_weight: 0.0,
        }
    }
}

impl Attacker {
    /// Может ли атаковать (cooldown истёк)
    pub fn attack_ready(&self, now: f64) -> bool {
        self.next_attack_time <= now
    }

    /// Начать атаку (сдвинуть cooldown)
    pub fn start_attack(&mut self, now: f64) {
        self.next_attack_time = now + self.attack_cooldown;
    }

    /// Вес attack type для weighted выбора (см. `select_attack_type`)
    pub fn weight(&self, attack_type: AttackType) -> f32 {
        match attack_type {
            AttackType::Melee => self.melee_weight,
            AttackType::Missile => self.missile_weight,
            AttackType::Magic => self.magic_weight,
        }
    }
}
