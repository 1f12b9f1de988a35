//! Параметры AI (общие для всей популяции)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Глобальные параметры creature AI
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Базовый интервал AI тика (секунды симуляции)
    pub tick_interval: f64,
    /// Интервал проверки "ушёл слишком далеко от дома" (секунды)
    pub home_check_interval: f64,
    /// Leash: дальше этого от дома → Return
    pub leash_distance: f32,
    /// Радиус поиска целей и пробуждения от врагов
    pub detection_range: f32,
    /// Дальше этого цель считается невидимой
    pub vision_range: f32,
    /// Допуск facing (градусы)
    pub facing_tolerance_degrees: f32,
    /// Дом/точка считается достигнутой в этом радиусе
    pub arrival_radius: f32,
    /// Длительность анимации смены стойки (секунды)
    pub stance_transition_secs: f64,
    /// Скорость поворота (радиан/сек)
    pub turn_rate: f32,
    /// Passive pet догоняет владельца дальше этой дистанции
    pub pet_follow_distance: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            tick_interval: 0.3,
            home_check_interval: 1.0,
            leash_distance: 40.0,
            detection_range: 20.0,
            vision_range: 30.0,
            facing_tolerance_degrees: 15.0,
            arrival_radius: 1.0,
            stance_transition_secs: 0.8,
            turn_rate: std::f32::consts::PI,
            pet_follow_distance: 3.0,
        }
    }
}

impl AiConfig {
    pub fn facing_tolerance(&self) -> f32 {
        self.facing_tolerance_degrees.to_radians()
    }
}
