//! Collaborator interface: всё, что AI tick знает о мире.
//!
//! Реализация привязана к одному тикающему существу ("self"). Запросы о других
//! существах: только на чтение; всё, что влияет на других, уходит через
//! команды коллабораторам (движение, атака, экипировка, aggro).

use bevy::prelude::*;
use rand::Rng;

use crate::components::{AttackType, Stance, Weapon};

/// Состояние цели с точки зрения атакующего
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetStatus {
    /// Entity больше нет в мире
    Missing,
    Dead,
    Alive,
}

pub trait CreatureWorld {
    type Rng: Rng;

    /// Источник случайности для desync и attack type rolls
    fn rng(&mut self) -> &mut Self::Rng;

    // ===== Self =====

    fn is_dead(&self) -> bool;

    /// Играется блокирующая emote-последовательность
    fn is_busy(&self) -> bool;

    /// Faction mob / foe aggro: во сне сам ищет соседей
    fn has_foe_aggro(&self) -> bool;

    /// Лёгкий скан соседей во сне (faction mobs)
    fn check_monsters(&mut self);

    /// Ушли ли мы слишком далеко от дома
    fn missed_home(&self) -> bool;

    fn at_home(&self) -> bool;

    // ===== Target / visibility =====

    /// Найти или обновить цель. `current`: текущая цель (может остаться)
    fn find_target(&mut self, current: Option<Entity>) -> Option<Entity>;

    fn target_status(&self, target: Entity) -> TargetStatus;

    fn is_visible(&self, target: Entity) -> bool;

    fn distance_to(&self, target: Entity) -> f32;

    fn is_facing(&self, target: Entity) -> bool;

    // ===== Stance =====

    fn stance(&self) -> Option<Stance>;

    /// Подставить стойку без анимации (восстановление после аномалии данных)
    fn set_stance(&mut self, stance: Stance);

    /// Перейти в боевую стойку (может запустить анимацию)
    fn enter_combat_stance(&mut self);

    fn is_animating(&self) -> bool;

    // ===== Movement (fire-and-forget) =====

    fn is_turning(&self) -> bool;

    fn is_moving(&self) -> bool;

    /// Movement mode требует непрерывной коррекции позиции
    fn is_sticky(&self) -> bool;

    fn start_turn(&mut self, target: Entity);

    fn continue_movement(&mut self, target: Entity);

    fn update_position(&mut self);

    fn move_home(&mut self);

    fn follow(&mut self, leader: Entity);

    // ===== Combat =====

    fn attack_ready(&self) -> bool;

    fn execute_attack(&mut self, target: Entity, attack_type: AttackType);

    fn next_attack_type(&mut self) -> AttackType;

    fn max_range(&self, attack_type: AttackType) -> f32;

    /// Атака этого типа кастуется на себя (facing не нужен)
    fn is_self_cast(&self, attack_type: AttackType) -> bool;

    /// Combat pet: перетянуть aggro ближайших врагов на себя
    fn draw_aggro(&mut self);

    // ===== Equipment =====

    fn equipped_weapon(&self) -> Option<&Weapon>;

    fn has_ammo(&self) -> bool;

    fn equip_from_inventory(&mut self, prefer_missile: bool);

    fn switch_to_melee(&mut self);
}
