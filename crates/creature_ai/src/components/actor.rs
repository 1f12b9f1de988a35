//! Базовые компоненты существ: Actor, Health, маркеры awareness

use bevy::prelude::*;

/// Существо в мире (монстр, питомец, игрок)
///
/// Автоматически добавляет Health и Transform через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Transform)]
pub struct Actor {
    /// Stable ID фракции. Одинаковая фракция = союзники.
    pub faction_id: u64,
}

impl Actor {
    pub fn is_hostile_to(&self, other: &Actor) -> bool {
        self.faction_id != other.faction_id
    }
}

/// Здоровье существа
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Marker: существо с faction/foe aggro.
///
/// Во сне такие существа сами сканируют соседей (CheckMonsters), а не ждут,
/// пока их разбудит Alerter.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct FactionMob;

/// Marker: сущность, которая будит спящих врагов рядом (игрок, патрульный маяк)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Alerter;
