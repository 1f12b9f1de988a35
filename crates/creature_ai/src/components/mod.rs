//! ECS Components для существ
//!
//! Организация по доменам:
//! - actor: фракция, здоровье, маркеры awareness (FactionMob, Alerter)
//! - movement: MovementCommand, MovementState (turning/moving/sticky), HomePosition
//! - combat: Attacker (cooldown, ranges, attack type weights), AttackType
//! - equipment: Weapon, Loadout (equipped + inventory)
//! - stance: MotionStance (боевая стойка + анимация перехода), Emote

pub mod actor;
pub mod combat;
pub mod equipment;
pub mod movement;
pub mod stance;

// Re-exports для удобного импорта
pub use actor::*;
pub use combat::*;
pub use equipment::*;
pub use movement::*;
pub use stance::*;
