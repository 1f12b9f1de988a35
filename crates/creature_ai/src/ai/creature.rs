//! CreatureAi: AI state одного существа
//!
//! Владеет им только само существо: мутирует только его собственный тик.
//! Ничего отсюда не персистится.

use bevy::prelude::*;

use crate::components::{Actor, AttackType, Attacker, HomePosition, MotionStance, MovementCommand, MovementState};
use super::schedule::{CheckClock, TickSchedule};
use super::state::{MonsterState, MonsterTransition};

/// Вариант существа. Game piece и passive pet имеют собственные деревья решений.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum CreatureKind {
    /// Обычный монстр
    #[default]
    Monster,
    /// Скриптовая фигура (ходы даёт управляющий матч)
    GamePiece,
    /// Питомец-компаньон без боя
    PassivePet { owner: Entity },
    /// Боевой питомец: обычное дерево + перетягивание aggro
    CombatPet { owner: Entity },
}

impl CreatureKind {
    pub fn is_combat_pet(&self) -> bool {
        matches!(self, CreatureKind::CombatPet { .. })
    }
}

/// One-shot установка стойки перед первым боем.
///
/// Переход Pending → Ready ровно один раз, обратно не бывает.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum Activation {
    #[default]
    Pending,
    Ready,
}

impl Activation {
    pub fn is_pending(&self) -> bool {
        matches!(self, Activation::Pending)
    }

    pub fn complete(&mut self) {
        *self = Activation::Ready;
    }
}

/// AI state существа
///
/// Required Components: всё, что читает/пишет AI tick. Спавнер обычно явно
/// задаёт `HomePosition` и `MotionStance::new(..)`.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Actor, Attacker, MotionStance, MovementState, MovementCommand, HomePosition)]
pub struct CreatureAi {
    pub kind: CreatureKind,
    pub awake: bool,
    pub(crate) monster_state: MonsterState,
    pub schedule: TickSchedule,
    pub activation: Activation,
    pub attack_type: Option<AttackType>,
    pub max_effective_range: f32,
    /// Weak reference: цель может исчезнуть в любой момент, проверяется каждый тик
    pub attack_target: Option<Entity>,
    /// Цель, подсунутая combat pet'ом: забирает только собственный тик
    pub(crate) aggro_hint: Option<Entity>,
    pub(crate) home_check: CheckClock,
}

impl CreatureAi {
    pub fn new(kind: CreatureKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Уже бодрствующее существо (например, заспавнено посреди боя)
    pub fn awake(kind: CreatureKind) -> Self {
        Self {
            awake: true,
            ..Self::new(kind)
        }
    }

    pub fn monster_state(&self) -> MonsterState {
        self.monster_state
    }

    /// Единственная точка смены MonsterState
    pub fn transition(&mut self, transition: MonsterTransition) {
        let next = self.monster_state.apply(transition);
        if next != self.monster_state {
            crate::log(&format!(
                "AI: {:?} → {:?} ({:?})",
                self.monster_state, next, transition
            ));
            self.monster_state = next;
        }
    }

    /// Заснуть: цель и attack type сбрасываются, one-shot стойка остаётся
    pub fn sleep(&mut self) {
        self.awake = false;
        self.attack_target = None;
        self.clear_attack_type();
        self.transition(MonsterTransition::Sleep);
    }

    /// Разбудить извне (alert, урон, aggro). Возвращает true, если реально проснулся.
    ///
    /// Существо, дошедшее домой, не будится, пока sleep gate не сбросит Return в Idle.
    pub fn wake(&mut self) -> bool {
        if self.awake || self.monster_state.is_returning() {
            return false;
        }
        self.awake = true;
        true
    }

    /// Combat pet перетягивает внимание на себя. Цель сменится на следующем
    /// тике существа (если pet валидная цель); спящее существо будится.
    pub fn draw_aggro(&mut self, pet: Entity) -> bool {
        self.aggro_hint = Some(pet);
        self.wake()
    }

    pub fn aggro_hint(&self) -> Option<Entity> {
        self.aggro_hint
    }

    pub fn clear_attack_type(&mut self) {
        self.attack_type = None;
    }

    pub fn set_attack_type(&mut self, attack_type: AttackType, max_range: f32) {
        self.attack_type = Some(attack_type);
        self.max_effective_range = max_range;
    }
}
