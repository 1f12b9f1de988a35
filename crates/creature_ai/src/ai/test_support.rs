//! MockWorld: CreatureWorld с настраиваемыми ответами и журналом команд

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::components::{AttackType, Stance, Weapon};
use super::world::{CreatureWorld, TargetStatus};

/// Команды, которые tick отдал коллабораторам
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CheckMonsters,
    StartTurn(Entity),
    ContinueMovement(Entity),
    UpdatePosition,
    MoveHome,
    Follow(Entity),
    Attack(Entity, AttackType),
    EquipFromInventory { prefer_missile: bool },
    SwitchToMelee,
    EnterCombatStance,
    DrawAggro,
}

pub struct MockWorld {
    pub rng: ChaCha8Rng,
    pub dead: bool,
    pub busy: bool,
    pub foe_aggro: bool,
    pub missed_home: bool,
    pub at_home: bool,
    /// Что вернёт find_target (независимо от аргумента)
    pub found_target: Option<Entity>,
    /// С какой предпочтительной целью вызывали find_target
    pub searched_with: Vec<Option<Entity>>,
    pub target_status: TargetStatus,
    pub visible: bool,
    pub distance: f32,
    pub facing: bool,
    pub stance: Option<Stance>,
    /// enter_combat_stance запускает анимацию
    pub animate_on_stance_change: bool,
    pub animating: bool,
    pub turning: bool,
    pub moving: bool,
    pub sticky: bool,
    pub attack_ready: bool,
    pub next_attack_type: AttackType,
    pub melee_range: f32,
    pub missile_range: f32,
    pub magic_range: f32,
    pub self_cast: bool,
    pub equipped: Option<Weapon>,
    pub calls: Vec<Call>,
}

impl Default for MockWorld {
    fn default() -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(7),
            dead: false,
            busy: false,
            foe_aggro: false,
            missed_home: false,
            at_home: false,
            found_target: None,
            searched_with: Vec::new(),
            target_status: TargetStatus::Alive,
            visible: true,
            distance: 1.0,
            facing: true,
            stance: Some(Stance::Combat),
            animate_on_stance_change: false,
            animating: false,
            turning: false,
            moving: false,
            sticky: false,
            attack_ready: true,
            next_attack_type: AttackType::Melee,
            melee_range: 2.0,
            missile_range: 25.0,
            magic_range: 18.0,
            self_cast: false,
            equipped: Some(Weapon::melee("sword", 2.0)),
            calls: Vec::new(),
        }
    }
}

impl MockWorld {
    /// Бодрый бой: цель найдена, видима, стойка боевая
    pub fn with_target(target: Entity) -> Self {
        Self {
            found_target: Some(target),
            ..Default::default()
        }
    }

    pub fn attacks(&self) -> usize {
        self.calls.iter().filter(|call| matches!(call, Call::Attack(..))).count()
    }

    pub fn called(&self, call: &Call) -> bool {
        self.calls.contains(call)
    }
}

impl CreatureWorld for MockWorld {
    type Rng = ChaCha8Rng;

    fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    fn is_dead(&self) -> bool {
        self.dead
    }

    fn is_busy(&self) -> bool {
        self.busy
    }

    fn has_foe_aggro(&self) -> bool {
        self.foe_aggro
    }

    fn check_monsters(&mut self) {
        self.calls.push(Call::CheckMonsters);
    }

    fn missed_home(&self) -> bool {
        self.missed_home
    }

    fn at_home(&self) -> bool {
        self.at_home
    }

    fn find_target(&mut self, current: Option<Entity>) -> Option<Entity> {
        self.searched_with.push(current);
        self.found_target
    }

    fn target_status(&self, _target: Entity) -> TargetStatus {
        self.target_status
    }

    fn is_visible(&self, _target: Entity) -> bool {
        self.visible
    }

    fn distance_to(&self, _target: Entity) -> f32 {
        self.distance
    }

    fn is_facing(&self, _target: Entity) -> bool {
        self.facing
    }

    fn stance(&self) -> Option<Stance> {
        self.stance
    }

    fn set_stance(&mut self, stance: Stance) {
        self.stance = Some(stance);
    }

    fn enter_combat_stance(&mut self) {
        if self.stance != Some(Stance::Combat) && self.animate_on_stance_change {
            self.animating = true;
        }
        self.stance = Some(Stance::Combat);
        self.calls.push(Call::EnterCombatStance);
    }

    fn is_animating(&self) -> bool {
        self.animating
    }

    fn is_turning(&self) -> bool {
        self.turning
    }

    fn is_moving(&self) -> bool {
        self.moving
    }

    fn is_sticky(&self) -> bool {
        self.sticky
    }

    fn start_turn(&mut self, target: Entity) {
        self.calls.push(Call::StartTurn(target));
    }

    fn continue_movement(&mut self, target: Entity) {
        self.calls.push(Call::ContinueMovement(target));
    }

    fn update_position(&mut self) {
        self.calls.push(Call::UpdatePosition);
    }

    fn move_home(&mut self) {
        self.calls.push(Call::MoveHome);
    }

    fn follow(&mut self, leader: Entity) {
        self.calls.push(Call::Follow(leader));
    }

    fn attack_ready(&self) -> bool {
        self.attack_ready
    }

    fn execute_attack(&mut self, target: Entity, attack_type: AttackType) {
        self.calls.push(Call::Attack(target, attack_type));
    }

    fn next_attack_type(&mut self) -> AttackType {
        self.next_attack_type
    }

    fn max_range(&self, attack_type: AttackType) -> f32 {
        match attack_type {
            AttackType::Melee => self.melee_range,
            AttackType::Missile => self.missile_range,
            AttackType::Magic => self.magic_range,
        }
    }

    fn is_self_cast(&self, attack_type: AttackType) -> bool {
        attack_type == AttackType::Magic && self.self_cast
    }

    fn draw_aggro(&mut self) {
        self.calls.push(Call::DrawAggro);
    }

    fn equipped_weapon(&self) -> Option<&Weapon> {
        self.equipped.as_ref()
    }

    fn has_ammo(&self) -> bool {
        self.equipped.as_ref().is_some_and(Weapon::has_ammo)
    }

    fn equip_from_inventory(&mut self, prefer_missile: bool) {
        self.calls.push(Call::EquipFromInventory { prefer_missile });
    }

    fn switch_to_melee(&mut self) {
        self.calls.push(Call::SwitchToMelee);
    }
}
