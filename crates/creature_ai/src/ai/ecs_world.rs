//! ECS-реализация CreatureWorld
//!
//! Привязана к одному тикающему существу:
//! - свои компоненты (stance, attacker cooldown): мутируем напрямую
//! - чужие entity: только read-only `Bodies` query
//! - всё остальное: CreatureIntent в буфер, driver отправит после тика

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::combat::{attack_max_range, select_attack_type};
use crate::components::{
    Actor, AttackType, Attacker, Emote, Health, Loadout, MotionStance, MovementState, Stance, Weapon,
};
use super::config::AiConfig;
use super::events::CreatureIntent;
use super::world::{CreatureWorld, TargetStatus};

/// Read-only вид на всех существ мира (включая self)
pub type Bodies<'w, 's> = Query<'w, 's, (Entity, &'static Actor, &'static Health, &'static Transform)>;

/// Собственные компоненты тикающего существа
pub struct OwnComponents<'a> {
    pub stance: &'a mut MotionStance,
    pub attacker: &'a mut Attacker,
    pub movement: &'a MovementState,
    pub loadout: Option<&'a Loadout>,
    pub home: Vec3,
    pub emote: Option<&'a Emote>,
    pub faction_mob: bool,
}

pub struct EcsCreatureWorld<'a, 'w, 's> {
    entity: Entity,
    own: OwnComponents<'a>,
    bodies: &'a Bodies<'w, 's>,
    config: &'a AiConfig,
    now: f64,
    rng: &'a mut ChaCha8Rng,
    intents: &'a mut Vec<CreatureIntent>,
}

impl<'a, 'w, 's> EcsCreatureWorld<'a, 'w, 's> {
    pub fn new(
        entity: Entity,
        own: OwnComponents<'a>,
        bodies: &'a Bodies<'w, 's>,
        config: &'a AiConfig,
        now: f64,
        rng: &'a mut ChaCha8Rng,
        intents: &'a mut Vec<CreatureIntent>,
    ) -> Self {
        Self {
            entity,
            own,
            bodies,
            config,
            now,
            rng,
            intents,
        }
    }

    fn own_body(&self) -> Option<(&Actor, &Health, &Transform)> {
        self.bodies
            .get(self.entity)
            .ok()
            .map(|(_, actor, health, transform)| (actor, health, transform))
    }

    fn position(&self) -> Option<Vec3> {
        self.own_body().map(|(_, _, transform)| transform.translation)
    }

    fn position_of(&self, target: Entity) -> Option<Vec3> {
        self.bodies.get(target).ok().map(|(_, _, _, transform)| transform.translation)
    }

    fn distance_from_home(&self) -> f32 {
        self.position()
            .map(|pos| pos.distance(self.own.home))
            .unwrap_or(0.0)
    }

    /// Живой враг в пределах `range`
    fn is_hostile_in_range(&self, target: Entity, range: f32) -> bool {
        let Some((own_actor, _, _)) = self.own_body() else {
            return false;
        };
        let Ok((_, actor, health, _)) = self.bodies.get(target) else {
            return false;
        };

        target != self.entity
            && health.is_alive()
            && own_actor.is_hostile_to(actor)
            && self.distance_to(target) <= range
    }

    fn nearest_hostile(&self) -> Option<Entity> {
        let (own_actor, _, own_transform) = self.own_body()?;
        let origin = own_transform.translation;
        let mut nearest: Option<(Entity, f32)> = None;

        for (candidate, actor, health, transform) in self.bodies.iter() {
            if candidate == self.entity || !health.is_alive() || !own_actor.is_hostile_to(actor) {
                continue;
            }

            let distance = origin.distance(transform.translation);
            if distance > self.config.detection_range {
                continue;
            }

            match nearest {
                Some((_, best)) if distance >= best => {}
                _ => nearest = Some((candidate, distance)),
            }
        }

        nearest.map(|(entity, _)| entity)
    }
}

impl CreatureWorld for EcsCreatureWorld<'_, '_, '_> {
    type Rng = ChaCha8Rng;

    fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut *self.rng
    }

    // ===== Self =====

    fn is_dead(&self) -> bool {
        self.own_body().map(|(_, health, _)| !health.is_alive()).unwrap_or(true)
    }

    fn is_busy(&self) -> bool {
        self.own.emote.map(|emote| emote.is_busy(self.now)).unwrap_or(false)
    }

    fn has_foe_aggro(&self) -> bool {
        self.own.faction_mob
    }

    fn check_monsters(&mut self) {
        self.intents.push(CreatureIntent::CheckMonsters { creature: self.entity });
    }

    fn missed_home(&self) -> bool {
        self.distance_from_home() > self.config.leash_distance
    }

    fn at_home(&self) -> bool {
        self.distance_from_home() <= self.config.arrival_radius
    }

    // ===== Target / visibility =====

    fn find_target(&mut self, current: Option<Entity>) -> Option<Entity> {
        match current {
            Some(target) if self.is_hostile_in_range(target, self.config.vision_range) => Some(target),
            _ => self.nearest_hostile(),
        }
    }

    fn target_status(&self, target: Entity) -> TargetStatus {
        match self.bodies.get(target) {
            Err(_) => TargetStatus::Missing,
            Ok((_, _, health, _)) if !health.is_alive() => TargetStatus::Dead,
            Ok(_) => TargetStatus::Alive,
        }
    }

    fn is_visible(&self, target: Entity) -> bool {
        self.distance_to(target) <= self.config.vision_range
    }

    fn distance_to(&self, target: Entity) -> f32 {
        match (self.position(), self.position_of(target)) {
            (Some(from), Some(to)) => from.distance(to),
            _ => f32::INFINITY,
        }
    }

    fn is_facing(&self, target: Entity) -> bool {
        let Some((_, _, transform)) = self.own_body() else {
            return false;
        };
        let Some(target_pos) = self.position_of(target) else {
            return false;
        };

        let to_target = (target_pos - transform.translation).with_y(0.0);
        if to_target.length_squared() < 1e-6 {
            return true;
        }

        let forward = transform.forward().as_vec3().with_y(0.0);
        forward.angle_between(to_target) <= self.config.facing_tolerance()
    }

    // ===== Stance =====

    fn stance(&self) -> Option<Stance> {
        self.own.stance.stance
    }

    fn set_stance(&mut self, stance: Stance) {
        self.own.stance.stance = Some(stance);
    }

    fn enter_combat_stance(&mut self) {
        self.own
            .stance
            .transition_to(Stance::Combat, self.now, self.config.stance_transition_secs);
    }

    fn is_animating(&self) -> bool {
        self.own.stance.is_animating(self.now)
    }

    // ===== Movement =====

    fn is_turning(&self) -> bool {
        self.own.movement.is_turning()
    }

    fn is_moving(&self) -> bool {
        self.own.movement.is_moving()
    }

    fn is_sticky(&self) -> bool {
        self.own.movement.sticky
    }

    fn start_turn(&mut self, target: Entity) {
        self.intents.push(CreatureIntent::StartTurn {
            creature: self.entity,
            target,
        });
    }

    fn continue_movement(&mut self, target: Entity) {
        self.intents.push(CreatureIntent::ContinueMovement {
            creature: self.entity,
            target,
        });
    }

    fn update_position(&mut self) {
        self.intents.push(CreatureIntent::UpdatePosition { creature: self.entity });
    }

    fn move_home(&mut self) {
        self.intents.push(CreatureIntent::MoveHome {
            creature: self.entity,
            home: self.own.home,
        });
    }

    fn follow(&mut self, leader: Entity) {
        self.intents.push(CreatureIntent::Follow {
            creature: self.entity,
            leader,
        });
    }

    // ===== Combat =====

    fn attack_ready(&self) -> bool {
        self.own.attacker.attack_ready(self.now)
    }

    fn execute_attack(&mut self, target: Entity, attack_type: AttackType) {
        self.own.attacker.start_attack(self.now);
        self.intents.push(CreatureIntent::Attack {
            attacker: self.entity,
            target,
            attack_type,
            damage: self.own.attacker.base_damage,
        });
    }

    fn next_attack_type(&mut self) -> AttackType {
        let missile_available = self.own.loadout.map(Loadout::missile_available).unwrap_or(false);
        select_attack_type(&*self.own.attacker, missile_available, &mut *self.rng)
    }

    fn max_range(&self, attack_type: AttackType) -> f32 {
        attack_max_range(&*self.own.attacker, self.own.loadout, attack_type)
    }

    fn is_self_cast(&self, attack_type: AttackType) -> bool {
        attack_type == AttackType::Magic && self.own.attacker.self_cast_magic
    }

    fn draw_aggro(&mut self) {
        self.intents.push(CreatureIntent::DrawAggro { creature: self.entity });
    }

    // ===== Equipment =====

    fn equipped_weapon(&self) -> Option<&Weapon> {
        self.own.loadout.and_then(|loadout| loadout.equipped.as_ref())
    }

    fn has_ammo(&self) -> bool {
        self.own
            .loadout
            .and_then(Loadout::equipped_launcher)
            .map(Weapon::has_ammo)
            .unwrap_or(false)
    }

    fn equip_from_inventory(&mut self, prefer_missile: bool) {
        self.intents.push(CreatureIntent::Equip {
            creature: self.entity,
            prefer_missile,
        });
    }

    fn switch_to_melee(&mut self) {
        self.intents.push(CreatureIntent::SwitchToMelee { creature: self.entity });
    }
}
