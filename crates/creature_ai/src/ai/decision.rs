//! AI Decision Engine: один тик одного существа
//!
//! Порядок веток (первая сработавшая побеждает):
//! 1. variant dispatch (game piece, passive pet)
//! 2. sleep gate → 3. dead → 4. busy (emote)
//! 5. target search (aggro hint от combat pet'а первым) + missed home check
//! 6. нет цели → sleep / 7. Return → домой
//! 8. валидность цели
//! 9. one-shot боевая стойка
//! 10. launcher без ammo / пропавший launcher
//! 11. выбор attack type (Missile без launcher'а в руках → сначала экипировка)
//! 12. sticky position update
//! 13. range/facing арбитраж (melee/magic vs missile)
//! 14. combat pet aggro hook
//!
//! Tick никогда не блокирует и не падает: каждая ветка заканчивается валидным state.

use bevy::prelude::*;

use crate::components::{AttackType, Stance};
use super::config::AiConfig;
use super::creature::{CreatureAi, CreatureKind};
use super::state::MonsterTransition;
use super::variants;
use super::world::{CreatureWorld, TargetStatus};

/// Какая ветка дерева сработала на этом тике
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Game piece: ходы даёт скрипт, AI только держит расписание
    GamePiece,
    /// Passive pet тик (следование за владельцем)
    Pet,
    Asleep,
    Dead,
    Busy,
    /// Цели нет: заснули
    FellAsleep,
    /// Идём домой
    Returning,
    /// Дошли домой: засыпаем, Return сбросится в Idle на следующем тике
    ArrivedHome,
    /// Цель умерла/пропала: перепоиск
    TargetLost,
    /// Ждём окончания анимации смены стойки
    AwaitingStance,
    Turning,
    Moving,
    Attacked,
    /// В радиусе и смотрим на цель, но cooldown ещё идёт
    AttackCooldown,
    /// Missile вне дистанции → переключились на melee
    DowngradedToMelee,
    /// Выбран Missile, launcher ещё в inventory: ждём экипировку
    Equipping,
}

/// Monster tick.
///
/// Driver вызывает только когда `ai.schedule.is_due(now)`; следующее время тика
/// пересчитывается первым делом, независимо от сработавшей ветки.
pub fn monster_tick<W: CreatureWorld>(
    entity: Entity,
    ai: &mut CreatureAi,
    world: &mut W,
    now: f64,
    config: &AiConfig,
) -> TickOutcome {
    ai.schedule.schedule_next(now, config.tick_interval, world.rng());

    match ai.kind {
        CreatureKind::GamePiece => return variants::game_piece_tick(entity, ai),
        CreatureKind::PassivePet { owner } => return variants::passive_pet_tick(world, owner, config),
        CreatureKind::Monster | CreatureKind::CombatPet { .. } => {}
    }

    if !ai.awake {
        ai.aggro_hint = None;
        if ai.monster_state().is_returning() {
            ai.transition(MonsterTransition::Sleep);
        }
        if world.has_foe_aggro() {
            world.check_monsters();
        }
        return TickOutcome::Asleep;
    }

    if world.is_dead() {
        return TickOutcome::Dead;
    }

    if world.is_busy() {
        return TickOutcome::Busy;
    }

    let preferred = ai.aggro_hint.take().or(ai.attack_target);
    ai.attack_target = world.find_target(preferred);
    check_missed_home(entity, ai, world, now, config);

    if ai.monster_state().is_returning() {
        if world.at_home() {
            // Засыпаем, оставаясь в Return: sleep gate сбросит в Idle
            ai.awake = false;
            ai.attack_target = None;
            ai.clear_attack_type();
            return TickOutcome::ArrivedHome;
        }
        world.move_home();
        return TickOutcome::Returning;
    }

    let Some(target) = ai.attack_target else {
        ai.sleep();
        return TickOutcome::FellAsleep;
    };

    if target_lost(ai, world, target) {
        crate::log(&format!("❌ {:?}: target {:?} lost, searching again", entity, target));
        ai.attack_target = world.find_target(None);
        return TickOutcome::TargetLost;
    }
    ai.transition(MonsterTransition::Engage);

    if ai.activation.is_pending() {
        if world.stance().is_none() {
            crate::log_warning(&format!(
                "{:?}: no motion stance on first update, defaulting to NonCombat",
                entity
            ));
            world.set_stance(Stance::NonCombat);
        }
        if world.stance() == Some(Stance::NonCombat) {
            world.enter_combat_stance();
        }
        if world.is_animating() {
            return TickOutcome::AwaitingStance;
        }
        ai.activation.complete();
    }

    arbitrate_weapon(entity, ai, world);

    let attack_type = match ai.attack_type {
        Some(attack_type) => attack_type,
        None => {
            let attack_type = world.next_attack_type();
            let max_range = world.max_range(attack_type);
            ai.set_attack_type(attack_type, max_range);
            attack_type
        }
    };

    // Range взят от launcher'а из inventory: без него в руках не стреляем
    if attack_type == AttackType::Missile && !launcher_equipped(world) {
        crate::log(&format!("🏹 {:?}: missile selected, equipping launcher first", entity));
        world.equip_from_inventory(true);
        return TickOutcome::Equipping;
    }

    if world.is_sticky() {
        world.update_position();
    }

    let outcome = match attack_type {
        AttackType::Missile => missile_engage(entity, ai, world, target),
        AttackType::Melee | AttackType::Magic => close_engage(ai, world, target, attack_type),
    };

    if ai.kind.is_combat_pet() {
        world.draw_aggro();
    }

    outcome
}

/// Missed home проверка на собственных часах (реже AI тика)
fn check_missed_home<W: CreatureWorld>(
    entity: Entity,
    ai: &mut CreatureAi,
    world: &W,
    now: f64,
    config: &AiConfig,
) {
    if ai.monster_state().is_returning() {
        return;
    }
    if !ai.home_check.take_due(now, config.home_check_interval) {
        return;
    }
    if world.missed_home() {
        crate::log(&format!("🏠 {:?} wandered past leash, returning home", entity));
        ai.transition(MonsterTransition::Leash);
        ai.attack_target = None;
        ai.clear_attack_type();
    }
}

/// Цель мертва, исчезла или (не для combat pet) невидима
fn target_lost<W: CreatureWorld>(ai: &CreatureAi, world: &W, target: Entity) -> bool {
    match world.target_status(target) {
        TargetStatus::Missing | TargetStatus::Dead => true,
        TargetStatus::Alive => !ai.kind.is_combat_pet() && !world.is_visible(target),
    }
}

/// Launcher без ammo → melee; Missile без launcher'а в руках → переэкипировка
fn arbitrate_weapon<W: CreatureWorld>(entity: Entity, ai: &mut CreatureAi, world: &mut W) {
    match launcher_equipped(world) {
        true if !world.has_ammo() => {
            crate::log(&format!("{:?}: launcher out of ammo, switching to melee", entity));
            world.switch_to_melee();
            ai.clear_attack_type();
        }
        false if ai.attack_type == Some(AttackType::Missile) => {
            crate::log(&format!("{:?}: missile attacker without launcher, re-equipping", entity));
            world.equip_from_inventory(true);
            world.enter_combat_stance();
            ai.clear_attack_type();
        }
        _ => {}
    }
}

fn launcher_equipped<W: CreatureWorld>(world: &W) -> bool {
    world.equipped_weapon().is_some_and(|weapon| weapon.is_launcher())
}

/// Melee/magic: сближаемся и разворачиваемся, бьём только в радиусе и лицом к цели
fn close_engage<W: CreatureWorld>(
    ai: &CreatureAi,
    world: &mut W,
    target: Entity,
    attack_type: AttackType,
) -> TickOutcome {
    let distance = world.distance_to(target);
    let out_of_range = distance > ai.max_effective_range;
    let must_face = !world.is_self_cast(attack_type);

    if out_of_range || (must_face && !world.is_facing(target)) {
        if !world.is_turning() && !world.is_moving() {
            world.start_turn(target);
            return TickOutcome::Turning;
        }
        world.continue_movement(target);
        return TickOutcome::Moving;
    }

    if world.attack_ready() {
        world.execute_attack(target, attack_type);
        TickOutcome::Attacked
    } else {
        TickOutcome::AttackCooldown
    }
}

/// Missile: не догоняем. Вне дистанции: переключаемся на melee.
fn missile_engage<W: CreatureWorld>(
    entity: Entity,
    ai: &mut CreatureAi,
    world: &mut W,
    target: Entity,
) -> TickOutcome {
    if world.is_turning() || world.is_moving() {
        world.continue_movement(target);
        return TickOutcome::Moving;
    }

    if !world.is_facing(target) {
        world.start_turn(target);
        return TickOutcome::Turning;
    }

    if world.distance_to(target) <= ai.max_effective_range {
        if world.attack_ready() {
            world.execute_attack(target, AttackType::Missile);
            return TickOutcome::Attacked;
        }
        return TickOutcome::AttackCooldown;
    }

    crate::log(&format!("🏹 {:?}: target out of missile range, switching to melee", entity));
    world.switch_to_melee();
    let melee_range = world.max_range(AttackType::Melee);
    ai.set_attack_type(AttackType::Melee, melee_range);
    TickOutcome::DowngradedToMelee
}
