//! Attack type selection и max effective range

use rand::Rng;

use crate::components::{AttackType, Attacker, Loadout};

/// Weighted выбор attack type по возможностям существа.
///
/// Missile участвует только если есть launcher с ammo (в руках или в inventory).
/// Если ни один вес не положителен (или сумма не конечна): Melee.
pub fn select_attack_type<R: Rng + ?Sized>(
    attacker: &Attacker,
    missile_available: bool,
    rng: &mut R,
) -> AttackType {
    let candidates = [AttackType::Melee, AttackType::Missile, AttackType::Magic].map(|attack_type| {
        let weight = match attack_type {
            AttackType::Missile if !missile_available => 0.0,
            _ => attacker.weight(attack_type).max(0.0),
        };
        (attack_type, weight)
    });

    let total: f32 = candidates.iter().map(|(_, weight)| weight).sum();
    // NaN/inf веса из конфига: gen_range на таком диапазоне паникует
    if !total.is_finite() || total <= 0.0 {
        return AttackType::Melee;
    }

    let mut roll = rng.gen_range(0.0..total);
    for (attack_type, weight) in candidates {
        if roll < weight {
            return attack_type;
        }
        roll -= weight;
    }

    // Float погрешность на последнем весе
    candidates
        .iter()
        .rev()
        .find(|(_, weight)| *weight > 0.0)
        .map(|(attack_type, _)| *attack_type)
        .unwrap_or(AttackType::Melee)
}

/// Max effective range для attack type
///
/// - Melee: reach существа
/// - Missile: дистанция launcher'а (в руках, иначе первый с ammo в inventory)
/// - Magic: дистанция каста существа
pub fn attack_max_range(attacker: &Attacker, loadout: Option<&Loadout>, attack_type: AttackType) -> f32 {
    match attack_type {
        AttackType::Melee => attacker.melee_range,
        AttackType::Magic => attacker.magic_range,
        AttackType::Missile => loadout
            .and_then(|loadout| {
                loadout
                    .equipped_launcher()
                    .or_else(|| loadout.inventory.iter().find(|weapon| weapon.has_ammo()))
            })
            .map(|launcher| launcher.range)
            .unwrap_or(attacker.melee_range),
    }
}
