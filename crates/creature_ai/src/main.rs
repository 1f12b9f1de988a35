//! Headless симуляция creature AI
//!
//! Две фракции: отряд монстров (melee + лучник) против игрока-Alerter'а.
//! Время двигается вручную: один FixedUpdate шаг на app.update().

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use creature_ai::*;

const PLAYER_FACTION: u64 = 1;
const MONSTER_FACTION: u64 = 2;

fn spawn_monster(world: &mut World, position: Vec3, attacker: Attacker, loadout: Loadout) -> Entity {
    world
        .spawn((
            Transform::from_translation(position),
            Actor {
                faction_id: MONSTER_FACTION,
            },
            Health::new(60),
            CreatureAi::new(CreatureKind::Monster),
            attacker,
            loadout,
            MotionStance::new(Stance::NonCombat),
            HomePosition(position),
            MovementSpeed { speed: 3.5 },
            FactionMob,
        ))
        .id()
}

fn main() {
    let seed = 42;
    println!("Starting creature AI headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    let world = app.world_mut();

    let player = world
        .spawn((
            Transform::from_xyz(0.0, 0.0, 0.0),
            Actor {
                faction_id: PLAYER_FACTION,
            },
            Health::new(500),
            Alerter,
        ))
        .id();

    let brute = spawn_monster(
        world,
        Vec3::new(8.0, 0.0, 4.0),
        Attacker {
            base_damage: 12,
            ..Default::default()
        },
        Loadout {
            equipped: Some(Weapon::melee("club", 2.0)),
            inventory: Vec::new(),
        },
    );

    let archer = spawn_monster(
        world,
        Vec3::new(-12.0, 0.0, 6.0),
        Attacker {
            base_damage: 8,
            attack_cooldown: 2.0,
            melee_weight: 0.2,
            missile_weight: 0.8,
            ..Default::default()
        },
        Loadout {
            equipped: Some(Weapon::launcher("shortbow", 25.0, 5)),
            inventory: vec![Weapon::melee("dagger", 1.5)],
        },
    );

    // 30 секунд симуляции
    for tick in 0..1800 {
        app.update();

        if tick % 300 == 0 {
            let world = app.world();
            let player_hp = world.get::<Health>(player).map(|h| h.current).unwrap_or(0);
            for (name, entity) in [("brute", brute), ("archer", archer)] {
                if let Some(ai) = world.get::<CreatureAi>(entity) {
                    println!(
                        "Tick {}: {} state={:?} awake={} type={:?} (player HP: {})",
                        tick,
                        name,
                        ai.monster_state(),
                        ai.awake,
                        ai.attack_type,
                        player_hp
                    );
                }
            }
        }
    }

    println!("Simulation complete!");
}
