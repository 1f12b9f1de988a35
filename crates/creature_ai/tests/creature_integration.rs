//! Creature AI integration test
//!
//! Headless мир: монстры против игрока-Alerter'а, время шагает вручную
//! (один FixedUpdate шаг на app.update()).
//!
//! Проверяем:
//! - пробуждение от Alerter'а и melee бой до урона
//! - атака никогда не исполняется вне max effective range
//! - leash → Return → дом → сон → Idle
//! - launcher без ammo → melee оружие

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use creature_ai::*;

const PLAYER_FACTION: u64 = 1;
const MONSTER_FACTION: u64 = 2;

/// Helper: полный App со всеми plugins и ручным временем
fn create_creature_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));
    app
}

fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((
            Transform::from_translation(position),
            Actor {
                faction_id: PLAYER_FACTION,
            },
            Health::new(1000),
            Alerter,
        ))
        .id()
}

fn spawn_monster(world: &mut World, position: Vec3, ai: CreatureAi, attacker: Attacker, loadout: Loadout) -> Entity {
    world
        .spawn((
            Transform::from_translation(position),
            Actor {
                faction_id: MONSTER_FACTION,
            },
            Health::new(100),
            ai,
            attacker,
            loadout,
            MotionStance::new(Stance::NonCombat),
            HomePosition(position),
        ))
        .id()
}

fn melee_loadout() -> Loadout {
    Loadout {
        equipped: Some(Weapon::melee("claws", 2.0)),
        inventory: Vec::new(),
    }
}

fn run(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

/// Записывает дистанцию каждой атаки в момент решения
#[derive(Resource, Default)]
struct AttackLog {
    attacks: usize,
    violations: Vec<(f32, f32)>,
}

fn record_attack_ranges(
    mut intents: EventReader<CreatureIntent>,
    creatures: Query<(&Transform, &CreatureAi)>,
    bodies: Query<&Transform>,
    mut log: ResMut<AttackLog>,
) {
    for intent in intents.read() {
        let CreatureIntent::Attack { attacker, target, .. } = *intent else {
            continue;
        };
        let (Ok((from, ai)), Ok(to)) = (creatures.get(attacker), bodies.get(target)) else {
            continue;
        };

        log.attacks += 1;
        let distance = from.translation.distance(to.translation);
        if distance > ai.max_effective_range + 1e-3 {
            log.violations.push((distance, ai.max_effective_range));
        }
    }
}

/// Test: спящий монстр просыпается от игрока, подходит и бьёт
#[test]
fn test_alerted_monster_closes_in_and_attacks() {
    let mut app = create_creature_app(42);
    app.init_resource::<AttackLog>().add_systems(
        FixedUpdate,
        record_attack_ranges
            .after(SimulationSet::Decide)
            .before(SimulationSet::Integrate),
    );

    let player = spawn_player(app.world_mut(), Vec3::ZERO);
    let monster = spawn_monster(
        app.world_mut(),
        Vec3::new(8.0, 0.0, 3.0),
        CreatureAi::new(CreatureKind::Monster),
        Attacker::default(),
        melee_loadout(),
    );

    // 10 секунд
    run(&mut app, 600);

    let ai = app.world().get::<CreatureAi>(monster).expect("monster has CreatureAi");
    assert!(ai.awake, "Alerter should wake the monster");
    assert_eq!(ai.attack_target, Some(player));
    assert_eq!(ai.monster_state(), MonsterState::Attacking);
    assert!(!ai.activation.is_pending());

    let health = app.world().get::<Health>(player).expect("player has Health");
    assert!(health.current < health.max, "monster never hit the player");

    let log = app.world().resource::<AttackLog>();
    assert!(log.attacks > 0);
    assert!(log.violations.is_empty(), "attacks out of range: {:?}", log.violations);
}

/// Test: archer и magic caster тоже не стреляют из-за пределов дистанции
#[test]
fn test_no_attack_beyond_effective_range() {
    let mut app = create_creature_app(7);
    app.init_resource::<AttackLog>().add_systems(
        FixedUpdate,
        record_attack_ranges
            .after(SimulationSet::Decide)
            .before(SimulationSet::Integrate),
    );

    spawn_player(app.world_mut(), Vec3::ZERO);
    for (i, distance) in [4.0_f32, 12.0, 19.0].into_iter().enumerate() {
        let angle = i as f32 * 2.0;
        let position = Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance);
        spawn_monster(
            app.world_mut(),
            position,
            CreatureAi::new(CreatureKind::Monster),
            Attacker {
                melee_weight: 1.0,
                missile_weight: 1.0,
                magic_weight: 1.0,
                magic_range: 8.0,
                ..Default::default()
            },
            Loadout {
                equipped: Some(Weapon::launcher("crossbow", 15.0, 3)),
                inventory: vec![Weapon::melee("knife", 1.5)],
            },
        );
    }

    run(&mut app, 900);

    let log = app.world().resource::<AttackLog>();
    assert!(log.attacks > 0);
    assert!(log.violations.is_empty(), "attacks out of range: {:?}", log.violations);
}

/// Test: ушёл за leash → Return → дома засыпает → Idle
#[test]
fn test_leash_returns_home_and_sleeps() {
    let mut app = create_creature_app(42);

    let player = spawn_player(app.world_mut(), Vec3::new(3.0, 0.0, 0.0));
    let home = Vec3::new(45.0, 0.0, 0.0);
    let monster = app
        .world_mut()
        .spawn((
            Transform::from_translation(Vec3::ZERO),
            Actor {
                faction_id: MONSTER_FACTION,
            },
            CreatureAi::awake(CreatureKind::Monster),
            MotionStance::new(Stance::Combat),
            HomePosition(home),
            MovementSpeed { speed: 10.0 },
        ))
        .id();

    // Первый тик (с учётом desync) замечает leash
    run(&mut app, 90);
    let ai = app.world().get::<CreatureAi>(monster).expect("monster has CreatureAi");
    assert_eq!(ai.monster_state(), MonsterState::Return);
    assert_eq!(ai.attack_type, None);

    // ~4.5 секунды пути + тики на засыпание
    run(&mut app, 600);

    let position = app.world().get::<Transform>(monster).map(|t| t.translation);
    let ai = app.world().get::<CreatureAi>(monster).expect("monster has CreatureAi");
    assert!(position.is_some_and(|p| p.distance(home) <= 1.0), "not home: {:?}", position);
    assert!(!ai.awake);
    assert_eq!(ai.monster_state(), MonsterState::Idle);

    // Return отключает бой: игрок рядом со стартом не получил ни одного удара
    let health = app.world().get::<Health>(player).expect("player has Health");
    assert_eq!(health.current, health.max);
}

/// Test: лучник расстреливает ammo и переходит на кинжал
#[test]
fn test_archer_switches_to_melee_when_out_of_ammo() {
    let mut app = create_creature_app(42);

    let player = spawn_player(app.world_mut(), Vec3::ZERO);
    let archer = spawn_monster(
        app.world_mut(),
        Vec3::new(10.0, 0.0, 0.0),
        CreatureAi::new(CreatureKind::Monster),
        Attacker {
            attack_cooldown: 1.0,
            melee_weight: 0.0,
            missile_weight: 1.0,
            ..Default::default()
        },
        Loadout {
            equipped: Some(Weapon::launcher("shortbow", 25.0, 2)),
            inventory: vec![Weapon::melee("dagger", 1.5)],
        },
    );

    run(&mut app, 900);

    let loadout = app.world().get::<Loadout>(archer).expect("archer has Loadout");
    assert_eq!(loadout.equipped.as_ref().map(|w| w.name.as_str()), Some("dagger"));
    let bow = loadout.inventory.iter().find(|w| w.name == "shortbow");
    assert_eq!(bow.map(|w| w.ammo), Some(0));

    let ai = app.world().get::<CreatureAi>(archer).expect("archer has CreatureAi");
    assert_eq!(ai.attack_type, Some(AttackType::Melee));

    // 2 стрелы + хотя бы один удар кинжалом
    let health = app.world().get::<Health>(player).expect("player has Health");
    assert!(health.max - health.current > 20, "HP: {}", health.current);
}

/// Test: combat pet перетягивает на себя врага, который бил владельца
#[test]
fn test_combat_pet_draws_aggro_from_owner() {
    let mut app = create_creature_app(42);

    let owner = spawn_player(app.world_mut(), Vec3::ZERO);
    let pet = app
        .world_mut()
        .spawn((
            Transform::from_xyz(2.0, 0.0, 0.0),
            Actor {
                faction_id: PLAYER_FACTION,
            },
            Health::new(200),
            CreatureAi::awake(CreatureKind::CombatPet { owner }),
            melee_loadout(),
            MotionStance::new(Stance::Combat),
            HomePosition(Vec3::new(2.0, 0.0, 0.0)),
        ))
        .id();

    let mut hostile_ai = CreatureAi::awake(CreatureKind::Monster);
    hostile_ai.attack_target = Some(owner);
    let hostile = spawn_monster(
        app.world_mut(),
        Vec3::new(5.0, 0.0, 0.0),
        hostile_ai,
        Attacker::default(),
        melee_loadout(),
    );

    // 3 секунды: pet успевает вступить в бой, враг успевает тикнуть после hint'а
    run(&mut app, 180);

    let ai = app.world().get::<CreatureAi>(hostile).expect("hostile has CreatureAi");
    assert_eq!(ai.attack_target, Some(pet));
}
