//! End-to-end scene behaviour against the headless recording backend

use pellet_chase::config::WallConfig;
use pellet_chase::entities::EntityKind;
use pellet_chase::{GameConfig, Scene};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scene_engine::assets::AssetError;
use scene_engine::foundation::math::Vec3;
use scene_engine::input::{InputState, KeyCode, ScriptedInput};
use scene_engine::render::RecordingRenderer;

/// Defaults with a seeded spawner and no walls
fn seeded_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.spawner.seed = Some(7);
    config.walls.clear();
    config
}

/// Seeded config whose spawner never fires
fn quiet_config() -> GameConfig {
    let mut config = seeded_config();
    config.spawner.interval = 1.0e6;
    config
}

fn build(config: GameConfig, renderer: &mut RecordingRenderer) -> Scene {
    let camera = config.camera.build(16.0 / 9.0);
    let mut scene = Scene::new(config, camera);
    scene.populate(renderer).unwrap();
    scene
}

fn random_input(rng: &mut StdRng) -> InputState {
    let mut input = InputState::new();
    for key in [KeyCode::Left, KeyCode::Right, KeyCode::Up, KeyCode::Down] {
        input.set_key(key, rng.gen_bool(0.3));
    }
    input
}

fn player_position(scene: &Scene) -> Vec3 {
    scene.player().unwrap().position()
}

#[test]
fn pellet_counter_matches_live_pellets_every_tick() {
    let mut renderer = RecordingRenderer::new();
    let mut config = GameConfig::default();
    config.spawner.seed = Some(11);
    let mut scene = build(config, &mut renderer);
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..400 {
        scene.set_input(random_input(&mut rng));
        scene.update(0.05, &mut renderer).unwrap();
        assert_eq!(scene.live_pellets(), scene.count_live_pellets());
        assert!(scene.live_pellets() <= 10);
    }
}

#[test]
fn spawner_never_exceeds_the_cap() {
    let mut renderer = RecordingRenderer::new();
    let mut scene = build(seeded_config(), &mut renderer);
    let mut most = 0;

    for _ in 0..200 {
        scene.update(0.02, &mut renderer).unwrap();
        most = most.max(scene.count_live_pellets());
        assert!(scene.count_live_pellets() <= 10);
    }
    assert!(most > 0);
}

#[test]
fn spawner_fills_the_last_slot_then_stops() {
    let mut renderer = RecordingRenderer::new();
    let mut config = seeded_config();
    config.spawner.region.min_x = 7.0;
    config.spawner.region.max_x = 7.5;
    config.spawner.region.min_y = -5.0;
    config.spawner.region.max_y = -4.5;
    config.player.start_position = Vec3::new(0.0, 7.0, 0.0);
    let mut scene = build(config, &mut renderer);

    for i in 0..9u8 {
        let x = -6.0 + f32::from(i) * 1.2;
        scene.spawn_pellet(Vec3::new(x, 3.0, 0.0), &mut renderer).unwrap();
    }
    assert_eq!(scene.live_pellets(), 9);

    scene.update(0.02, &mut renderer).unwrap();
    assert_eq!(scene.live_pellets(), 10);
    assert_eq!(scene.count_live_pellets(), 10);

    scene.update(0.5, &mut renderer).unwrap();
    assert_eq!(scene.live_pellets(), 10);
    assert_eq!(scene.count_live_pellets(), 10);
}

#[test]
fn player_stays_inside_the_play_area() {
    let mut renderer = RecordingRenderer::new();
    let config = quiet_config();
    let area = config.play_area;
    let mut scene = build(config, &mut renderer);
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..500 {
        scene.set_input(random_input(&mut rng));
        scene.update(0.1, &mut renderer).unwrap();
        assert!(area.contains(&player_position(&scene)));
    }
}

#[test]
fn holding_a_key_runs_into_the_boundary() {
    let mut renderer = RecordingRenderer::new();
    let mut scene = build(quiet_config(), &mut renderer);
    scene.set_input(InputState::new().with_pressed(KeyCode::Down));

    for _ in 0..100 {
        scene.update(0.05, &mut renderer).unwrap();
    }
    let y = player_position(&scene).y;
    assert!(y >= -5.0);
    assert!(y > -5.0 - 0.5 && y <= -4.5);
}

#[test]
fn edge_player_takes_the_next_pressed_direction() {
    let mut renderer = RecordingRenderer::new();
    let mut config = quiet_config();
    config.player.start_position = Vec3::new(7.5, 0.0, 0.0);
    let mut scene = build(config, &mut renderer);
    let input = InputState::new()
        .with_pressed(KeyCode::Left)
        .with_pressed(KeyCode::Up);
    scene.set_input(input);

    scene.update(0.1, &mut renderer).unwrap();

    let position = player_position(&scene);
    assert_eq!(position.x, 7.5);
    assert!((position.y - 1.0).abs() < 1e-6);
}

#[test]
fn overlapping_pellets_merge_into_one() {
    let mut renderer = RecordingRenderer::new();
    let mut config = quiet_config();
    config.player.start_position = Vec3::new(6.0, 6.0, 0.0);
    let mut scene = build(config, &mut renderer);

    scene.spawn_pellet(Vec3::new(0.0, 0.0, 0.0), &mut renderer).unwrap();
    scene.spawn_pellet(Vec3::new(0.5, 0.0, 0.0), &mut renderer).unwrap();
    scene.spawn_pellet(Vec3::new(-4.0, 0.0, 0.0), &mut renderer).unwrap();
    scene.spawn_pellet(Vec3::new(-3.0, 0.0, 0.0), &mut renderer).unwrap();

    scene.update(0.016, &mut renderer).unwrap();

    let pellets: Vec<Vec3> = scene
        .entities()
        .iter()
        .filter_map(|entity| entity.as_pellet())
        .map(|pellet| pellet.position())
        .collect();
    assert_eq!(
        pellets,
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(-4.0, 0.0, 0.0),
            Vec3::new(-3.0, 0.0, 0.0),
        ]
    );
    assert_eq!(scene.live_pellets(), 3);
}

#[test]
fn wall_blocks_approach_and_allows_retreat() {
    let mut renderer = RecordingRenderer::new();
    let mut config = quiet_config();
    config.player.radius_factor = 0.9;
    config.walls = vec![WallConfig {
        radius_factor: 0.3,
        ..WallConfig::at(Vec3::new(1.0, 0.0, 0.0))
    }];
    let mut scene = build(config, &mut renderer);

    // Left moves towards +x, into the wall
    scene.set_input(InputState::new().with_pressed(KeyCode::Left));
    scene.update(0.01, &mut renderer).unwrap();
    assert_eq!(player_position(&scene).x, 0.0);

    scene.set_input(InputState::new().with_pressed(KeyCode::Right));
    scene.update(0.01, &mut renderer).unwrap();
    assert!(player_position(&scene).x < 0.0);
}

#[test]
fn player_collects_a_touching_pellet() {
    let mut renderer = RecordingRenderer::new();
    let mut config = quiet_config();
    config.player.start_position = Vec3::new(0.0, 0.2, 0.0);
    let mut scene = build(config, &mut renderer);
    scene.spawn_pellet(Vec3::zeros(), &mut renderer).unwrap();
    assert_eq!(scene.live_pellets(), 1);

    scene.update(0.016, &mut renderer).unwrap();

    assert_eq!(scene.score(), 1);
    assert_eq!(scene.live_pellets(), 0);
    assert_eq!(scene.count_live_pellets(), 0);
}

#[test]
fn pellet_before_player_is_counted_once() {
    let mut renderer = RecordingRenderer::new();
    let mut config = quiet_config();
    config.player.start_position = Vec3::new(0.0, 0.2, 0.0);
    let camera = config.camera.build(1.0);
    let mut scene = Scene::new(config, camera);
    scene.spawn_pellet(Vec3::zeros(), &mut renderer).unwrap();
    scene.populate(&mut renderer).unwrap();

    scene.update(0.016, &mut renderer).unwrap();

    assert_eq!(scene.score(), 1);
    assert_eq!(scene.live_pellets(), 0);
}

#[test]
fn background_is_drawn_first_and_spawner_never() {
    let mut renderer = RecordingRenderer::new();
    let mut config = GameConfig::default();
    config.spawner.seed = Some(3);
    let camera = config.camera.build(1.0);
    let mut scene = Scene::new(config, camera);
    // A pellet ahead of the backdrop in collection order
    scene.spawn_pellet(Vec3::new(5.0, 5.0, 0.0), &mut renderer).unwrap();
    scene.populate(&mut renderer).unwrap();
    let mut input = ScriptedInput::new();

    for _ in 0..5 {
        scene.tick(&mut input, &mut renderer, 0.02).unwrap();
    }

    let frame = renderer.last_frame();
    assert_eq!(
        renderer.texture_name(frame[0].resources.texture),
        Some("background.png")
    );
    let drawable = scene
        .entities()
        .iter()
        .filter(|entity| entity.kind() != EntityKind::Spawner)
        .count();
    assert_eq!(frame.len(), drawable);
    assert_eq!(renderer.frames_presented(), 5);
}

#[test]
fn merged_pellets_are_not_drawn() {
    let mut renderer = RecordingRenderer::new();
    let mut config = quiet_config();
    config.player.start_position = Vec3::new(6.0, 6.0, 0.0);
    let mut scene = build(config, &mut renderer);
    scene.spawn_pellet(Vec3::zeros(), &mut renderer).unwrap();
    scene.spawn_pellet(Vec3::new(0.1, 0.0, 0.0), &mut renderer).unwrap();
    let mut input = ScriptedInput::new();

    scene.tick(&mut input, &mut renderer, 0.016).unwrap();

    let pellet_draws = renderer
        .last_frame()
        .iter()
        .filter(|draw| renderer.mesh_name(draw.resources.mesh) == Some("food.obj"))
        .count();
    assert_eq!(pellet_draws, 1);
}

#[test]
fn each_kind_loads_its_resources_once() {
    let mut renderer = RecordingRenderer::new();
    let mut scene = build(GameConfig::default(), &mut renderer);
    for i in 0..6u8 {
        let x = -6.0 + f32::from(i) * 2.0;
        scene.spawn_pellet(Vec3::new(x, -3.0, 0.0), &mut renderer).unwrap();
    }
    for _ in 0..50 {
        scene.update(0.02, &mut renderer).unwrap();
    }

    let food_loads = renderer
        .load_requests()
        .iter()
        .filter(|name| name.as_str() == "food.obj")
        .count();
    assert_eq!(food_loads, 1);
    assert_eq!(scene.resources().load_count(), 4);

    let pellets: Vec<_> = scene
        .entities()
        .iter()
        .filter_map(|entity| entity.as_pellet())
        .map(|pellet| *pellet.resources())
        .collect();
    assert!(pellets.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn missing_player_asset_aborts_population() {
    let mut renderer = RecordingRenderer::new().with_missing_asset("pacman.obj");
    let config = quiet_config();
    let camera = config.camera.build(1.0);
    let mut scene = Scene::new(config, camera);

    let result = scene.populate(&mut renderer);

    assert!(matches!(result, Err(AssetError::NotFound(name)) if name == "pacman.obj"));
    assert!(scene.player().is_none());
}

#[test]
fn missing_pellet_asset_fails_the_first_spawn() {
    let mut renderer = RecordingRenderer::new().with_missing_asset("food.obj");
    let mut scene = build(seeded_config(), &mut renderer);

    let result = scene.update(0.02, &mut renderer);

    assert!(matches!(result, Err(AssetError::NotFound(_))));
}

#[test]
fn teardown_releases_shared_resources() {
    let mut renderer = RecordingRenderer::new();
    let mut scene = build(GameConfig::default(), &mut renderer);
    scene.update(0.02, &mut renderer).unwrap();
    assert!(renderer.live_resources() > 0);

    scene.teardown(&mut renderer);

    assert_eq!(renderer.live_resources(), 0);
}
