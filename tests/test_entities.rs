use asteroids_arena::entities::*;
use asteroids_arena::field::Field;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[test]
fn ship_starts_centred_facing_up() {
    let ship = Ship::new(&Field::default());
    assert_eq!((ship.x, ship.y), (320.0, 240.0));
    assert_eq!(ship.angle, 90);
    assert_eq!(ship.speed, 0.0);
    assert!(ship.alive);
}

#[test]
fn ship_rotation_steps_quarter_turns() {
    let mut ship = Ship::new(&Field::default());
    ship.rotate_left();
    assert_eq!(ship.angle, 180);
    ship.rotate_right();
    ship.rotate_right();
    assert_eq!(ship.angle, 0);
    ship.rotate_right();
    assert_eq!(ship.angle, 270); // -90 folds to 270
    ship.rotate_left();
    ship.rotate_left();
    assert_eq!(ship.angle, 90); // 450 folds to 90
}

#[test]
fn ship_angle_stays_cardinal_for_any_rotation_sequence() {
    let mut rng = seeded_rng();
    let mut ship = Ship::new(&Field::default());
    for _ in 0..1_000 {
        if rng.gen_bool(0.5) {
            ship.rotate_left();
        } else {
            ship.rotate_right();
        }
        assert!([0, 90, 180, 270].contains(&ship.angle));
    }
}

#[test]
fn ship_thrust_caps_at_five() {
    let mut ship = Ship::new(&Field::default());
    for _ in 0..7 {
        ship.thrust();
    }
    assert_eq!(ship.speed, 5.0);
}

#[test]
fn ship_moves_along_heading_then_decays() {
    let field = Field::default();
    let mut ship = Ship::new(&field);
    ship.thrust();
    ship.thrust();
    ship.tick_physics(&field);
    assert_eq!((ship.x, ship.y), (320.0, 238.0));
    assert_eq!(ship.speed, 1.75);

    ship.rotate_right(); // now facing 0, i.e. right
    ship.tick_physics(&field);
    assert_eq!((ship.x, ship.y), (321.75, 238.0));
    assert_eq!(ship.speed, 1.5);
}

#[test]
fn ship_speed_never_goes_negative() {
    let field = Field::default();
    let mut ship = Ship::new(&field);
    ship.speed = 0.1;
    ship.tick_physics(&field);
    assert_eq!(ship.speed, 0.0);
    ship.tick_physics(&field);
    assert_eq!(ship.speed, 0.0);
}

#[test]
fn ship_wraps_across_right_edge() {
    let field = Field::default();
    let mut ship = Ship::new(&field);
    ship.x = 638.0;
    ship.angle = 0;
    ship.speed = 5.0;
    ship.tick_physics(&field);
    assert_eq!(ship.x, 0.0);
}

#[test]
fn ship_reset_restores_start_pose() {
    let field = Field::default();
    let mut ship = Ship::new(&field);
    ship.x = 12.0;
    ship.y = 400.0;
    ship.angle = 270;
    ship.speed = 4.0;
    ship.reset(&field);
    assert_eq!((ship.x, ship.y, ship.angle, ship.speed), (320.0, 240.0, 90, 0.0));
}

#[test]
fn ship_kill_marks_dead() {
    let mut ship = Ship::new(&Field::default());
    ship.kill();
    assert!(!ship.alive);
}

// ── Asteroid ──────────────────────────────────────────────────────────────────

#[test]
fn roll_velocity_never_has_a_zero_axis() {
    let mut rng = seeded_rng();
    for limit in 1..=6 {
        for _ in 0..500 {
            let (dx, dy) = roll_velocity(&mut rng, limit);
            assert!(dx != 0 && dy != 0);
            assert!(dx.abs() <= limit && dy.abs() <= limit);
        }
    }
}

#[test]
fn asteroid_spawns_below_field_as_size_one() {
    let field = Field::default();
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let a = Asteroid::spawn(&field, &mut rng);
        assert_eq!(a.y, 500.0);
        assert!((0.0..=640.0).contains(&a.x));
        assert_eq!(a.size, 1);
        assert!(a.alive);
        assert!(a.dx != 0 && a.dy != 0);
        assert!(a.dx.abs() <= 2 && a.dy.abs() <= 2);
    }
}

#[test]
fn asteroid_two_hits_leave_last_fragment() {
    let mut rng = seeded_rng();
    let mut a = Asteroid::spawn(&Field::default(), &mut rng);
    a.on_hit(&mut rng);
    assert_eq!(a.size, 2);
    assert!(a.dx.abs() <= 4 && a.dy.abs() <= 4);
    a.on_hit(&mut rng);
    assert_eq!(a.size, 3);
    assert!(a.alive);
    assert!(a.dx != 0 && a.dy != 0);
}

#[test]
fn asteroid_third_hit_destroys() {
    let mut rng = seeded_rng();
    let mut a = Asteroid::spawn(&Field::default(), &mut rng);
    for _ in 0..3 {
        a.on_hit(&mut rng);
    }
    assert!(!a.alive);
    assert_eq!(a.size, 3); // no further size increment
}

#[test]
fn asteroid_hit_keeps_centre() {
    let mut rng = seeded_rng();
    let mut a = Asteroid {
        x: 100.0,
        y: 200.0,
        dx: 1,
        dy: 1,
        size: 1,
        alive: true,
    };
    a.on_hit(&mut rng);
    assert_eq!((a.x, a.y), (100.0, 200.0));
}

#[test]
fn asteroid_box_shrinks_per_size() {
    let mut a = Asteroid {
        x: 0.0,
        y: 0.0,
        dx: 1,
        dy: 1,
        size: 1,
        alive: true,
    };
    assert_eq!(a.extent(), (69.0, 65.0));
    a.size = 2;
    assert_eq!(a.extent(), (59.0, 55.0));
    a.size = 3;
    assert_eq!(a.extent(), (49.0, 45.0));
}

#[test]
fn asteroid_drifts_and_wraps() {
    let field = Field::default();
    let mut a = Asteroid {
        x: 639.0,
        y: 100.0,
        dx: 2,
        dy: -1,
        size: 1,
        alive: true,
    };
    a.tick_physics(&field);
    assert_eq!((a.x, a.y), (0.0, 99.0));
}

#[test]
fn asteroid_respawn_keeps_size() {
    let mut rng = seeded_rng();
    let mut a = Asteroid {
        x: 10.0,
        y: 10.0,
        dx: 1,
        dy: 1,
        size: 3,
        alive: true,
    };
    a.respawn(&Field::default(), &mut rng);
    assert_eq!(a.size, 3);
    assert_eq!(a.y, 500.0);
}

// ── UFO ───────────────────────────────────────────────────────────────────────

fn ufo_at(x: f32, y: f32) -> Ufo {
    Ufo { x, y, dx: 1, dy: 1 }
}

#[test]
fn ufo_spawns_near_top_moving() {
    let field = Field::default();
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let u = Ufo::spawn(&field, &mut rng);
        assert_eq!(u.y, 20.0);
        assert!((0.0..=640.0).contains(&u.x));
        assert!(u.dx != 0 && u.dy != 0);
        assert!(u.dx.abs() <= 5 && u.dy.abs() <= 5);
    }
}

#[test]
fn ufo_vertical_alignment_wins() {
    // Within range on both axes: column check comes first
    let u = ufo_at(300.0, 100.0);
    assert_eq!(u.alignment(320.0, 120.0), Alignment::Vertical);
}

#[test]
fn ufo_horizontal_alignment() {
    let u = ufo_at(300.0, 100.0);
    assert_eq!(u.alignment(500.0, 120.0), Alignment::Horizontal);
}

#[test]
fn ufo_no_alignment() {
    let u = ufo_at(300.0, 100.0);
    assert_eq!(u.alignment(500.0, 400.0), Alignment::None);
    assert_eq!(u.firing_angle(500.0, 400.0), None);
}

#[test]
fn ufo_alignment_range_is_exclusive() {
    let u = ufo_at(300.0, 100.0);
    assert_eq!(u.alignment(375.0, 400.0), Alignment::None);
    assert_eq!(u.alignment(374.0, 400.0), Alignment::Vertical);
}

#[test]
fn ufo_fires_toward_ship_vertically() {
    let u = ufo_at(320.0, 100.0);
    assert_eq!(u.firing_angle(320.0, 240.0), Some(270)); // ship below → down
    let u = ufo_at(320.0, 300.0);
    assert_eq!(u.firing_angle(320.0, 240.0), Some(90)); // ship above → up
}

#[test]
fn ufo_fires_toward_ship_horizontally() {
    let u = ufo_at(300.0, 100.0);
    assert_eq!(u.firing_angle(100.0, 120.0), Some(180)); // ship left
    assert_eq!(u.firing_angle(500.0, 120.0), Some(0)); // ship right
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[test]
fn projectile_travels_eight_per_tick() {
    let field = Field::default();
    let mut p = Projectile::new(90, 320.0, 240.0, Owner::Player);
    for _ in 0..7 {
        p.tick_physics(&field);
    }
    assert_eq!((p.x, p.y), (320.0, 184.0)); // 240 - 8 * 7
    assert_eq!(p.distance, 7);
    assert!(p.alive);
}

#[test]
fn projectile_dies_on_tick_fifty_one() {
    let field = Field::default();
    let mut p = Projectile::new(90, 320.0, 240.0, Owner::Player);
    for _ in 0..50 {
        p.tick_physics(&field);
    }
    assert!(p.alive);
    p.tick_physics(&field);
    assert!(!p.alive);
    assert_eq!(p.distance, 51);
}

#[test]
fn projectile_range_ignores_wraps() {
    // Starting at the edge it wraps several times before running out
    let field = Field::default();
    let mut p = Projectile::new(0, 635.0, 10.0, Owner::Ufo);
    p.tick_physics(&field);
    assert_eq!(p.x, 0.0);
    for _ in 1..51 {
        p.tick_physics(&field);
    }
    assert!(!p.alive);
}

#[test]
fn projectile_normalizes_angle() {
    let p = Projectile::new(-90, 0.0, 0.0, Owner::Ufo);
    assert_eq!(p.angle, 270);
}

#[test]
fn owner_friendliness() {
    assert!(Owner::Player.is_friendly());
    assert!(!Owner::Ufo.is_friendly());
}

// ── Shield & powerups ─────────────────────────────────────────────────────────

#[test]
fn shield_follows_and_collapses_when_empty() {
    let field = Field::default();
    let mut s = Shield::new(10.0, 10.0, 60.0);
    s.follow(320.0, 240.0);
    assert_eq!(s.bounds().cx, 320.0);
    s.tick_physics(&field);
    assert!(s.alive);
    s.set_capacity(0.0);
    s.tick_physics(&field);
    assert!(!s.alive);
}

#[test]
fn powerup_roll_mapping() {
    assert_eq!(PowerupKind::from_roll(1), Some(PowerupKind::ShieldCapacity));
    assert_eq!(PowerupKind::from_roll(2), Some(PowerupKind::ExtraLife));
    assert_eq!(PowerupKind::from_roll(3), Some(PowerupKind::ScoreBonus));
    assert_eq!(PowerupKind::from_roll(4), None);
    assert_eq!(PowerupKind::from_roll(5), None);
    for roll in 1..=3 {
        assert_eq!(PowerupKind::from_roll(roll).map(|k| k.code()), Some(roll));
    }
}
