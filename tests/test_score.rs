use asteroids_arena::score::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn starts_with_three_lives_and_full_shield() {
    let s = ScoreKeeper::new();
    assert_eq!(s.score, 0);
    assert_eq!(s.lives, 3);
    assert_eq!(s.shield_charge, 100.0);
    assert_eq!(s.shield_max, 100);
}

#[test]
fn add_score_accumulates() {
    let mut s = ScoreKeeper::new();
    s.add_score(10);
    s.add_score(50);
    assert_eq!(s.score, 60);
}

#[test]
fn lives_go_up_and_down() {
    let mut s = ScoreKeeper::new();
    s.add_life();
    assert_eq!(s.lives, 4);
    s.lose_life();
    s.lose_life();
    assert_eq!(s.lives, 2);
    assert!(!s.is_out_of_lives());
}

#[test]
fn lose_life_saturates_at_zero() {
    let mut s = ScoreKeeper::new();
    s.lives = 0;
    s.lose_life();
    assert_eq!(s.lives, 0);
    assert!(s.is_out_of_lives());
}

#[test]
fn drain_stops_at_zero() {
    let mut s = ScoreKeeper::new();
    s.shield_charge = 0.5;
    s.drain_shield();
    assert_eq!(s.shield_charge, 0.0);
    s.drain_shield();
    assert_eq!(s.shield_charge, 0.0);
}

#[test]
fn recharge_stops_at_max() {
    let mut s = ScoreKeeper::new();
    s.shield_charge = 99.9;
    s.recharge_shield();
    assert_eq!(s.shield_charge, 100.0);
    s.recharge_shield();
    assert_eq!(s.shield_charge, 100.0);
}

#[test]
fn recharge_step_is_a_quarter() {
    let mut s = ScoreKeeper::new();
    s.shield_charge = 40.0;
    s.recharge_shield();
    assert_eq!(s.shield_charge, 40.25);
}

#[test]
fn capacity_raises_recharge_ceiling() {
    let mut s = ScoreKeeper::new();
    s.add_capacity();
    assert_eq!(s.shield_max, 110);
    for _ in 0..100 {
        s.recharge_shield();
    }
    assert_eq!(s.shield_charge, 110.0);
}

#[test]
fn charge_stays_in_range_for_any_sequence() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut s = ScoreKeeper::new();
    for _ in 0..5_000 {
        match rng.gen_range(0..3) {
            0 => s.drain_shield(),
            1 => s.recharge_shield(),
            _ => {
                if rng.gen_ratio(1, 50) {
                    s.add_capacity();
                }
            }
        }
        assert!(s.shield_charge >= 0.0);
        assert!(s.shield_charge <= s.shield_max as f32);
    }
}
