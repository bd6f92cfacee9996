//! End-to-end lockstep loop with scripted players.
//!
//! Demonstrates: build config → LockstepGame → issue orders → step → read
//! observations and metrics → reset → repeat.

use shoal_bench::{reference_config, SwarmPolicy};
use shoal_core::{PlayerId, Structure};
use shoal_engine::LockstepGame;

fn main() {
    println!("=== Shoal Lockstep Example ===\n");

    let mut game = LockstepGame::new(reference_config(42)).unwrap();
    let mut policy = SwarmPolicy::new(7);
    let players: Vec<PlayerId> = PlayerId::all(game.config().num_players).collect();

    println!("Episode 1: {} turns", game.turn_limit());
    while !game.is_finished() {
        let actions = policy.next_turn(game.world());
        let out = game.step(&actions).unwrap();
        let tick = out.observation.tick().0;

        if tick % 50 == 0 || out.finished {
            let world = game.world();
            let units: usize = players.iter().map(|&p| world.unit_count(p)).sum();
            let dropoffs: usize = players
                .iter()
                .map(|&p| world.structure_count(p, Structure::Dropoff))
                .sum();
            let banks: Vec<u64> = players.iter().map(|&p| out.observation.bank(p)).collect();
            println!(
                "  tick {:>3}: units={:>4}, dropoffs={:>2}, banks={:?}, destroyed={:>3}, time={:>6}μs",
                tick, units, dropoffs, banks, out.metrics.units_destroyed, out.metrics.total_us,
            );
        }
    }

    println!("\nResetting game...");
    game.reset(99).unwrap();

    println!("Episode 2: 50 idle turns");
    let idle = Default::default();
    for _ in 0..50 {
        let out = game.step(&idle).unwrap();
        let tick = out.observation.tick().0;
        if tick % 10 == 0 {
            println!(
                "  tick {:>3}: floor={:>8}, time={:>6}μs",
                tick,
                game.world().total_resource(),
                out.metrics.total_us,
            );
        }
    }

    println!("\nFinal tick: {}", game.current_tick().0);
    println!("Done.");
}
