//! Integration test: resource conservation under random play.
//!
//! Every tick of a random rollout must keep the board consistent and the
//! resource total equal to what the ledger predicts from the tick's
//! sources (inspiration bonus) and sinks (spawn and dropoff costs).

use proptest::prelude::*;
use shoal_engine::{GameConfig, LockstepGame};
use shoal_space::MapSize;
use shoal_test_utils::{tiny_config, RandomAgents, ResourceLedger};

fn rollout(config: GameConfig, agent_seed: u64, turns: u32) {
    let constants = config.constants.clone();
    let mut game = LockstepGame::new(config).unwrap();
    let mut agents = RandomAgents::new(agent_seed);
    let mut ledger = ResourceLedger::open(game.world(), &constants);

    for turn in 0..turns {
        let actions = agents.next_turn(game.world());
        let out = game.step(&actions).unwrap();
        ledger.record(&out.metrics);

        if let Err(v) = game.world().check_invariants() {
            panic!("turn {turn}: {v}");
        }
        if let Err((expected, actual)) = ledger.check(game.world()) {
            panic!("turn {turn}: expected {expected} resource, found {actual}");
        }
        if out.finished {
            break;
        }
    }
}

#[test]
fn two_player_rollout_conserves() {
    rollout(tiny_config(11), 3, 120);
}

#[test]
fn four_player_rollout_conserves() {
    let config = GameConfig {
        num_players: 4,
        map_size: MapSize::Small,
        ..tiny_config(21)
    };
    rollout(config, 8, 80);
}

#[test]
fn rich_banks_conserve_through_many_spawns() {
    let mut config = tiny_config(5);
    config.constants.starting_bank = 50_000;
    rollout(config, 13, 60);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn random_rollouts_conserve(map_seed in any::<u64>(), agent_seed in any::<u64>()) {
        rollout(tiny_config(map_seed), agent_seed, 40);
    }
}
