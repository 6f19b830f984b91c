//! Property tests for the tick invariants.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use pacman_maze::{Config, GameState, Intent, Mover, Simulation};

fn intent(code: u8) -> Intent {
    match code {
        0 => Intent::Up,
        1 => Intent::Down,
        2 => Intent::Left,
        3 => Intent::Right,
        _ => Intent::Pause,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Lives never grow, score never shrinks and stays within the pellet count.
    #[test]
    fn prop_counters_are_monotonic(
        inputs in prop::collection::vec(0u8..5, 1..300),
        seed in any::<u64>(),
    ) {
        let mut sim = Simulation::with_pursuers(Config::default());
        let mut rng = StdRng::seed_from_u64(seed);
        let (mut lives, mut score) = (sim.lives(), sim.score());

        for code in inputs {
            sim.handle_input(&[intent(code)]);
            sim.tick(&mut rng);
            prop_assert!(sim.lives() <= lives);
            prop_assert!(sim.score() >= score);
            prop_assert!(sim.score() <= sim.total_pellets());
            prop_assert_eq!(sim.grid().total_pellets(), 306);
            lives = sim.lives();
            score = sim.score();
        }
    }

    /// Terminal states are absorbing.
    #[test]
    fn prop_terminal_state_is_final(
        inputs in prop::collection::vec(0u8..5, 1..100),
        seed in any::<u64>(),
    ) {
        let mut config = Config::default();
        config.lives = 1;
        let mut sim = Simulation::with_pursuers(config);
        let spawn = sim.config().pursuer_spawn;
        sim.player_mut().respawn(spawn);
        let mut rng = StdRng::seed_from_u64(seed);
        sim.tick(&mut rng);
        prop_assert_eq!(sim.state(), GameState::GameOver);

        let frozen = sim.snapshot();
        let player = sim.player().body().position;
        for code in inputs {
            sim.handle_input(&[intent(code)]);
            sim.tick(&mut rng);
            prop_assert_eq!(sim.state(), GameState::GameOver);
            prop_assert_eq!(sim.lives(), 0);
            prop_assert_eq!(&sim.snapshot(), &frozen);
            prop_assert_eq!(sim.player().body().position, player);
        }
    }

    /// The player never ends a tick inside a wall or on the pen gate.
    #[test]
    fn prop_player_stays_on_open_tiles(
        inputs in prop::collection::vec(0u8..4, 1..300),
        seed in any::<u64>(),
    ) {
        let mut sim = Simulation::new(Config::default());
        let mut rng = StdRng::seed_from_u64(seed);
        for code in inputs {
            sim.handle_input(&[intent(code)]);
            sim.tick(&mut rng);
            let tile = sim.player().body().current_tile();
            let kind = sim.grid().tile_at(tile.line, tile.column).unwrap();
            prop_assert!(!kind.blocks_player(), "player on {:?} at {:?}", kind, tile);
        }
    }
}
