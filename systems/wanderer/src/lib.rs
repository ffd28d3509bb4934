#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded random-walk agent that only proposes moves the board would accept.

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tile_puzzle_core::{Action, Agent, Direction, Observation, Tile};

/// Configuration parameters required to construct the wanderer.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
    avoid_fire: bool,
}

impl Config {
    /// Creates a configuration that seeds the walk with `rng_seed`.
    ///
    /// Fires are avoided while the player carries no extinguisher.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            avoid_fire: true,
        }
    }

    /// Allows the wanderer to walk into fire without an extinguisher.
    #[must_use]
    pub const fn reckless(mut self) -> Self {
        self.avoid_fire = false;
        self
    }
}

/// Agent that picks uniformly among the neighbours it is allowed to enter.
#[derive(Debug)]
pub struct Wanderer {
    rng: ChaCha8Rng,
    avoid_fire: bool,
}

impl Wanderer {
    /// Creates a new wanderer using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            avoid_fire: config.avoid_fire,
        }
    }

    fn open_directions(&self, observation: &Observation) -> Vec<Direction> {
        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|direction| admits(observation, *direction))
            .collect();

        if !self.avoid_fire || observation.inventory.extinguishers > 0 {
            return open;
        }

        let safe: Vec<Direction> = open
            .iter()
            .copied()
            .filter(|direction| neighbour(observation, *direction) != Some(Tile::Fire))
            .collect();
        if safe.is_empty() {
            open
        } else {
            safe
        }
    }
}

impl Agent for Wanderer {
    fn decide(&mut self, observation: &Observation) -> Action {
        let open = self.open_directions(observation);
        open.choose(&mut self.rng)
            .map_or(Action::None, |direction| Action::from(*direction))
    }
}

fn neighbour(observation: &Observation, direction: Direction) -> Option<Tile> {
    let cell = observation.player.step(direction)?;
    observation.code_at(cell).map(|code| code.terrain())
}

/// Whether stepping in `direction` would be accepted by the move resolver.
///
/// Doors count as open when a key is carried, since spending it is progress.
fn admits(observation: &Observation, direction: Direction) -> bool {
    match neighbour(observation, direction) {
        None | Some(Tile::Wall) => false,
        Some(Tile::Door) => observation.inventory.keys > 0,
        Some(Tile::Arrow(heading)) => heading != direction.opposite(),
        Some(_) => true,
    }
}
