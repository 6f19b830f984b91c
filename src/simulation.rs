use log::{debug, error, info};
use rand::Rng;

use crate::config::Config;
use crate::entity::{Drawable, Mover};
use crate::error::{Error, Result};
use crate::grid::{Direction, Grid, TileIndex};
use crate::input::{Flow, Intent};
use crate::player::Player;
use crate::pursuer::Pursuer;
use crate::render::Frame;
use crate::snapshot::Snapshot;

/// Open neighbours that make a tile an intersection.
pub const INTERSECTION: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
    Victory,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::GameOver | GameState::Victory)
    }

    pub fn label(self) -> Option<&'static str> {
        match self {
            GameState::Playing => None,
            GameState::Paused => Some("P A U S E D"),
            GameState::GameOver => Some("GAME OVER"),
            GameState::Victory => Some("VICTORY"),
        }
    }
}

/// Which entity a step of the tick is resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Player,
    Pursuer(usize),
}

#[derive(Debug, Clone)]
pub struct Simulation {
    config: Config,
    grid: Grid,
    player: Player,
    pursuers: Vec<Pursuer>,
    score: u32,
    lives: u32,
    state: GameState,
    total_pellets: u32,
}

impl Simulation {
    /// Fresh maze with the player at its spawn and no pursuers.
    pub fn new(config: Config) -> Self {
        let grid = Grid::new();
        let total_pellets = grid.total_pellets() as u32;
        let player = Player::new(config.player_spawn, config.player_speed);
        Self {
            lives: config.lives,
            config,
            grid,
            player,
            pursuers: Vec::new(),
            score: 0,
            state: GameState::Playing,
            total_pellets,
        }
    }

    /// Fresh maze with one pursuer per configured colour.
    pub fn with_pursuers(config: Config) -> Self {
        let mut sim = Self::new(config);
        let pursuers: Vec<Pursuer> = sim
            .config
            .pursuer_colors
            .iter()
            .map(|&color| {
                Pursuer::new(
                    sim.config.pursuer_spawn,
                    sim.config.pursuer_heading,
                    sim.config.pursuer_speed,
                    color,
                )
            })
            .collect();
        for pursuer in pursuers {
            sim.add_pursuer(pursuer);
        }
        sim
    }

    pub fn add_pursuer(&mut self, pursuer: Pursuer) {
        self.pursuers.push(pursuer);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn pursuers(&self) -> &[Pursuer] {
        &self.pursuers
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn total_pellets(&self) -> u32 {
        self.total_pellets
    }

    /// Applies one poll's worth of intents in arrival order.
    pub fn handle_input(&mut self, intents: &[Intent]) -> Flow {
        for &intent in intents {
            match intent {
                Intent::Quit => return Flow::Quit,
                Intent::Pause => self.toggle_pause(),
                _ => {
                    if let Some(dir) = intent.direction() {
                        self.player.steer(dir);
                    }
                }
            }
        }
        Flow::Continue
    }

    /// Playing <-> Paused; terminal states ignore it.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            terminal => terminal,
        };
        debug!("pause toggled, state is now {:?}", self.state);
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.state != GameState::Playing {
            return;
        }
        let actors = std::iter::once(Actor::Player)
            .chain((0..self.pursuers.len()).map(Actor::Pursuer))
            .collect::<Vec<_>>();
        for actor in actors {
            match actor {
                Actor::Player => self.step_player(rng),
                Actor::Pursuer(idx) => self.step_pursuer(idx, rng),
            }
            if self.state.is_terminal() {
                break;
            }
        }
    }

    fn step_player<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let from = self.player.body().current_tile();
        self.player.compute_intention();
        let legal = self.grid.legal_neighbors(from);
        if legal.len() >= INTERSECTION {
            self.player.choose_path(&legal, rng);
        }
        if resolve(&self.grid, &mut self.player, &legal, rng) {
            self.eat(from);
        }
    }

    fn step_pursuer<R: Rng + ?Sized>(&mut self, idx: usize, rng: &mut R) {
        let player_tile = self.player.body().current_tile();
        let pursuer = &mut self.pursuers[idx];
        let from = pursuer.body().current_tile();
        pursuer.compute_intention();
        let legal = self.grid.legal_neighbors(from);
        if legal.len() >= INTERSECTION {
            pursuer.choose_path(&legal, rng);
        }
        if from == player_tile {
            self.caught(idx);
            return;
        }
        resolve(&self.grid, pursuer, &legal, rng);
    }

    fn caught(&mut self, idx: usize) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.state = GameState::GameOver;
            info!("caught by pursuer {idx}; game over with score {}", self.score);
        } else {
            self.player.respawn(self.config.player_spawn);
            info!("caught by pursuer {idx}; {} lives left", self.lives);
        }
    }

    fn eat(&mut self, at: TileIndex) {
        match self.grid.consume_pellet_at(at.line, at.column) {
            Ok(true) => {
                self.score += 1;
                if self.score >= self.total_pellets {
                    self.state = GameState::Victory;
                    info!("all {} pellets eaten", self.total_pellets);
                }
            }
            Ok(false) => {}
            Err(err) => defect(&err),
        }
    }

    /// Snapshot for the renderer. Advances the cosmetic mouth animation.
    pub fn frame(&mut self) -> Frame {
        let tile_size = self.config.tile_size;
        self.player.advance_mouth(tile_size);
        let sprites = std::iter::once(self.player.sprite(tile_size))
            .chain(self.pursuers.iter().map(|p| p.sprite(tile_size)))
            .collect();
        Frame {
            tiles: self.grid.rows().to_vec(),
            tile_size,
            screen: self.config.screen,
            score: self.score,
            lives: self.lives,
            pellets_left: self.grid.pellets_left(),
            state: self.state,
            sprites,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            consumed: self.grid.consumed_tiles(),
            score: self.score,
        }
    }

    /// Rebuilds pellet state from the pristine layout. Entries that are not
    /// pellets there are ignored, and the score must equal the pellets that
    /// were actually eaten.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        let mut grid = Grid::new();
        let mut eaten = 0;
        for &(line, column) in &snapshot.consumed {
            if grid.consume_pellet_at(line, column)? {
                eaten += 1;
            }
        }
        if snapshot.score != eaten {
            return Err(Error::ScoreMismatch {
                score: snapshot.score,
                eaten,
            });
        }
        self.grid = grid;
        self.score = snapshot.score;
        debug!(
            "restored {} eaten pellets, score {}",
            snapshot.consumed.len(),
            self.score
        );
        Ok(())
    }

    /// Directions open from the tile an entity currently occupies, or `None`
    /// for an unregistered pursuer.
    pub fn legal_moves(&self, actor: Actor) -> Option<Vec<Direction>> {
        let tile = match actor {
            Actor::Player => self.player.body().current_tile(),
            Actor::Pursuer(idx) => self.pursuers.get(idx)?.body().current_tile(),
        };
        Some(self.grid.legal_neighbors(tile))
    }
}

/// Accepts the mover's intention when it lands on an enterable tile inside
/// the maze, otherwise rejects it. Returns whether the move was accepted.
fn resolve<M: Mover, R: Rng + ?Sized>(
    grid: &Grid,
    mover: &mut M,
    legal: &[Direction],
    rng: &mut R,
) -> bool {
    let (line, column) = mover.body().target();
    let open = match grid.index(line, column) {
        Some(at) => match grid.tile_at(at.line, at.column) {
            Ok(tile) => !tile.is_wall() && mover.can_enter(tile),
            Err(err) => {
                defect(&err);
                false
            }
        },
        None => false,
    };
    if open {
        mover.accept_movement();
    } else {
        mover.refuse_movement(legal, rng);
    }
    open
}

fn defect(err: &Error) {
    error!("grid lookup escaped the maze: {err}");
    if cfg!(debug_assertions) {
        panic!("grid lookup escaped the maze: {err}");
    }
}
