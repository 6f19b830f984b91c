use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::entity::{Drawable, MobileEntity, Mover, Velocity};
use crate::grid::{Direction, Tile, TileIndex};
use crate::render::{Rgb, Sprite, SpriteKind};

/// Patrols along a heading and re-rolls it uniformly at random on
/// intersections and after bumping into a wall. No memory beyond the heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Pursuer {
    body: MobileEntity,
    heading: Direction,
    speed: f32,
    color: Rgb,
}

impl Pursuer {
    pub fn new(spawn: TileIndex, heading: Direction, speed: f32, color: Rgb) -> Self {
        let mut body = MobileEntity::new(spawn);
        body.velocity = Velocity::toward(heading, speed);
        Self {
            body,
            heading,
            speed,
            color,
        }
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn set_heading(&mut self, heading: Direction) {
        self.heading = heading;
        self.body.velocity = Velocity::toward(heading, self.speed);
    }

    /// Uniform over `legal`, reversal included. Keeps the heading when
    /// nothing is open.
    fn reroll<R: Rng + ?Sized>(&mut self, legal: &[Direction], rng: &mut R) {
        if let Some(&dir) = legal.choose(rng) {
            trace!(
                "pursuer at {:?} turns {:?} -> {:?}",
                self.body.current_tile(),
                self.heading,
                dir
            );
            self.set_heading(dir);
        }
    }
}

impl Mover for Pursuer {
    fn body(&self) -> &MobileEntity {
        &self.body
    }

    fn body_mut(&mut self) -> &mut MobileEntity {
        &mut self.body
    }

    fn can_enter(&self, _tile: Tile) -> bool {
        true
    }

    fn refuse_movement<R: Rng + ?Sized>(&mut self, legal: &[Direction], rng: &mut R) {
        self.body.reject();
        self.reroll(legal, rng);
    }

    fn choose_path<R: Rng + ?Sized>(&mut self, legal: &[Direction], rng: &mut R) {
        self.reroll(legal, rng);
    }
}

impl Drawable for Pursuer {
    fn sprite(&self, tile_size: u32) -> Sprite {
        Sprite {
            kind: SpriteKind::Pursuer,
            center: self.body.position.pixel_center(tile_size),
            radius: (tile_size / 2) as f32,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Position;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pursuer() -> Pursuer {
        Pursuer::new(TileIndex::new(15, 13), Direction::Up, 0.75, Rgb::RED)
    }

    #[test]
    fn intention_follows_heading() {
        let mut p = pursuer();
        p.compute_intention();
        assert_eq!(p.body().intention, Position::new(14.25, 13.0));
        p.set_heading(Direction::Left);
        p.compute_intention();
        assert_eq!(p.body().intention, Position::new(15.0, 12.25));
    }

    #[test]
    fn refusal_reverts_and_rerolls() {
        let mut p = pursuer();
        p.compute_intention();
        let mut rng = StdRng::seed_from_u64(3);
        p.refuse_movement(&[Direction::Down], &mut rng);
        assert_eq!(p.body().intention, p.body().position);
        assert_eq!(p.heading(), Direction::Down);
    }

    #[test]
    fn reroll_may_reverse() {
        let mut p = pursuer();
        let mut rng = StdRng::seed_from_u64(11);
        let mut reversed = false;
        for _ in 0..64 {
            p.set_heading(Direction::Up);
            p.choose_path(&Direction::ALL, &mut rng);
            reversed |= p.heading() == Direction::Down;
        }
        assert!(reversed);
    }

    #[test]
    fn empty_options_keep_heading() {
        let mut p = pursuer();
        let mut rng = StdRng::seed_from_u64(0);
        p.choose_path(&[], &mut rng);
        assert_eq!(p.heading(), Direction::Up);
    }

    #[test]
    fn same_seed_same_headings() {
        let run = |seed| {
            let mut p = pursuer();
            let mut rng = StdRng::seed_from_u64(seed);
            (0..32)
                .map(|_| {
                    p.choose_path(&Direction::ALL, &mut rng);
                    p.heading()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn sprite_matches_player_centering() {
        let mut p = pursuer();
        p.body_mut().position = Position::new(14.25, 13.0);
        let sprite = p.sprite(20);
        assert_eq!(sprite.center, crate::render::Point::new(270.0, 295.0));
        assert_eq!(sprite.radius, 10.0);
    }

    #[test]
    fn pursuers_cross_the_gate() {
        assert!(pursuer().can_enter(Tile::GateMarker));
    }
}
