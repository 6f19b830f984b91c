use std::thread;

use log::info;
use rand::Rng;

use crate::error::Result;
use crate::input::{Flow, InputSource};
use crate::render::Renderer;
use crate::simulation::Simulation;

/// compute -> render -> delay -> poll, until the input source asks to quit.
pub fn run<D, I, R>(
    sim: &mut Simulation,
    renderer: &mut D,
    input: &mut I,
    rng: &mut R,
) -> Result<()>
where
    D: Renderer,
    I: InputSource,
    R: Rng + ?Sized,
{
    info!(
        "starting with {} pursuers, {} pellets",
        sim.pursuers().len(),
        sim.total_pellets()
    );
    loop {
        sim.tick(rng);
        renderer.present(&sim.frame())?;
        thread::sleep(sim.config().tick);
        let intents = input.poll()?;
        if sim.handle_input(&intents) == Flow::Quit {
            info!("quit with score {} and {} lives", sim.score(), sim.lives());
            return Ok(());
        }
    }
}
