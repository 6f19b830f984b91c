use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;

use pacman_maze::terminal::{TerminalInput, TerminalRenderer};
use pacman_maze::{host, Config, Result, Simulation};

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::from_env();

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(config);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(config: Config) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut renderer = TerminalRenderer::new(io::stdout(), config.palette.clone());
    let mut sim = Simulation::with_pursuers(config);
    let mut input = TerminalInput;
    host::run(&mut sim, &mut renderer, &mut input, &mut rng)
}
