use std::time::Duration;

use maze_steps::{ascii, Backtracker, Generator, MazeError};

const DEFAULT_DIMS: (usize, usize) = (13, 20);
const DEFAULT_DELAY_MS: u64 = 150;

struct Options {
    rows: usize,
    columns: usize,
    seed: Option<u64>,
    delay_ms: u64,
    animate: bool,
}

fn parse_options() -> Options {
    let mut options = Options {
        rows: DEFAULT_DIMS.0,
        columns: DEFAULT_DIMS.1,
        seed: None,
        delay_ms: DEFAULT_DELAY_MS,
        animate: true,
    };

    let mut positional = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-animate" => options.animate = false,
            "--seed" => options.seed = Some(expect_number(args.next(), "--seed")),
            "--delay" => options.delay_ms = expect_number(args.next(), "--delay"),
            "--help" | "-h" => {
                println!("usage: maze-steps [rows] [columns] [--seed N] [--delay MS] [--no-animate]");
                std::process::exit(0);
            }
            _ => positional.push(expect_number(Some(arg), "rows/columns")),
        }
    }

    if let Some(&rows) = positional.get(0) {
        options.rows = rows as usize;
    }
    if let Some(&columns) = positional.get(1) {
        options.columns = columns as usize;
    }

    options
}

fn expect_number(arg: Option<String>, what: &str) -> u64 {
    arg.and_then(|value| value.parse().ok()).unwrap_or_else(|| {
        eprintln!("expected a number for {}", what);
        std::process::exit(2);
    })
}

fn main() -> Result<(), MazeError> {
    env_logger::init();
    let options = parse_options();

    let mut maze = match options.seed {
        Some(seed) => Backtracker::with_seed(options.rows, options.columns, seed)?,
        None => Backtracker::new(options.rows, options.columns)?,
    };
    maze.setup();

    if !options.animate {
        maze.generate()?;
        print!("{}", ascii::render(maze.grid(), None, &[]));
        return Ok(());
    }

    while !maze.is_done() {
        let report = maze.step()?;

        // repaint from the top-left each frame
        print!("\x1b[2J\x1b[H");
        let current = if report.done {
            None
        } else {
            Some(maze.current()?)
        };
        print!("{}", ascii::render(maze.grid(), current, &report.frontier));

        std::thread::sleep(Duration::from_millis(options.delay_ms));
    }

    Ok(())
}
