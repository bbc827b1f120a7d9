use std::time::Instant;

use mazegen::{
    Maze,
    generators::{generate_maze, get_rng, unit_source},
    solvers::solve_maze,
};

fn main() -> mazegen::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(10);
    let side = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(512);

    let mut maze = Maze::new(side, side)?;
    let mut rng = get_rng(Some(0));
    for i in 0..num_iters {
        let start = Instant::now();
        let stats = generate_maze(&mut maze, &mut unit_source(&mut rng))?;
        let generated = start.elapsed();
        let len = solve_maze(&mut maze)?;
        println!(
            "run {}: generated {}x{} in {:?} ({} passes), solved in {:?} ({} cells)",
            i + 1,
            side,
            side,
            generated,
            stats.passes,
            start.elapsed() - generated,
            len
        );
    }
    Ok(())
}
