use std::fmt::Write as _;

use crate::maze::{Direction, Maze};

/// Weight of walls
const LINE_WIDTH: f64 = 1.0;
/// Gray level of walls
const LINE_GREY: f64 = 0.0;
/// Gray level of path markers
const PATH_GREY: f64 = 0.7;
/// Gap between a path marker and the walls, as a fraction of the cell size
const PATH_GAP: f64 = 0.2;

/// Draws the maze as Encapsulated PostScript filling `h_res x v_res` points,
/// with a two point margin around the bounding box.
pub fn to_eps(maze: &Maze, h_res: u32, v_res: u32) -> String {
    let h_wid = h_res as f64 / maze.cols() as f64;
    let v_wid = v_res as f64 / maze.rows() as f64;
    let v_top = v_res as f64;
    let mut eps = String::new();

    // Writing to a String cannot fail
    let _ = write!(
        eps,
        "%!PS-Adobe-3.0 EPSF-3.0\n\
         %%BoundingBox: -2 -2 {} {}\n\
         %%DocumentData: Clean7Bit\n\n",
        u64::from(h_res) + 2,
        u64::from(v_res) + 2
    );
    let _ = write!(
        eps,
        "/np  {{newpath}} bind def\n\
         /slw {{setlinewidth}} bind def\n\
         /sg  {{setgray}} bind def\n\
         /mt  {{moveto}} bind def\n\
         /rmt {{rmoveto}} bind def\n\
         /lt  {{lineto}} bind def\n\
         /rlt {{rlineto}} bind def\n\
         /stk {{stroke}} bind def\n\
         /sgrey {:.1} def\n\
         /lgrey {:.1} def\n\
         /lwid  {:.1} def\n\
         /dr {{lwid slw lgrey sg stk}} def\n\n",
        PATH_GREY, LINE_GREY, LINE_WIDTH
    );

    let _ = write!(eps, "% Exterior walls\nnp\n0 {} mt\n", v_res);
    for col in 0..maze.cols() {
        let op = if maze.is_exit(Direction::Up, col) {
            "rmt"
        } else {
            "rlt"
        };
        let _ = write!(eps, "{:.1} 0 {} ", h_wid, op);
    }
    let _ = write!(eps, "dr\nnp\n0 {} mt\n", v_res);
    for row in 0..maze.rows() {
        let op = if maze.is_exit(Direction::Left, row) {
            "rmt"
        } else {
            "rlt"
        };
        let _ = write!(eps, "0 {:.1} neg {} ", v_wid, op);
    }
    eps.push_str("dr\n\n");

    for row in 0..maze.rows() {
        let v_base = row as f64 * v_wid;
        for col in 0..maze.cols() {
            let h_base = col as f64 * h_wid;
            let right = maze.draws_right_wall((row, col));
            let bottom = maze.draws_bottom_wall((row, col));

            if right || bottom {
                eps.push_str("np ");
                if right {
                    let _ = write!(
                        eps,
                        "{:.1} {:.1} mt 0 {:.1} neg rlt ",
                        h_base + h_wid,
                        v_top - v_base,
                        v_wid
                    );
                }
                if bottom {
                    let _ = write!(
                        eps,
                        "{:.1} {:.1} mt {:.1} 0 rlt ",
                        h_base,
                        v_top - v_base - v_wid,
                        h_wid
                    );
                }
                eps.push_str("dr\n");
            }

            let cell = maze[(row, col)];
            if cell.visited {
                // The marker spans this cell and the next one along the path
                let (h_dis, v_dis) = match cell.marker {
                    Direction::Up | Direction::Down => (
                        (1.0 - 2.0 * PATH_GAP) * h_wid,
                        (2.0 - 2.0 * PATH_GAP) * v_wid,
                    ),
                    Direction::Left | Direction::Right => (
                        (2.0 - 2.0 * PATH_GAP) * h_wid,
                        (1.0 - 2.0 * PATH_GAP) * v_wid,
                    ),
                };
                let (hp, vp) = match cell.marker {
                    Direction::Up => (h_base + PATH_GAP * h_wid, v_base - (1.0 - PATH_GAP) * v_wid),
                    Direction::Down | Direction::Right => {
                        (h_base + PATH_GAP * h_wid, v_base + PATH_GAP * v_wid)
                    }
                    Direction::Left => (h_base - (1.0 - PATH_GAP) * h_wid, v_base + PATH_GAP * v_wid),
                };
                let _ = writeln!(
                    eps,
                    "np {:.1} {:.1} mt {:.1} 0 rlt 0 {:.1} neg rlt {:.1} neg 0 rlt 0 {:.1} rlt sgrey sg fill",
                    hp,
                    v_top - vp,
                    h_dis,
                    v_dis,
                    h_dis,
                    v_dis
                );
            }
        }
    }
    eps
}
