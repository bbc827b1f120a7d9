use std::fmt::Write as _;

use crossterm::style::{Color, Stylize};

use crate::maze::{Direction, Maze};

/// Draws the maze with `+---+` corners, `|` walls and ` @ ` on path cells.
/// With `color`, path marks carry terminal color codes.
pub fn to_text(maze: &Maze, color: bool) -> String {
    let mut text = String::with_capacity((maze.rows() * 2 + 1) * (maze.cols() * 4 + 2));

    for col in 0..maze.cols() {
        text.push_str(if maze.is_exit(Direction::Up, col) {
            "+   "
        } else {
            "+---"
        });
    }
    text.push_str("+\n");

    // The left border is drawn as each row starts
    for row in 0..maze.rows() {
        text.push(if maze.is_exit(Direction::Left, row) {
            ' '
        } else {
            '|'
        });
        for col in 0..maze.cols() {
            if !maze[(row, col)].visited {
                text.push_str("   ");
            } else if color {
                let _ = write!(text, "{}", " @ ".with(Color::Yellow));
            } else {
                text.push_str(" @ ");
            }
            text.push(if maze.draws_right_wall((row, col)) {
                '|'
            } else {
                ' '
            });
        }
        text.push_str("\n+");
        for col in 0..maze.cols() {
            text.push_str(if maze.draws_bottom_wall((row, col)) {
                "---+"
            } else {
                "   +"
            });
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::generate_maze;
    use crate::maze::Exit;
    use crate::solvers::find_path;

    fn zero_maze() -> Maze {
        let mut maze = Maze::new(3, 3).unwrap();
        generate_maze(&mut maze, &mut || 0.0).unwrap();
        maze
    }

    #[test]
    fn test_text_layout() {
        let maze = zero_maze();
        let expected = concat!(
            "+---+---+---+\n",
            "            |\n",
            "+   +   +   +\n",
            "|   |   |   |\n",
            "+   +   +   +\n",
            "|   |   |    \n",
            "+---+---+---+\n",
        );
        assert_eq!(to_text(&maze, false), expected);
    }

    #[test]
    fn test_text_path_and_exits() {
        let mut maze = zero_maze();
        maze.set_exit_1(Exit::new(1, Direction::Up)).unwrap();
        maze.set_exit_2(Exit::new(2, Direction::Down)).unwrap();
        find_path(&mut maze, (0, 1), (2, 2)).unwrap();
        let expected = concat!(
            "+---+   +---+\n",
            "|     @   @ |\n",
            "+   +   +   +\n",
            "|   |   | @ |\n",
            "+   +   +   +\n",
            "|   |   | @ |\n",
            "+---+---+   +\n",
        );
        assert_eq!(to_text(&maze, false), expected);
    }

    #[test]
    fn test_colored_path_marks() {
        let mut maze = zero_maze();
        find_path(&mut maze, (0, 0), (0, 0)).unwrap();
        let text = to_text(&maze, true);
        assert!(text.contains('\u{1b}'));
        assert!(text.contains(" @ "));
        assert!(!to_text(&maze, false).contains('\u{1b}'));
    }
}
