use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use crate::{
    error::Result,
    maze::{Direction, Maze},
    render::Area,
};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const PATH: Rgb<u8> = Rgb([102, 102, 255]);

/// Fills the inclusive rectangle `(x1, y1)..=(x2, y2)`, clipped to the image.
fn fill_rect(img: &mut RgbImage, (x1, y1): (i64, i64), (x2, y2): (i64, i64), color: Rgb<u8>) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let (x1, x2) = (x1.min(x2).max(0), x1.max(x2).min(w - 1));
    let (y1, y2) = (y1.min(y2).max(0), y1.max(y2).min(h - 1));
    for y in y1..=y2 {
        for x in x1..=x2 {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Draws the maze as an `(h_res + 1) x (v_res + 1)` pixel image.
/// Sides outside `1..=Area::MAX_SIDE` are rejected before anything is allocated.
pub fn to_image(maze: &Maze, h_res: u32, v_res: u32) -> Result<RgbImage> {
    Area {
        horizontal: h_res,
        vertical: v_res,
    }
    .check()?;
    let mut img = RgbImage::from_pixel(h_res + 1, v_res + 1, WHITE);
    let h_wid = (h_res as usize / maze.cols()) as i64;
    let v_wid = (v_res as usize / maze.rows()) as i64;

    // Top and left exterior walls; the others are the cells' own walls
    for col in 0..maze.cols() {
        if !maze.is_exit(Direction::Up, col) {
            let x = col as i64 * h_wid;
            fill_rect(&mut img, (x, 0), (x + h_wid, 0), BLACK);
        }
    }
    for row in 0..maze.rows() {
        if !maze.is_exit(Direction::Left, row) {
            let y = row as i64 * v_wid;
            fill_rect(&mut img, (0, y), (0, y + v_wid), BLACK);
        }
    }

    for row in 0..maze.rows() {
        let v_base = row as i64 * v_wid;
        for col in 0..maze.cols() {
            let h_base = col as i64 * h_wid;

            if maze.draws_right_wall((row, col)) {
                let x = h_base + h_wid;
                fill_rect(&mut img, (x, v_base), (x, v_base + v_wid), BLACK);
            }
            if maze.draws_bottom_wall((row, col)) {
                let y = v_base + v_wid;
                fill_rect(&mut img, (h_base, y), (h_base + h_wid, y), BLACK);
            }

            let cell = maze[(row, col)];
            if !cell.visited {
                continue;
            }
            let (width, height) = match cell.marker {
                Direction::Up | Direction::Down => (h_wid - 4, 2 * v_wid - 4),
                Direction::Left | Direction::Right => (2 * h_wid - 4, v_wid - 4),
            };
            if width < 0 || height < 0 {
                continue;
            }
            let (left, top) = match cell.marker {
                Direction::Right | Direction::Down => (h_base + 2, v_base + 2),
                Direction::Left => (h_base - h_wid + 2, v_base + 2),
                Direction::Up => (h_base + 2, v_base - v_wid + 2),
            };
            fill_rect(&mut img, (left, top), (left + width, top + height), PATH);
        }
    }
    Ok(img)
}

/// Encodes the maze image as PNG bytes.
pub fn to_png(maze: &Maze, h_res: u32, v_res: u32) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    to_image(maze, h_res, v_res)?.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}
