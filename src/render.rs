//! Image export of puzzle views.
//!
//! The puzzle core only hands out [`RenderJob`]s; a [`Renderer`] decides how
//! they are persisted and returns a reference that the presentation layer can
//! load later.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::grid::{Cell, Color, Grid};
use crate::puzzle::Label;
use crate::view::{Orientation, View};

/// Reference to a persisted image, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

/// What a rendered image is used for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ImageKind {
    Description,
    Option(Label),
}

/// Everything needed to draw one puzzle image.
#[derive(Debug, Copy, Clone)]
pub struct RenderJob<'a> {
    /// 1-based question index within the bank.
    pub question: usize,
    pub kind: ImageKind,
    pub grid: &'a Grid,
    pub orientation: Orientation,
    pub view: &'a View,
}

impl RenderJob<'_> {
    /// File name of the image: `SRQ_{question}.png` for descriptions and
    /// `SRQ_{question}_{label}.png` for options.
    pub fn file_name(&self) -> String {
        match self.kind {
            ImageKind::Description => format!("SRQ_{}.png", self.question),
            ImageKind::Option(label) => format!("SRQ_{}_{label}.png", self.question),
        }
    }
}

/// Persists puzzle images.
pub trait Renderer {
    fn render(&mut self, job: &RenderJob<'_>) -> Result<ImageRef, RenderError>;
}

/// Display color for a palette color.
pub const fn color_rgb(color: Color) -> [u8; 3] {
    match color {
        Color::Red => [220, 40, 40],
        Color::Green => [40, 170, 60],
        Color::Blue => [40, 80, 220],
        Color::Yellow => [240, 210, 40],
        Color::Magenta => [200, 50, 200],
        Color::Cyan => [40, 200, 210],
        Color::Orange => [245, 140, 30],
    }
}

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID_LINE: Rgb<u8> = Rgb([90, 90, 90]);

/// Writes PNG files into a directory.
pub struct PngRenderer {
    dir: PathBuf,
    /// Edge length of one cell in pixels.
    cell_px: u32,
}

impl PngRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cell_px: 48,
        }
    }

    pub fn with_cell_size(mut self, cell_px: u32) -> Self {
        self.cell_px = cell_px.max(4);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Draws a view as a flat table of cells with grid lines.
    pub fn draw_view(&self, view: &View) -> RgbImage {
        let cell = self.cell_px;
        let width = view.cols() as u32 * cell + 1;
        let height = view.rows() as u32 * cell + 1;
        let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

        for (row, cells) in view.iter_rows().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                let Cell::Colored(color) = value else {
                    continue;
                };
                let fill = Rgb(color_rgb(color));
                let (x0, y0) = (col as u32 * cell, row as u32 * cell);
                for py in y0..y0 + cell {
                    for px in x0..x0 + cell {
                        img.put_pixel(px, py, fill);
                    }
                }
            }
        }

        for line in 0..=view.cols() as u32 {
            for py in 0..height {
                img.put_pixel(line * cell, py, GRID_LINE);
            }
        }
        for line in 0..=view.rows() as u32 {
            for px in 0..width {
                img.put_pixel(px, line * cell, GRID_LINE);
            }
        }

        img
    }

    /// Draws an isometric picture of the arrangement.
    ///
    /// The camera looks from the `(+1, +1, +1)` corner with `+z` up, so the
    /// `+x`, `+y` and `+z` faces of each cube are visible. Cubes are painted
    /// in increasing `x + y + z`, far to near.
    pub fn draw_isometric(&self, grid: &Grid) -> RgbImage {
        let side = grid.side() as f32;
        let scale = self.cell_px as f32;
        let half_width = side * scale * 3f32.sqrt() / 2.0;
        let margin = scale / 2.0;

        let width = (2.0 * (half_width + margin)).ceil() as u32;
        let height = (2.0 * (side * scale + margin)).ceil() as u32;
        let origin = (half_width + margin, side * scale + margin);

        // screen right is (-x + y), screen down is (x + y) / 2 - z
        let project = |x: f32, y: f32, z: f32| -> (f32, f32) {
            (
                origin.0 + (y - x) * scale * 3f32.sqrt() / 2.0,
                origin.1 + ((x + y) / 2.0 - z) * scale,
            )
        };

        let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
        let mut cubes: Vec<_> = grid.colored_cells().collect();
        cubes.sort_by_key(|&((x, y, z), _)| x + y + z);

        for ((x, y, z), color) in cubes {
            let (x, y, z) = (x as f32, y as f32, z as f32);
            let rgb = color_rgb(color);
            let faces = [
                // +z
                (
                    [(x, y, z + 1.0), (x + 1.0, y, z + 1.0), (x + 1.0, y + 1.0, z + 1.0), (x, y + 1.0, z + 1.0)],
                    1.0,
                ),
                // +x
                (
                    [(x + 1.0, y, z), (x + 1.0, y + 1.0, z), (x + 1.0, y + 1.0, z + 1.0), (x + 1.0, y, z + 1.0)],
                    0.8,
                ),
                // +y
                (
                    [(x, y + 1.0, z), (x + 1.0, y + 1.0, z), (x + 1.0, y + 1.0, z + 1.0), (x, y + 1.0, z + 1.0)],
                    0.6,
                ),
            ];
            for (corners, shade) in faces {
                let quad = corners.map(|(cx, cy, cz)| project(cx, cy, cz));
                let fill = Rgb(rgb.map(|channel| (f32::from(channel) * shade) as u8));
                fill_quad(&mut img, quad, fill);
            }
        }

        img
    }

    fn save(&self, img: &RgbImage, file_name: &str) -> Result<ImageRef, RenderError> {
        fs::create_dir_all(&self.dir).map_err(|source| RenderError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.dir.join(file_name);
        img.save(&path).map_err(|source| RenderError::Encode {
            path: path.clone(),
            source,
        })?;
        Ok(ImageRef(path.to_string_lossy().into_owned()))
    }
}

impl Renderer for PngRenderer {
    fn render(&mut self, job: &RenderJob<'_>) -> Result<ImageRef, RenderError> {
        let img = match job.kind {
            ImageKind::Description => self.draw_isometric(job.grid),
            ImageKind::Option(_) => self.draw_view(job.view),
        };
        self.save(&img, &job.file_name())
    }
}

/// Fills a convex quadrilateral, testing each pixel center against its edges.
fn fill_quad(img: &mut RgbImage, quad: [(f32, f32); 4], fill: Rgb<u8>) {
    let min_x = quad.iter().map(|p| p.0).fold(f32::INFINITY, f32::min).floor().max(0.0) as u32;
    let max_x = quad.iter().map(|p| p.0).fold(f32::NEG_INFINITY, f32::max).ceil() as u32;
    let min_y = quad.iter().map(|p| p.1).fold(f32::INFINITY, f32::min).floor().max(0.0) as u32;
    let max_y = quad.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max).ceil() as u32;

    for py in min_y..max_y.min(img.height()) {
        for px in min_x..max_x.min(img.width()) {
            let point = (px as f32 + 0.5, py as f32 + 0.5);
            let mut has_pos = false;
            let mut has_neg = false;
            for i in 0..4 {
                let (a, b) = (quad[i], quad[(i + 1) % 4]);
                let cross = (b.0 - a.0) * (point.1 - a.1) - (b.1 - a.1) * (point.0 - a.0);
                has_pos |= cross > 0.0;
                has_neg |= cross < 0.0;
            }
            if !(has_pos && has_neg) {
                img.put_pixel(px, py, fill);
            }
        }
    }
}

/// Keeps rendered views in memory instead of writing files.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    /// Rendered file names and views, in render order.
    pub rendered: Vec<(String, View)>,
    /// Fail every job once this many have succeeded.
    pub fail_after: Option<usize>,
}

impl MemoryRenderer {
    pub fn failing_after(successes: usize) -> Self {
        Self {
            rendered: Vec::new(),
            fail_after: Some(successes),
        }
    }
}

impl Renderer for MemoryRenderer {
    fn render(&mut self, job: &RenderJob<'_>) -> Result<ImageRef, RenderError> {
        let name = job.file_name();
        if self.fail_after.is_some_and(|limit| self.rendered.len() >= limit) {
            return Err(RenderError::Refused(name));
        }
        self.rendered.push((name.clone(), job.view.clone()));
        Ok(ImageRef(name))
    }
}
