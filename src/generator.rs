//! Random streak arrangements.
//!
//! Every draw comes from the caller's RNG in a fixed order (origin x, y, z,
//! then axis, then length, one streak per palette color in palette order), so
//! a seeded RNG always reproduces the same grids.

use rand::Rng;

use crate::error::ConfigError;
use crate::geometry::Axis;
use crate::grid::{Color, Grid, Palette, Shape, Streak};

/// Draws one streak of `color` that fits in a cube with `side` cells per edge.
///
/// Origins are drawn from `0..side - 1` on every axis, which leaves room for a
/// streak of length 2 whichever axis is drawn next.
pub fn random_streak<R: Rng + ?Sized>(rng: &mut R, side: usize, color: Color) -> Streak {
    let origin = [
        rng.random_range(0..side - 1),
        rng.random_range(0..side - 1),
        rng.random_range(0..side - 1),
    ];
    let axis = Axis::ALL[rng.random_range(0..Axis::ALL.len())];
    let extent = side - origin[axis.index()];
    let length = rng.random_range(2..=extent);

    Streak {
        origin: (origin[0], origin[1], origin[2]),
        axis,
        length,
        color,
    }
}

/// Fills a fresh grid with one streak per palette color.
///
/// Later streaks overwrite earlier ones where they cross. Returns the grid
/// along with the streaks in paint order.
pub fn random_grid<R: Rng + ?Sized>(
    rng: &mut R,
    shape: Shape,
    palette: &Palette,
) -> Result<(Grid, Vec<Streak>), ConfigError> {
    let mut grid = Grid::new(shape);
    let mut streaks = Vec::with_capacity(palette.colors().len());

    for &color in palette.colors() {
        let streak = random_streak(rng, shape.side(), color);
        grid.paint(&streak)?;
        streaks.push(streak);
    }

    Ok((grid, streaks))
}

/// Rebuilds a grid by painting `streaks` in order.
pub fn paint_all(shape: Shape, streaks: &[Streak]) -> Result<Grid, ConfigError> {
    let mut grid = Grid::new(shape);
    for streak in streaks {
        grid.paint(streak)?;
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    use super::*;

    fn rgb() -> Palette {
        Palette::parse(&["r", "g", "b"]).unwrap()
    }

    #[test]
    fn test_streaks_stay_in_bounds() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        for side in 2..=5 {
            for _ in 0..500 {
                let streak = random_streak(&mut rng, side, Color::Red);
                let (x, y, z) = streak.origin;
                assert!(x < side - 1 && y < side - 1 && z < side - 1);
                assert!(streak.length >= 2);
                for (x, y, z) in streak.cells() {
                    assert!(x < side && y < side && z < side, "{streak:?} leaves a {side}-cube");
                }
            }
        }
    }

    #[test]
    fn test_minimum_grid_uses_minimum_streaks() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let (grid, streaks) = random_grid(&mut rng, Shape::cube(2).unwrap(), &rgb()).unwrap();
        for streak in &streaks {
            assert_eq!(streak.origin, (0, 0, 0));
            assert_eq!(streak.length, 2);
        }
        assert!(grid.colored_cells().count() >= 2);
    }

    #[test]
    fn test_one_streak_per_color_in_palette_order() {
        let mut rng = ChaCha12Rng::seed_from_u64(11);
        let palette = Palette::parse(&["b", "y", "r", "g"]).unwrap();
        let (grid, streaks) = random_grid(&mut rng, Shape::cube(5).unwrap(), &palette).unwrap();

        let colors: Vec<Color> = streaks.iter().map(|streak| streak.color).collect();
        assert_eq!(colors, palette.colors());

        // the last streak painted is never overwritten
        let last = streaks.last().unwrap();
        for (x, y, z) in last.cells() {
            assert_eq!(grid.get(x, y, z).color(), Some(last.color));
        }
        assert_eq!(paint_all(grid.shape(), &streaks).unwrap(), grid);
    }

    #[test]
    fn test_same_seed_same_grid() {
        let shape = Shape::cube(4).unwrap();
        let first = random_grid(&mut ChaCha12Rng::seed_from_u64(60), shape, &rgb()).unwrap();
        let second = random_grid(&mut ChaCha12Rng::seed_from_u64(60), shape, &rgb()).unwrap();
        assert_eq!(first, second);
    }
}
