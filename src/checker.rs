//! Reachable views and the search for an impossible one.
//!
//! Rotating a rigid arrangement can only ever show one of 6 base views in one
//! of 4 camera rolls. A mirror image of a base view is a candidate "impossible"
//! view; it only counts if it matches none of those 24 views, because an
//! arrangement with accidental reflective symmetry can show its own mirror
//! image after a plain rotation.

use rustc_hash::FxHashMap;

use crate::grid::Grid;
use crate::view::{Direction, Orientation, Rotation, View};

/// Number of views reachable by rotating an arrangement.
pub const NUM_REACHABLE: usize = Direction::ALL.len() * Rotation::ALL.len();

/// The 24 views an arrangement can show under proper rotations.
#[derive(Debug, Clone)]
pub struct ReachableSet {
    /// Views indexed by `direction.index() * 4 + rotation.quarter_turns()`.
    views: Vec<View>,
    /// First orientation producing each distinct view.
    lookup: FxHashMap<View, Orientation>,
}

impl ReachableSet {
    /// Projects `grid` along every direction and rolls each projection 4 ways.
    pub fn compute(grid: &Grid) -> Self {
        let mut views = Vec::with_capacity(NUM_REACHABLE);
        let mut lookup = FxHashMap::default();

        for direction in Direction::ALL {
            let mut view = View::project(grid, direction);
            for rotation in Rotation::ALL {
                lookup
                    .entry(view.clone())
                    .or_insert(Orientation::proper(direction, rotation));
                let next = view.rotated_once();
                views.push(std::mem::replace(&mut view, next));
            }
        }

        Self { views, lookup }
    }

    /// Returns the view for a direction and camera roll.
    pub fn view(&self, direction: Direction, rotation: Rotation) -> &View {
        &self.views[direction.index() * Rotation::ALL.len() + rotation.quarter_turns()]
    }

    /// Returns the unrolled projection along `direction`.
    pub fn base(&self, direction: Direction) -> &View {
        self.view(direction, Rotation::R0)
    }

    /// Returns `true` if `view` equals any of the 24 reachable views.
    pub fn contains(&self, view: &View) -> bool {
        self.lookup.contains_key(view)
    }

    /// Returns an orientation that reaches `view`, if any does.
    pub fn find(&self, view: &View) -> Option<Orientation> {
        self.lookup.get(view).copied()
    }

    /// Iterates over all 24 views with their orientations.
    pub fn iter(&self) -> impl Iterator<Item = (Orientation, &View)> {
        Direction::ALL
            .into_iter()
            .flat_map(|direction| {
                Rotation::ALL
                    .into_iter()
                    .map(move |rotation| Orientation::proper(direction, rotation))
            })
            .zip(&self.views)
    }

    /// Number of pairwise distinct views (at most 24).
    pub fn distinct_len(&self) -> usize {
        self.lookup.len()
    }

    /// Returns the left-right mirror image of the base view along `direction`.
    pub fn mirrored(&self, direction: Direction) -> View {
        self.base(direction).mirrored()
    }

    /// Returns the first direction whose mirrored view is unreachable, or
    /// `None` if every mirror image can be produced by a rotation.
    pub fn impossible_direction(&self) -> Option<Direction> {
        self.impossible_directions().next()
    }

    /// Iterates over every direction whose mirrored view is unreachable, in
    /// [`Direction::ALL`] order.
    pub fn impossible_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(|&direction| !self.contains(&self.mirrored(direction)))
    }
}

/// Finds a direction whose mirrored view `grid` can never show.
pub fn find_impossible_direction(grid: &Grid) -> Option<Direction> {
    ReachableSet::compute(grid).impossible_direction()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rustc_hash::FxHashSet;

    use super::*;
    use crate::generator::random_grid;
    use crate::geometry::{Axis, NUM_ROTATIONS};
    use crate::grid::{Color, Palette, Shape, Streak};

    fn distinct(reachable: &ReachableSet) -> FxHashSet<View> {
        reachable.iter().map(|(_, view)| view.clone()).collect()
    }

    fn random_grids(side: usize, count: u64) -> impl Iterator<Item = Grid> {
        let shape = Shape::cube(side).unwrap();
        let palette = Palette::parse(&["r", "g", "b", "y"]).unwrap();
        (0..count).map(move |seed| {
            let mut rng = ChaCha12Rng::seed_from_u64(seed);
            random_grid(&mut rng, shape, &palette).unwrap().0
        })
    }

    #[test]
    fn test_reachable_set_has_24_members() {
        for grid in random_grids(3, 10) {
            let reachable = ReachableSet::compute(&grid);
            assert_eq!(reachable.iter().count(), NUM_REACHABLE);
            for (orientation, view) in reachable.iter() {
                assert_eq!(&orientation.view(&grid), view);
                assert!(reachable.contains(view));
            }
        }
    }

    #[test]
    fn test_reachable_set_is_closed_under_rotation() {
        for side in [2, 3, 4, 5] {
            for grid in random_grids(side, 20) {
                let expected = distinct(&ReachableSet::compute(&grid));
                for rotation in 0..NUM_ROTATIONS {
                    let rotated = grid.rotated(rotation);
                    assert_eq!(
                        distinct(&ReachableSet::compute(&rotated)),
                        expected,
                        "Rotation {rotation} changed the reachable views of\n{grid}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_reflection_reaches_mirrored_views() {
        for grid in random_grids(4, 20) {
            let reachable = ReachableSet::compute(&grid);
            for axis in Axis::ALL {
                let reflected = ReachableSet::compute(&grid.reflected(axis));
                for direction in Direction::ALL {
                    assert!(reflected.contains(&reachable.mirrored(direction)));
                }
            }
        }
    }

    #[test]
    fn test_verdict_matches_reachable_set() {
        for grid in random_grids(3, 50) {
            let reachable = ReachableSet::compute(&grid);
            match reachable.impossible_direction() {
                Some(direction) => {
                    assert!(!reachable.contains(&reachable.mirrored(direction)));
                    for earlier in &Direction::ALL[..direction.index()] {
                        assert!(reachable.contains(&reachable.mirrored(*earlier)));
                    }
                }
                None => {
                    for direction in Direction::ALL {
                        assert!(reachable.contains(&reachable.mirrored(direction)));
                    }
                }
            }
        }
    }

    #[test]
    fn test_streak_on_mirror_plane_has_no_solution() {
        let shape = Shape::cube(3).unwrap();

        // x = 1 is a mirror plane of the cube
        let mut on_midplane = Grid::new(shape);
        on_midplane
            .paint(&Streak {
                origin: (1, 0, 0),
                axis: Axis::Z,
                length: 2,
                color: Color::Red,
            })
            .unwrap();

        // x = y is a diagonal mirror plane of the cube
        let mut on_diagonal = Grid::new(shape);
        on_diagonal
            .paint(&Streak {
                origin: (0, 0, 1),
                axis: Axis::Z,
                length: 2,
                color: Color::Blue,
            })
            .unwrap();

        for grid in [on_midplane, on_diagonal] {
            assert_eq!(find_impossible_direction(&grid), None, "for\n{grid}");
            assert_eq!(ReachableSet::compute(&grid).impossible_directions().count(), 0);
        }
    }

    #[test]
    fn test_empty_grid_has_no_solution() {
        let grid = Grid::new(Shape::cube(3).unwrap());
        let reachable = ReachableSet::compute(&grid);
        assert_eq!(reachable.distinct_len(), 1);
        assert_eq!(reachable.impossible_direction(), None);
    }

    #[test]
    fn test_find_reports_a_reaching_orientation() {
        for grid in random_grids(3, 5) {
            let reachable = ReachableSet::compute(&grid);
            for direction in Direction::ALL {
                for rotation in Rotation::ALL {
                    let view = reachable.view(direction, rotation);
                    let found = reachable.find(view).expect("reachable view");
                    assert_eq!(&found.view(&grid), view);
                }
            }
        }
    }
}
