//! Map geometry: the enemy path and the placement grid.

use glam::Vec2;
use rampart_core::config::MapSpec;
use rampart_core::enums::CellState;
use rampart_core::errors::CommandError;
use rampart_core::types::CellCoord;

/// The enemy path as an ordered polyline. Segment lengths are
/// precomputed so that progress lookups are a single walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    waypoints: Vec<Vec2>,
    segment_lengths: Vec<f32>,
    total_length: f32,
}

impl Path {
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        let segment_lengths: Vec<f32> = waypoints
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .collect();
        let total_length = segment_lengths.iter().sum();
        Self {
            waypoints,
            segment_lengths,
            total_length,
        }
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Length along the waypoints (world units).
    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Straight-line length from entry to exit, used by flying
    /// enemies.
    pub fn direct_length(&self) -> f32 {
        match (self.waypoints.first(), self.waypoints.last()) {
            (Some(first), Some(last)) => first.distance(*last),
            _ => 0.0,
        }
    }

    /// Where enemies enter the field.
    pub fn start(&self) -> Vec2 {
        self.waypoints.first().copied().unwrap_or(Vec2::ZERO)
    }

    /// World position at normalized progress. Progress at or below 0
    /// maps to the first waypoint, at or above 1 to the last.
    pub fn position_at(&self, progress: f32) -> Vec2 {
        let Some(&first) = self.waypoints.first() else {
            return Vec2::ZERO;
        };
        let Some(&last) = self.waypoints.last() else {
            return Vec2::ZERO;
        };
        if progress <= 0.0 || self.total_length <= 0.0 {
            return first;
        }
        if progress >= 1.0 {
            return last;
        }

        let mut remaining = progress * self.total_length;
        for (pair, &length) in self.waypoints.windows(2).zip(&self.segment_lengths) {
            if length <= 0.0 {
                continue;
            }
            if remaining <= length {
                return pair[0].lerp(pair[1], remaining / length);
            }
            remaining -= length;
        }
        last
    }

    /// Straight-line position at normalized progress, for flying
    /// enemies.
    pub fn direct_position_at(&self, progress: f32) -> Vec2 {
        match (self.waypoints.first(), self.waypoints.last()) {
            (Some(&first), Some(&last)) => first.lerp(last, progress.clamp(0.0, 1.0)),
            _ => Vec2::ZERO,
        }
    }
}

/// The placement grid. Cells covered by the path or blocked by the
/// layout are never placeable.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cols: i32,
    rows: i32,
    cell_size: f32,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(cols: i32, rows: i32, cell_size: f32) -> Self {
        let count = (cols.max(0) as usize) * (rows.max(0) as usize);
        Self {
            cols: cols.max(0),
            rows: rows.max(0),
            cell_size,
            cells: vec![CellState::Empty; count],
        }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell containing a world position.
    pub fn cell_at(&self, position: Vec2) -> CellCoord {
        CellCoord::new(
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    /// World position of a cell's center.
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            (cell.col as f32 + 0.5) * self.cell_size,
            (cell.row as f32 + 0.5) * self.cell_size,
        )
    }

    pub fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.col >= 0 && cell.col < self.cols && cell.row >= 0 && cell.row < self.rows
    }

    /// Cell state; out-of-bounds reads as Blocked.
    pub fn state(&self, cell: CellCoord) -> CellState {
        match self.index(cell) {
            Some(i) => self.cells[i],
            None => CellState::Blocked,
        }
    }

    pub fn can_place(&self, cell: CellCoord) -> bool {
        self.state(cell) == CellState::Empty
    }

    /// Mark a cell as holding a tower.
    pub fn place(&mut self, cell: CellCoord) -> Result<(), CommandError> {
        if !self.can_place(cell) {
            return Err(CommandError::InvalidPosition);
        }
        self.set(cell, CellState::Tower);
        Ok(())
    }

    /// Clear a tower cell back to empty. Path and blocked cells are
    /// untouched.
    pub fn remove(&mut self, cell: CellCoord) {
        if self.state(cell) == CellState::Tower {
            self.set(cell, CellState::Empty);
        }
    }

    pub(crate) fn set(&mut self, cell: CellCoord, state: CellState) {
        if let Some(i) = self.index(cell) {
            self.cells[i] = state;
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(cell.row as usize * self.cols as usize + cell.col as usize)
    }
}

/// A level's complete geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub width: f32,
    pub height: f32,
    pub path: Path,
    pub grid: Grid,
}

impl Map {
    /// Build the map: size the grid, mark blocked cells, then mark
    /// every cell the path crosses as permanently non-placeable.
    pub fn from_spec(spec: &MapSpec) -> Self {
        let cell_size = if spec.cell_size > 0.0 {
            spec.cell_size
        } else {
            1.0
        };
        let cols = (spec.width / cell_size).ceil() as i32;
        let rows = (spec.height / cell_size).ceil() as i32;
        let mut grid = Grid::new(cols, rows, cell_size);

        for &cell in &spec.blocked_cells {
            if grid.in_bounds(cell) {
                grid.set(cell, CellState::Blocked);
            }
        }

        let path = Path::new(spec.waypoints.clone());
        for pair in spec.waypoints.windows(2) {
            mark_segment(&mut grid, pair[0], pair[1]);
        }
        if let Some(&only) = spec.waypoints.first() {
            grid.set(grid.cell_at(only), CellState::Path);
        }

        Self {
            width: spec.width,
            height: spec.height,
            path,
            grid,
        }
    }

    /// A zero-extent map for the pre-game world.
    pub fn empty() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            path: Path::new(Vec::new()),
            grid: Grid::new(0, 0, 1.0),
        }
    }

    pub fn cell_at(&self, position: Vec2) -> CellCoord {
        self.grid.cell_at(position)
    }

    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.grid.cell_center(cell)
    }

    pub fn can_place(&self, cell: CellCoord) -> bool {
        self.grid.can_place(cell)
    }
}

/// Mark every cell a path segment crosses, sampling at half-cell
/// steps so diagonal segments do not skip cells.
fn mark_segment(grid: &mut Grid, from: Vec2, to: Vec2) {
    let length = from.distance(to);
    let step = grid.cell_size() * 0.5;
    if length <= 0.0 || step <= 0.0 {
        grid.set(grid.cell_at(from), CellState::Path);
        return;
    }
    let samples = (length / step).ceil() as i32;
    for i in 0..=samples {
        let t = i as f32 / samples as f32;
        let cell = grid.cell_at(from.lerp(to, t));
        grid.set(cell, CellState::Path);
    }
}
