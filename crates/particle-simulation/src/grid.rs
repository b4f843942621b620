//! Uniform spatial grid over the toroidal world
//!
//! Cells are at least `r_max` wide, so every neighbour of a particle lies in
//! the 3x3 block of cells around its own (wrapping at the edges).

use glam::Vec2;
use particle_physics::{Particle, World};

pub struct ChunkGrid {
    world: World,
    r_max: f32,
    cols: usize,
    rows: usize,
    cell_size: Vec2,

    // Particle indices bucketed by cell: members of cell `c` are
    // `entries[cell_start[c]..cell_start[c + 1]]`.
    cell_start: Vec<usize>,
    entries: Vec<usize>,
    particle_cells: Vec<usize>,
    cursor: Vec<usize>,

    // Flattened neighbour lists, present when the grid is cached.
    neighbour_cache: Option<NeighbourCache>,
}

struct NeighbourCache {
    offsets: Vec<usize>,
    cells: Vec<usize>,
}

impl ChunkGrid {
    pub fn new(world: World, r_max: f32, cached: bool) -> Self {
        let r_max = r_max.max(1.0);
        let cols = ((world.width / r_max).floor() as usize).max(1);
        let rows = ((world.height / r_max).floor() as usize).max(1);
        let cell_count = cols * rows;

        let neighbour_cache = cached.then(|| {
            let mut offsets = Vec::with_capacity(cell_count + 1);
            let mut cells = Vec::with_capacity(cell_count * 9);
            offsets.push(0);
            for cell in 0..cell_count {
                let (list, len) = neighbour_block(cols, rows, cell);
                cells.extend_from_slice(&list[..len]);
                offsets.push(cells.len());
            }
            NeighbourCache { offsets, cells }
        });

        log::debug!(
            "Chunk grid {}x{} for r_max {} (cached: {})",
            cols,
            rows,
            r_max,
            cached
        );

        Self {
            world,
            r_max,
            cols,
            rows,
            cell_size: Vec2::new(world.width / cols as f32, world.height / rows as f32),
            cell_start: vec![0; cell_count + 1],
            entries: Vec::new(),
            particle_cells: Vec::new(),
            cursor: vec![0; cell_count],
            neighbour_cache,
        }
    }

    /// Whether this grid's geometry is still valid for `world` and `r_max`.
    pub fn matches(&self, world: &World, r_max: f32) -> bool {
        self.world == *world && self.r_max == r_max.max(1.0)
    }

    pub fn is_cached(&self) -> bool {
        self.neighbour_cache.is_some()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    pub fn cell_of(&self, position: Vec2) -> usize {
        let cx = ((position.x / self.cell_size.x) as usize).min(self.cols - 1);
        let cy = ((position.y / self.cell_size.y) as usize).min(self.rows - 1);
        cy * self.cols + cx
    }

    /// Cell the particle at `index` was binned into by the last rebuild.
    pub fn cell_of_particle(&self, index: usize) -> usize {
        self.particle_cells[index]
    }

    /// Re-bin all particles (counting sort by cell).
    pub fn rebuild(&mut self, particles: &[Particle]) {
        self.cell_start.fill(0);
        self.particle_cells.clear();
        self.particle_cells.reserve(particles.len());

        for particle in particles {
            let cell = self.cell_of(particle.position);
            self.particle_cells.push(cell);
            self.cell_start[cell + 1] += 1;
        }
        let cells = self.cell_count();
        for cell in 0..cells {
            self.cell_start[cell + 1] += self.cell_start[cell];
        }

        self.cursor.copy_from_slice(&self.cell_start[..cells]);
        self.entries.resize(particles.len(), 0);
        for (index, &cell) in self.particle_cells.iter().enumerate() {
            self.entries[self.cursor[cell]] = index;
            self.cursor[cell] += 1;
        }
    }

    /// Indices of particles in `cell`.
    pub fn members(&self, cell: usize) -> &[usize] {
        &self.entries[self.cell_start[cell]..self.cell_start[cell + 1]]
    }

    /// Visit each distinct cell of the 3x3 block around `cell`.
    #[inline]
    pub fn for_each_neighbour_cell(&self, cell: usize, mut visit: impl FnMut(usize)) {
        match &self.neighbour_cache {
            Some(cache) => {
                for &n in &cache.cells[cache.offsets[cell]..cache.offsets[cell + 1]] {
                    visit(n);
                }
            }
            None => {
                let (list, len) = neighbour_block(self.cols, self.rows, cell);
                for &n in &list[..len] {
                    visit(n);
                }
            }
        }
    }

    /// Visit every particle that may lie within `r_max` of `cell`.
    #[inline]
    pub fn for_each_candidate(&self, cell: usize, mut visit: impl FnMut(usize)) {
        self.for_each_neighbour_cell(cell, |n| {
            for &index in self.members(n) {
                visit(index);
            }
        });
    }
}

/// Distinct cells of the wrapped 3x3 block centred on `cell`.
///
/// Grids narrower than three cells would otherwise visit a cell twice.
fn neighbour_block(cols: usize, rows: usize, cell: usize) -> ([usize; 9], usize) {
    let cx = (cell % cols) as isize;
    let cy = (cell / cols) as isize;
    let mut list = [0usize; 9];
    let mut len = 0;

    for dy in -1..=1isize {
        for dx in -1..=1isize {
            let nx = (cx + dx).rem_euclid(cols as isize) as usize;
            let ny = (cy + dy).rem_euclid(rows as isize) as usize;
            let n = ny * cols + nx;
            if !list[..len].contains(&n) {
                list[len] = n;
                len += 1;
            }
        }
    }
    (list, len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbours(grid: &ChunkGrid, cell: usize) -> Vec<usize> {
        let mut out = Vec::new();
        grid.for_each_neighbour_cell(cell, |n| out.push(n));
        out.sort_unstable();
        out
    }

    #[test]
    fn test_dimensions_follow_r_max() {
        let grid = ChunkGrid::new(World::new(500.0, 500.0), 100.0, false);
        assert_eq!(grid.dimensions(), (5, 5));

        let grid = ChunkGrid::new(World::new(500.0, 300.0), 120.0, false);
        assert_eq!(grid.dimensions(), (4, 2));

        let grid = ChunkGrid::new(World::new(500.0, 500.0), 1000.0, false);
        assert_eq!(grid.dimensions(), (1, 1));
    }

    #[test]
    fn test_corner_neighbours_wrap() {
        let grid = ChunkGrid::new(World::new(500.0, 500.0), 100.0, false);
        assert_eq!(neighbours(&grid, 0), vec![0, 1, 4, 5, 6, 9, 20, 21, 24]);
    }

    #[test]
    fn test_cached_matches_uncached() {
        let world = World::new(700.0, 400.0);
        let plain = ChunkGrid::new(world, 90.0, false);
        let cached = ChunkGrid::new(world, 90.0, true);
        assert!(cached.is_cached());
        for cell in 0..plain.cell_count() {
            assert_eq!(neighbours(&plain, cell), neighbours(&cached, cell));
        }
    }

    #[test]
    fn test_small_grid_deduplicates() {
        let grid = ChunkGrid::new(World::new(500.0, 500.0), 200.0, true);
        assert_eq!(grid.dimensions(), (2, 2));
        assert_eq!(neighbours(&grid, 3), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_rebuild_bins_every_particle_once() {
        let mut grid = ChunkGrid::new(World::new(500.0, 500.0), 100.0, false);
        let particles = vec![
            Particle::new(Vec2::new(10.0, 10.0), 0),
            Particle::new(Vec2::new(499.9, 499.9), 1),
            Particle::new(Vec2::new(150.0, 20.0), 0),
            Particle::new(Vec2::new(15.0, 5.0), 2),
        ];
        grid.rebuild(&particles);

        assert_eq!(grid.members(0), &[0, 3]);
        assert_eq!(grid.members(1), &[2]);
        assert_eq!(grid.members(24), &[1]);
        assert_eq!(grid.cell_of_particle(1), 24);

        let total: usize = (0..grid.cell_count()).map(|c| grid.members(c).len()).sum();
        assert_eq!(total, particles.len());
    }

    #[test]
    fn test_rebuild_reuses_bins() {
        let mut grid = ChunkGrid::new(World::new(300.0, 700.0), 100.0, true);
        assert_eq!(grid.dimensions(), (3, 7));

        grid.rebuild(&[
            Particle::new(Vec2::new(250.0, 650.0), 0),
            Particle::new(Vec2::new(10.0, 10.0), 0),
        ]);
        assert_eq!(grid.members(20), &[0]);

        // second pass must not keep counts or entries from the first
        let particles = [
            Particle::new(Vec2::new(150.0, 350.0), 0),
            Particle::new(Vec2::new(160.0, 340.0), 1),
            Particle::new(Vec2::new(10.0, 10.0), 0),
        ];
        grid.rebuild(&particles);
        assert!(grid.members(20).is_empty());
        assert_eq!(grid.members(10), &[0, 1]);
        assert_eq!(grid.members(0), &[2]);

        let total: usize = (0..grid.cell_count()).map(|c| grid.members(c).len()).sum();
        assert_eq!(total, particles.len());
    }

    #[test]
    fn test_matches_geometry() {
        let world = World::default();
        let grid = ChunkGrid::new(world, 100.0, true);
        assert!(grid.matches(&world, 100.0));
        assert!(!grid.matches(&world, 80.0));
        assert!(!grid.matches(&World::new(400.0, 500.0), 100.0));
    }
}
