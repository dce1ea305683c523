//! The 8-connected (Moore) neighbourhood in a fixed enumeration order.
//!
//! Order matters to every consumer: diffusion ignites from the first
//! lit neighbour, the solver pushes neighbours onto a LIFO worklist, and
//! movement breaks ties against earlier candidates. The order is
//! row-major over the 3x3 block: `dy` outer, `dx` inner, centre skipped.

use smallvec::SmallVec;

/// All 8 offsets as `(dx, dy)`: NW, N, NE, W, E, SW, S, SE.
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// In-bounds Moore neighbours of `(x, y)` on a `width x height` grid,
/// in [`MOORE_OFFSETS`] order.
///
/// Out-of-bounds neighbours are omitted: corners have 3, edges 5,
/// interior cells 8.
pub fn moore_neighbours(x: i32, y: i32, width: u32, height: u32) -> SmallVec<[(i32, i32); 8]> {
    let w = width as i64;
    let h = height as i64;
    let mut out = SmallVec::new();
    for (dx, dy) in MOORE_OFFSETS {
        let nx = x as i64 + dx as i64;
        let ny = y as i64 + dy as i64;
        if nx >= 0 && nx < w && ny >= 0 && ny < h {
            out.push((nx as i32, ny as i32));
        }
    }
    out
}

/// Chebyshev (L-inf) distance, the hop count on an 8-connected grid.
pub fn chebyshev(a: (i32, i32), b: (i32, i32)) -> u32 {
    let dx = (a.0 as i64 - b.0 as i64).unsigned_abs();
    let dy = (a.1 as i64 - b.1 as i64).unsigned_abs();
    dx.max(dy) as u32
}
