//! Property tests for grid accessors, disk stamping, and aggregation.

use cryptfield_core::Vector;
use cryptfield_space::{disk_cells, stamp_disk, Aggregator, Grid};
use proptest::prelude::*;

proptest! {
    #[test]
    fn out_of_range_reads_are_none(
        w in 1u32..20, h in 1u32..20,
        x in -40i32..40, y in -40i32..40,
    ) {
        let grid = Grid::new(w, h, 0u8).unwrap();
        let inside = x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h;
        prop_assert_eq!(grid.get(x, y).is_some(), inside);
    }

    #[test]
    fn set_then_get_round_trips(
        w in 1u32..20, h in 1u32..20,
        xf in 0.0f64..1.0, yf in 0.0f64..1.0,
        v in -1000.0f32..1000.0,
    ) {
        let mut grid = Grid::new(w, h, 0.0f32).unwrap();
        let x = (xf * w as f64) as i32;
        let y = (yf * h as f64) as i32;
        grid.set(x, y, v);
        prop_assert_eq!(grid.get(x, y), Some(v));
    }

    #[test]
    fn stamp_touches_exactly_the_disk(
        cx in -3.0f64..13.0, cy in -3.0f64..13.0,
        r in 0.0f64..6.0,
    ) {
        let mut grid = Grid::new(10, 10, 1i32).unwrap();
        let center = Vector::new(cx, cy);
        stamp_disk(&mut grid, center, r, -1);
        for (x, y, v) in grid.iter() {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            if dx * dx + dy * dy <= r * r {
                prop_assert_eq!(v, -1);
            } else {
                prop_assert_eq!(v, 1);
            }
        }
        prop_assert_eq!(
            disk_cells(center, r, 10, 10).count(),
            grid.cells().iter().filter(|&&v| v == -1).count()
        );
    }

    #[test]
    fn aggregate_preserves_total(
        size in 1u32..5, bw in 1u32..6, bh in 1u32..6,
        seed in 0u64..1000,
    ) {
        let w = size * bw;
        let h = size * bh;
        let fine = Grid::from_fn(w, h, |x, y| {
            (((x as u64 * 31 + y as u64 * 17 + seed) % 11) as f32) - 1.0
        }).unwrap();
        let agg = Aggregator::new(size).unwrap().aggregate(&fine).unwrap();
        prop_assert_eq!((agg.width(), agg.height()), (bw, bh));
        let fine_total: f64 = fine.cells().iter().map(|&v| v as f64).sum();
        let agg_total: f64 = agg.cells().iter().sum();
        prop_assert!((fine_total - agg_total).abs() < 1e-6);
    }
}
