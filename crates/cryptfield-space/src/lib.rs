//! Spatial data structures for cryptfield simulations.
//!
//! This crate defines [`Grid`], the bounded 2D scalar container every
//! other component reads and writes, along with the helpers that give
//! it shape:
//!
//! - [`moore`]: the fixed-order 8-connected neighbourhood.
//! - [`stamp`]: disk enumeration and the shape stamper that carves
//!   attractor footprints into a grid.
//! - [`aggregate`]: block-sum downsampling from the fine resource grid
//!   to the coarse grid the path solver runs on.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod error;
pub mod grid;
pub mod moore;
pub mod stamp;

pub use aggregate::Aggregator;
pub use error::SpaceError;
pub use grid::Grid;
pub use moore::{chebyshev, moore_neighbours, MOORE_OFFSETS};
pub use stamp::{disk_cells, stamp_disk, OBSTACLE};
