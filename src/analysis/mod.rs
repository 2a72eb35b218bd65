//! Region and edge analysis primitives.
//!
//! These are the structure-aware building blocks the filter catalog
//! composes: edge detection, clustering, edge-preserving blur, and spatial
//! segmentation. All of them are pure buffer-to-buffer (or buffer-to-map)
//! functions with clamped sampling at the image edges.

mod bilateral;
mod kmeans;
mod segment;
mod sobel;

pub use bilateral::bilateral;
pub use kmeans::{kmeans, Clustering, KMEANS_ITERATIONS};
pub use segment::{block_average, quadtree, voronoi};
pub use sobel::{sobel, EdgeMap};
