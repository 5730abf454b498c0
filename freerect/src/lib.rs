//! Freerect is a small library for packing rectangles into a fixed-size
//! surface. It was built for Quilt, a tool that compiles folders of images
//! into texture atlases, but it has no opinion about what the rectangles
//! represent.
//!
//! The packer keeps a list of free rectangles, chooses the candidate that
//! leaves the least spare area for each request, and splits the free space
//! around every placement. Requests that cannot be satisfied return `None`
//! and leave the packer untouched.
//!
//! ## Example
//! ```
//! use freerect::AtlasPacker;
//!
//! // Construct a packer spanning the whole surface.
//! let mut packer = AtlasPacker::new((512, 512));
//!
//! // Request placements one at a time. Each success returns the rectangle
//! // that was reserved.
//! let placed = packer.insert((128, 64)).unwrap();
//! assert_eq!(placed.size(), (128, 64));
//!
//! // Impossible requests fail without disturbing earlier placements.
//! assert!(packer.insert((1024, 16)).is_none());
//! ```

mod geometry;
mod packer;

pub use geometry::*;
pub use packer::*;
