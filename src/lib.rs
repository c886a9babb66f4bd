pub mod error;
pub mod grid;
pub mod replay;
pub mod union_find;

pub use error::{Error, Result};
pub use grid::Percolation;
pub use union_find::UnionFind;
