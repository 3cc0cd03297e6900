//! Data structures backing the connectivity engine.

pub mod union_find;

pub use union_find::UnionFind;
