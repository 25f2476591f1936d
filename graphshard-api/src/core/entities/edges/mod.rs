pub mod edge;
pub mod triplet;
