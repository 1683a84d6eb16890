pub mod scene;
pub mod sort;
pub mod starfield;
