pub mod camera;
pub mod projector;
