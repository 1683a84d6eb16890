pub mod frame;
pub mod recording;
pub mod surface;
pub mod svg_surface;
