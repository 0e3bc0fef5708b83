//! Scene state that feeds the uniform buffers

mod camera;
mod camera_controller;
mod transform;

pub use camera::*;
pub use camera_controller::*;
pub use transform::*;
