pub mod axes;
pub mod wireframe;

pub use axes::Axes;
pub use wireframe::Wireframe;
