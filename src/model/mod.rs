mod vertex;
mod wireframe;

pub use vertex::Vertex;
pub use wireframe::WireFacet;
