use crate::{Element, IntoElement};
use ply_rs::ply;
use std::mem;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

// Teach wgpu how a vertex is laid out.
impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

// Teach wireview where the vertex lives in the PLY header.
impl IntoElement for Vertex {
    fn element() -> Element {
        Element::Vertex
    }
}

// Teach ply_rs how a vertex is parsed.  Exporters write the
// coordinates as float or double; both land in f32 here.
impl ply::PropertyAccess for Vertex {
    fn new() -> Self {
        Vertex { position: [0.0, 0.0, 0.0] }
    }

    fn set_property(&mut self, key: String, property: ply::Property) {
        match (key.as_ref(), property) {
            ("x", ply::Property::Float(v)) => self.position[0] = v,
            ("y", ply::Property::Float(v)) => self.position[1] = v,
            ("z", ply::Property::Float(v)) => self.position[2] = v,
            ("x", ply::Property::Double(v)) => self.position[0] = v as f32,
            ("y", ply::Property::Double(v)) => self.position[1] = v as f32,
            ("z", ply::Property::Double(v)) => self.position[2] = v as f32,
            (_, _) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ply_rs::ply::PropertyAccess;

    #[test]
    fn float_coordinates() {
        let mut v = <Vertex as PropertyAccess>::new();
        v.set_property("x".to_string(), ply::Property::Float(1.0));
        v.set_property("y".to_string(), ply::Property::Float(-2.5));
        v.set_property("z".to_string(), ply::Property::Float(0.25));
        assert_eq!(v.position, [1.0, -2.5, 0.25]);
    }

    #[test]
    fn double_coordinates() {
        let mut v = <Vertex as PropertyAccess>::new();
        v.set_property("x".to_string(), ply::Property::Double(3.0));
        v.set_property("z".to_string(), ply::Property::Double(-1.0));
        assert_eq!(v.position, [3.0, 0.0, -1.0]);
    }

    #[test]
    fn unknown_properties_are_ignored() {
        let mut v = <Vertex as PropertyAccess>::new();
        v.set_property("nx".to_string(), ply::Property::Float(9.0));
        v.set_property("red".to_string(), ply::Property::UChar(255));
        assert_eq!(v.position, [0.0, 0.0, 0.0]);
    }
}
