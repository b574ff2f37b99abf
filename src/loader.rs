use crate::{
    model::{Vertex, WireFacet},
    Element, IntoElement,
};
use ply_rs::{parser::Parser, ply};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read mesh: {0}")]
    Io(#[from] io::Error),
    #[error("mesh has no {0} element")]
    MissingElement(Element),
    #[error("facet {facet} references vertex {index}, but the mesh has {vertices} vertices")]
    IndexOutOfRange {
        facet: usize,
        index: u32,
        vertices: usize,
    },
}

// The loaded mesh, read-only for the rest of the program.  The facets
// are already in line-list form, so the GPU index buffer is just the
// flat view of them.
#[derive(Debug)]
pub struct WireMesh {
    pub vertices: Vec<Vertex>,
    pub facets: Vec<WireFacet>,
}

impl WireMesh {
    /// Number of line segments the wireframe draws: three per facet.
    pub fn edge_count(&self) -> usize {
        self.facets.len() * 3
    }

    /// The flat line-list index stream, two entries per edge.
    pub fn indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.facets)
    }

    /// Axis-aligned bounds of the vertices, None for an empty mesh.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let mut vertices = self.vertices.iter();
        let first = vertices.next()?.position;
        let (mut min, mut max) = (first, first);
        for v in vertices {
            for axis in 0..3 {
                min[axis] = min[axis].min(v.position[axis]);
                max[axis] = max[axis].max(v.position[axis]);
            }
        }
        Some((min, max))
    }

    // Every facet index must land inside the vertex list.  The whole
    // face list is checked before any window or GPU resource exists,
    // so a bad mesh never gets partially rendered.
    fn validate(&self) -> Result<(), LoadError> {
        for (facet, wire) in self.facets.iter().enumerate() {
            for &index in &wire.vertex_indices {
                if index as usize >= self.vertices.len() {
                    return Err(LoadError::IndexOutOfRange {
                        facet,
                        index,
                        vertices: self.vertices.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn read_element<T>(f: &mut impl BufRead, header: &ply::Header) -> Result<Vec<T>, LoadError>
where
    T: ply::PropertyAccess + IntoElement,
{
    let element = header
        .elements
        .get(T::element().name())
        .ok_or(LoadError::MissingElement(T::element()))?;
    let parse = Parser::<T>::new();
    Ok(parse.read_payload_for_element(f, element, header)?)
}

/// Load a triangular mesh from a PLY stream and validate its indices.
pub fn load(f: &mut impl BufRead) -> Result<WireMesh, LoadError> {
    let parse_header = Parser::<ply::DefaultElement>::new();
    let header = parse_header.read_header(f)?;

    // The payload is read as vertex element then face element.  That
    // is the layout every PLY exporter writes and the only one the
    // loader accepts; a file declaring face first is misread.
    let vertices = read_element::<Vertex>(f, &header)?;
    let facets = read_element::<WireFacet>(f, &header)?;

    let mesh = WireMesh { vertices, facets };
    mesh.validate()?;
    Ok(mesh)
}

pub fn load_path(path: &Path) -> Result<WireMesh, LoadError> {
    let f = File::open(path)?;
    load(&mut BufReader::new(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TRIANGLE: &str = "\
ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
0 1 0
3 0 1 2
";

    const TWO_TRIANGLES: &str = "\
ply
format ascii 1.0
element vertex 4
property float x
property float y
property float z
element face 2
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
0 1 0
1 1 0
3 0 1 2
3 1 3 2
";

    const NO_FACES: &str = "\
ply
format ascii 1.0
element vertex 2
property float x
property float y
property float z
element face 0
property list uchar int vertex_indices
end_header
0 0 0
1 2 3
";

    const BAD_INDEX: &str = "\
ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
0 1 0
3 0 1 9
";

    const VERTICES_ONLY: &str = "\
ply
format ascii 1.0
element vertex 1
property float x
property float y
property float z
end_header
0 0 0
";

    fn load_str(ply: &str) -> Result<WireMesh, LoadError> {
        load(&mut Cursor::new(ply.as_bytes()))
    }

    #[test]
    fn single_triangle() {
        let mesh = load_str(TRIANGLE).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(mesh.facets[0].vertex_indices, [0, 1, 1, 2, 2, 0]);
        assert_eq!(mesh.edge_count(), 3);
        assert_eq!(mesh.indices().len(), 6);
    }

    #[test]
    fn three_edges_per_facet() {
        let mesh = load_str(TWO_TRIANGLES).unwrap();
        assert_eq!(mesh.edge_count(), 3 * mesh.facets.len());
        assert_eq!(mesh.indices().len(), 6 * mesh.facets.len());
    }

    #[test]
    fn edge_endpoints_match_vertices() {
        let mesh = load_str(TWO_TRIANGLES).unwrap();
        let expected = [
            ([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [0.0, 0.0, 0.0]),
        ];
        for (edge, (a, b)) in mesh.indices().chunks(2).zip(expected) {
            assert_eq!(mesh.vertices[edge[0] as usize].position, a);
            assert_eq!(mesh.vertices[edge[1] as usize].position, b);
        }
    }

    #[test]
    fn shared_edges_are_drawn_twice() {
        let mesh = load_str(TWO_TRIANGLES).unwrap();
        let shared = mesh
            .indices()
            .chunks(2)
            .filter(|edge| {
                let mut edge = [edge[0], edge[1]];
                edge.sort();
                edge == [1, 2]
            })
            .count();
        assert_eq!(shared, 2);
    }

    #[test]
    fn zero_facets_is_a_valid_mesh() {
        let mesh = load_str(NO_FACES).unwrap();
        assert_eq!(mesh.vertices.len(), 2);
        assert_eq!(mesh.edge_count(), 0);
        assert!(mesh.indices().is_empty());
    }

    #[test]
    fn out_of_range_index_fails_the_load() {
        let err = load_str(BAD_INDEX).unwrap_err();
        assert!(matches!(
            err,
            LoadError::IndexOutOfRange {
                facet: 0,
                index: 9,
                vertices: 3,
            }
        ));
    }

    #[test]
    fn missing_face_element() {
        let err = load_str(VERTICES_ONLY).unwrap_err();
        assert!(matches!(err, LoadError::MissingElement(Element::Facet)));
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let mesh = load_str(TWO_TRIANGLES).unwrap();
        assert_eq!(mesh.bounds(), Some(([0.0, 0.0, 0.0], [1.0, 1.0, 0.0])));
    }

    #[test]
    fn mesh_and_errors_format_for_assertions() {
        let mesh = load_str(TRIANGLE).unwrap();
        assert!(format!("{:?}", mesh).contains("WireMesh"));

        let err = load_str(BAD_INDEX).unwrap_err();
        assert!(format!("{:?}", err).contains("IndexOutOfRange"));
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        let mesh = WireMesh {
            vertices: vec![],
            facets: vec![],
        };
        assert_eq!(mesh.bounds(), None);
    }
}
