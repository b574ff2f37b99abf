use crate::{Element, IntoElement};
use ply_rs::ply;

// A triangle already expanded into line-list form: face (i, j, k)
// becomes [i,j, j,k, k,i], one index pair per edge.  Adjacent
// triangles each keep their own copy of a shared edge.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WireFacet {
    pub vertex_indices: [u32; 6],
}

impl WireFacet {
    fn expand(&mut self, [i, j, k]: [u32; 3]) {
        self.vertex_indices = [i, j, j, k, k, i];
    }
}

// Teach wireview where the facet lives in the PLY header.
impl IntoElement for WireFacet {
    fn element() -> Element {
        Element::Facet
    }
}

// Teach ply_rs how a facet is parsed.  A signed index from a ListInt
// wraps to a huge u32 and is caught by the loader's range check.
impl ply::PropertyAccess for WireFacet {
    fn new() -> Self {
        WireFacet {
            vertex_indices: [0, 0, 0, 0, 0, 0],
        }
    }

    fn set_property(&mut self, key: String, property: ply::Property) {
        match (key.as_ref(), property) {
            ("vertex_indices" | "vertex_index", ply::Property::ListInt(vec)) => {
                if vec.len() == 3 {
                    self.expand([vec[0] as u32, vec[1] as u32, vec[2] as u32]);
                } else {
                    panic!("facet with {} vertices, expected a triangle", vec.len());
                }
            }
            ("vertex_indices" | "vertex_index", ply::Property::ListUInt(vec)) => {
                if vec.len() == 3 {
                    self.expand([vec[0], vec[1], vec[2]]);
                } else {
                    panic!("facet with {} vertices, expected a triangle", vec.len());
                }
            }
            (_, _) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ply_rs::ply::PropertyAccess;

    #[test]
    fn triangle_expands_to_three_edges() {
        let mut facet = <WireFacet as PropertyAccess>::new();
        facet.set_property(
            "vertex_indices".to_string(),
            ply::Property::ListInt(vec![0, 1, 2]),
        );
        assert_eq!(facet.vertex_indices, [0, 1, 1, 2, 2, 0]);
    }

    #[test]
    fn unsigned_index_list() {
        let mut facet = <WireFacet as PropertyAccess>::new();
        facet.set_property(
            "vertex_index".to_string(),
            ply::Property::ListUInt(vec![4, 7, 5]),
        );
        assert_eq!(facet.vertex_indices, [4, 7, 7, 5, 5, 4]);
    }

    #[test]
    #[should_panic(expected = "expected a triangle")]
    fn quad_is_rejected() {
        let mut facet = <WireFacet as PropertyAccess>::new();
        facet.set_property(
            "vertex_indices".to_string(),
            ply::Property::ListInt(vec![0, 1, 2, 3]),
        );
    }
}
