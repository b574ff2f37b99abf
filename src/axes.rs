use crate::model::Vertex;

// Stroke glyphs for the three axis labels, each stroke one line
// segment in a local (u, v) square spanning -1..1.  Keeping the labels
// as line strokes keeps the whole program on the one line pipeline.
const GLYPH_X: &[[[f32; 2]; 2]] = &[
    [[-1.0, -1.0], [1.0, 1.0]],
    [[-1.0, 1.0], [1.0, -1.0]],
];

const GLYPH_Y: &[[[f32; 2]; 2]] = &[
    [[-1.0, 1.0], [0.0, 0.0]],
    [[1.0, 1.0], [0.0, 0.0]],
    [[0.0, 0.0], [0.0, -1.0]],
];

const GLYPH_Z: &[[[f32; 2]; 2]] = &[
    [[-1.0, 1.0], [1.0, 1.0]],
    [[1.0, 1.0], [-1.0, -1.0]],
    [[-1.0, -1.0], [1.0, -1.0]],
];

pub struct AxisLabel {
    pub text: &'static str,
    axis: [f32; 3],
    glyph_u: [f32; 3],
    glyph_v: [f32; 3],
    strokes: &'static [[[f32; 2]; 2]],
}

// The glyph plane per axis is spanned by the other two axes.
pub const LABELS: [AxisLabel; 3] = [
    AxisLabel {
        text: "X",
        axis: [1.0, 0.0, 0.0],
        glyph_u: [0.0, 1.0, 0.0],
        glyph_v: [0.0, 0.0, 1.0],
        strokes: GLYPH_X,
    },
    AxisLabel {
        text: "Y",
        axis: [0.0, 1.0, 0.0],
        glyph_u: [1.0, 0.0, 0.0],
        glyph_v: [0.0, 0.0, 1.0],
        strokes: GLYPH_Y,
    },
    AxisLabel {
        text: "Z",
        axis: [0.0, 0.0, 1.0],
        glyph_u: [1.0, 0.0, 0.0],
        glyph_v: [0.0, 1.0, 0.0],
        strokes: GLYPH_Z,
    },
];

const LABEL_OFFSET: f32 = 1.12; // label position along the axis, in extents
const GLYPH_SIZE: f32 = 0.05; // glyph half-size, in extents

/// The axis gizmo: three axis lines with stroke-glyph labels, as a
/// plain vertex stream for a non-indexed line-list draw.
pub struct AxisGizmo {
    pub vertices: Vec<Vertex>,
}

impl AxisGizmo {
    pub fn new(extent: f32) -> AxisGizmo {
        let mut vertices = Vec::new();

        for label in &LABELS {
            log::debug!("axis {} gizmo, extent {}", label.text, extent);

            // The axis line itself, origin to the positive end.
            vertices.push(Vertex { position: [0.0; 3] });
            vertices.push(Vertex {
                position: scale(label.axis, extent),
            });

            // The label, a bit past the axis end.
            let center = scale(label.axis, extent * LABEL_OFFSET);
            for stroke in label.strokes {
                for &[u, v] in stroke {
                    let mut p = center;
                    for axis in 0..3 {
                        p[axis] +=
                            (label.glyph_u[axis] * u + label.glyph_v[axis] * v) * extent * GLYPH_SIZE;
                    }
                    vertices.push(Vertex { position: p });
                }
            }
        }

        AxisGizmo { vertices }
    }
}

fn scale(v: [f32; 3], s: f32) -> [f32; 3] {
    [v[0] * s, v[1] * s, v[2] * s]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_always_x_y_z() {
        let text: Vec<&str> = LABELS.iter().map(|label| label.text).collect();
        assert_eq!(text, ["X", "Y", "Z"]);
    }

    #[test]
    fn every_label_has_strokes() {
        for label in &LABELS {
            assert!(!label.strokes.is_empty(), "label {} has no strokes", label.text);
        }
    }

    #[test]
    fn vertex_stream_is_line_pairs() {
        let gizmo = AxisGizmo::new(2.0);
        assert_eq!(gizmo.vertices.len() % 2, 0);

        // Three axis lines plus one segment per glyph stroke.
        let strokes: usize = LABELS.iter().map(|label| label.strokes.len()).sum();
        assert_eq!(gizmo.vertices.len(), 2 * (3 + strokes));
    }

    #[test]
    fn axis_lines_scale_with_the_extent() {
        let gizmo = AxisGizmo::new(4.0);
        assert_eq!(gizmo.vertices[1].position, [4.0, 0.0, 0.0]);
        let reach = gizmo
            .vertices
            .iter()
            .flat_map(|v| v.position)
            .fold(0.0_f32, |m, c| m.max(c.abs()));
        assert!(reach >= 4.0);
    }
}
