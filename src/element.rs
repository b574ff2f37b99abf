// PLY files support "elements" with arbitrary names.  However, we need
// to know what the element actually is and what it can do, without the
// ambiguity of the name which is not even consistent across PLY
// utilities.  Element is an enum that fixes specifically what elements
// we support, and how they appear in PLY files.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    Vertex,
    Facet,
}

// Ties a parsed row type to the header element its payload comes from.
pub trait IntoElement {
    fn element() -> Element;
}

impl Element {
    pub fn name(&self) -> &'static str {
        match self {
            Element::Vertex => "vertex",
            Element::Facet => "face",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
