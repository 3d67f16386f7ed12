use svg::node::element as svg_element;

use crate::{
    draw::{Decoration, Element, SvgNode},
    error::{Error, Result},
    geometry::Bounds,
};

/// A `<g>` wrapping other elements.
///
/// Groups have no geometry of their own; their bounds are the union of
/// their children's. A style on the group (a color or a transform) applies
/// to every child.
#[derive(Debug)]
pub struct Group {
    pub(super) decoration: Decoration,
}

impl Group {
    /// # Errors
    ///
    /// Returns [`Error::MissingChildren`] for an empty list of children.
    pub fn new(children: Vec<Box<dyn Element>>) -> Result<Self> {
        if children.is_empty() {
            return Err(Error::MissingChildren("group"));
        }
        Ok(Self {
            decoration: Decoration {
                children,
                ..Decoration::default()
            },
        })
    }

    pub fn children(&self) -> &[Box<dyn Element>] {
        self.decoration.children()
    }
}

impl Element for Group {
    fn bounds(&self) -> Bounds {
        let mut children = self.decoration.children().iter().map(|c| c.bounds());
        // Non-empty by construction.
        let first = children.next().unwrap_or_default();
        let union = children.fold(first, Bounds::encompass);
        self.decoration.style().transform_bounds(union)
    }

    fn render(&self) -> SvgNode {
        let mut group = svg_element::Group::new();
        for child in self.decoration.children() {
            group = group.add(child.render());
        }
        Box::new(self.decoration.style().apply(group))
    }
}
