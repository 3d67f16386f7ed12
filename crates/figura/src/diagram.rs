use std::fmt;

use figura_core::draw::Element;

/// A diagram ready to be rendered: its root elements and the text that
/// describes it.
pub struct Diagram {
    title: Option<String>,
    description: Option<String>,
    elements: Vec<Box<dyn Element>>,
}

impl Diagram {
    pub fn new(elements: Vec<Box<dyn Element>>) -> Self {
        Self {
            title: None,
            description: None,
            elements,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn elements(&self) -> &[Box<dyn Element>] {
        &self.elements
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Option<String>, Vec<Box<dyn Element>>) {
        (self.title, self.description, self.elements)
    }
}

impl fmt::Debug for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagram")
            .field("title", &self.title)
            .field("elements", &self.elements.len())
            .finish()
    }
}
