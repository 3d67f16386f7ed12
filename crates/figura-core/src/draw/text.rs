//! Text blocks and labels attached to other elements.

use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    draw::{Decoration, Element, SvgNode},
    geometry::{Bounds, Point, Side, Size, round3},
    text::{HorizontalAlign, TextMetrics, VerticalAlign, split_lines},
};

/// Default distance between a label and the geometry it describes.
pub const DEFAULT_TEXT_DISTANCE: f32 = 6.0;

/// Parameters of a [`Text`] element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextProps {
    pub position: Point,
    pub content: String,
    pub h_align: HorizontalAlign,
    pub v_align: VerticalAlign,
    pub metrics: TextMetrics,
}

impl TextProps {
    /// Text centered on `position`.
    pub fn new(position: Point, content: impl Into<String>, metrics: &TextMetrics) -> Self {
        Self {
            position,
            content: content.into(),
            h_align: HorizontalAlign::default(),
            v_align: VerticalAlign::default(),
            metrics: metrics.clone(),
        }
    }

    pub fn with_align(mut self, h_align: HorizontalAlign, v_align: VerticalAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }
}

/// A possibly multi-line block of text.
///
/// The anchor point and the alignments decide where the block sits: a
/// [`HorizontalAlign::Left`] block starts at the anchor, a
/// [`VerticalAlign::Bottom`] block rests on it. Lines are laid out one line
/// height apart and each is vertically centered within its line box.
#[derive(Debug)]
pub struct Text {
    props: TextProps,
    size: Size,
    pub(super) decoration: Decoration,
}

impl Text {
    pub fn new(props: TextProps) -> Self {
        let size = props.metrics.size(&props.content);
        Self {
            props,
            size,
            decoration: Decoration::default(),
        }
    }

    pub fn content(&self) -> &str {
        &self.props.content
    }

    pub fn position(&self) -> Point {
        self.props.position
    }

    /// Estimated extent of the text block.
    pub fn size(&self) -> Size {
        self.size
    }

    fn top_left(&self) -> Point {
        let shift = Point::new(
            self.size.width() * self.props.h_align.factor(),
            self.size.height() * self.props.v_align.factor(),
        );
        self.props.position.sub_point(shift)
    }
}

impl Element for Text {
    fn bounds(&self) -> Bounds {
        let own = Bounds::from_center(
            self.top_left().add_point(self.size.to_point().scale(0.5)),
            self.size.to_point().scale(0.5),
        );
        self.decoration.bounds(own)
    }

    fn render(&self) -> SvgNode {
        let x = round3(self.props.position.x());
        let top = self.top_left().y();
        let line_height = self.props.metrics.line_height();

        let mut text = svg_element::Text::new("")
            .set("x", x)
            .set("y", round3(line_height.mul_add(0.5, top)))
            .set("text-anchor", self.props.h_align.text_anchor())
            .set("dominant-baseline", "central")
            .set("font-size", round3(self.props.metrics.font_size()));

        for (index, line) in split_lines(&self.props.content).into_iter().enumerate() {
            let y = line_height.mul_add(index as f32 + 0.5, top);
            let tspan = svg_element::TSpan::new("")
                .set("x", x)
                .set("y", round3(y))
                .add(SvgText::new(line));
            text = text.add(tspan);
        }

        self.decoration.render(text)
    }
}

/// Text to attach to another element.
///
/// The owning element picks the anchor point; the label carries the
/// content, the metrics and optional overrides for the placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    content: String,
    metrics: TextMetrics,
    align: Option<(HorizontalAlign, VerticalAlign)>,
    gap: f32,
    side: Side,
}

impl Label {
    pub fn new(content: impl Into<String>, metrics: &TextMetrics) -> Self {
        Self {
            content: content.into(),
            metrics: metrics.clone(),
            align: None,
            gap: DEFAULT_TEXT_DISTANCE,
            side: Side::Left,
        }
    }

    /// Overrides the alignment the owning element would pick.
    pub fn with_align(mut self, h_align: HorizontalAlign, v_align: VerticalAlign) -> Self {
        self.align = Some((h_align, v_align));
        self
    }

    /// Distance from the owning geometry: the inset inside rectangles, the
    /// offset off connectors.
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Side of a connector the label is placed on, relative to its
    /// direction of travel.
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn align(&self) -> Option<(HorizontalAlign, VerticalAlign)> {
        self.align
    }

    /// Builds the text element at `anchor`, using `default_align` unless
    /// the label overrides it.
    pub(crate) fn place(
        self,
        anchor: Point,
        default_align: (HorizontalAlign, VerticalAlign),
    ) -> Text {
        let (h_align, v_align) = self.align.unwrap_or(default_align);
        Text::new(TextProps {
            position: anchor,
            content: self.content,
            h_align,
            v_align,
            metrics: self.metrics,
        })
    }

    /// Places the label beside a connector segment.
    ///
    /// The label is pushed `gap` units off `midpoint`, perpendicular to
    /// `direction`, on the label's side. Alignment follows the push so the
    /// text grows away from the connector.
    pub(crate) fn place_beside(self, midpoint: Point, direction: Point) -> crate::Result<Text> {
        let offset = direction.normalize(self.gap)?.rotate(self.side);
        let align = align_for_offset(offset);
        Ok(self.place(midpoint.add_point(offset), align))
    }
}

/// Alignment for text pushed off an anchor by `offset`, so the text
/// extends away from the anchor.
///
/// Offsets that are mostly vertical center the text horizontally and
/// offsets that are mostly horizontal center it vertically. Diagonal
/// offsets align both axes away from the anchor.
///
/// ```
/// # use figura_core::draw::align_for_offset;
/// # use figura_core::geometry::Point;
/// # use figura_core::text::{HorizontalAlign, VerticalAlign};
/// let above = align_for_offset(Point::new(0.0, -6.0));
/// assert_eq!(above, (HorizontalAlign::Center, VerticalAlign::Bottom));
/// ```
pub fn align_for_offset(offset: Point) -> (HorizontalAlign, VerticalAlign) {
    let horizontal = if offset.x() > 0.0 {
        HorizontalAlign::Left
    } else {
        HorizontalAlign::Right
    };
    let vertical = if offset.y() < 0.0 {
        VerticalAlign::Bottom
    } else {
        VerticalAlign::Top
    };

    let (dx, dy) = (offset.x().abs(), offset.y().abs());
    if dy > 2.0 * dx {
        (HorizontalAlign::Center, vertical)
    } else if dx > 2.0 * dy {
        (horizontal, VerticalAlign::Center)
    } else {
        (horizontal, vertical)
    }
}
