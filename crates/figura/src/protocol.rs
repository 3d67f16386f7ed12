//! Protocol diagrams: participants exchanging messages over time.
//!
//! A [`ProtocolDiagram`] lists participants from left to right and the
//! messages they send, in order. Layout walks the messages with a time
//! cursor. Each message takes one time unit plus its `latency` (the time
//! it spends in flight, which tilts its arrow downwards) plus its `delay`
//! (idle time before the next message is sent).
//!
//! Layout does not check that messages are causally ordered: diagrams of
//! reordering or retransmission are expected to break causality on
//! purpose.
//!
//! # Example
//!
//! ```
//! # use figura::config::AppConfig;
//! # use figura::protocol::{Message, ProtocolDiagram};
//! # fn main() -> Result<(), figura::FiguraError> {
//! let diagram = ProtocolDiagram::new(["Alice", "Bob"])
//!     .with_message(Message::new(0, 1, "Hi Bob!"))
//!     .with_message(Message::new(1, 0, "Hi Alice!").with_latency(1.0));
//!
//! let layout = diagram.layout(&AppConfig::default())?;
//! assert_eq!(layout.messages().len(), 2);
//! assert_eq!(layout.messages()[0].start().y(), layout.messages()[0].end().y());
//! # Ok(())
//! # }
//! ```

use log::{debug, trace};
use serde::Deserialize;

use figura_core::{
    color::ColorToken,
    draw::{
        Decorated, Element, Label, Line, LineProps, Marker, MarkerSet, Rectangle,
        RectangleProps, Text, TextProps, align_for_offset,
    },
    geometry::{Point, Side, Size},
    text::TextMetrics,
};

use crate::{FiguraError, config::AppConfig};

/// A message sent from one participant to another.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    /// Index of the sending participant.
    pub from: usize,
    /// Index of the receiving participant.
    pub to: usize,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub color: Option<ColorToken>,
    /// Time units spent in flight.
    #[serde(default)]
    pub latency: f32,
    /// Idle time units before the next message.
    #[serde(default)]
    pub delay: f32,
    /// Manual adjustment of the label position.
    #[serde(default)]
    pub text_offset: [f32; 2],
}

impl Message {
    pub fn new(from: usize, to: usize, text: impl Into<String>) -> Self {
        Self {
            from,
            to,
            text: text.into(),
            color: None,
            latency: 0.0,
            delay: 0.0,
            text_offset: [0.0, 0.0],
        }
    }

    pub fn with_latency(mut self, latency: f32) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_color(mut self, color: ColorToken) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_text_offset(mut self, offset: Point) -> Self {
        self.text_offset = [offset.x(), offset.y()];
        self
    }

    /// Time units this message occupies on the time axis.
    pub fn duration(&self) -> f32 {
        1.0 + self.latency + self.delay
    }
}

/// Participants and the messages they exchange.
///
/// Diagrams are plain values: variants of a scenario clone a base diagram
/// and edit its message list before layout.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProtocolDiagram {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    participants: Vec<String>,
    #[serde(default)]
    messages: Vec<Message>,
}

impl ProtocolDiagram {
    pub fn new<S: Into<String>>(participants: impl IntoIterator<Item = S>) -> Self {
        Self {
            participants: participants.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parses a scenario file.
    ///
    /// ```
    /// # use figura::protocol::ProtocolDiagram;
    /// let diagram = ProtocolDiagram::from_toml(r#"
    ///     title = "Ping"
    ///     participants = ["Client", "Server"]
    ///
    ///     [[messages]]
    ///     from = 0
    ///     to = 1
    ///     text = "ping"
    ///     latency = 1.0
    /// "#).unwrap();
    /// assert_eq!(diagram.messages()[0].latency, 1.0);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Scenario`] for malformed TOML or missing
    /// fields.
    pub fn from_toml(source: &str) -> Result<Self, FiguraError> {
        Ok(toml::from_str(source)?)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_mut(&mut self, index: usize) -> Option<&mut Message> {
        self.messages.get_mut(index)
    }

    /// Inserts a message before `index`, or appends it if `index` is past
    /// the end.
    pub fn insert(&mut self, index: usize, message: Message) {
        let index = index.min(self.messages.len());
        self.messages.insert(index, message);
    }

    /// Removes and returns the message at `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<Message> {
        (index < self.messages.len()).then(|| self.messages.remove(index))
    }

    /// Total time units spanned by all messages.
    pub fn total_units(&self) -> f32 {
        self.messages.iter().map(Message::duration).sum()
    }

    /// Lays out headers, lifelines and message arrows.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::UnknownParticipant`] for a message that
    /// refers to a participant index out of range,
    /// [`FiguraError::Scenario`] for a diagram without participants or for
    /// a message a participant sends to itself, and
    /// [`FiguraError::Geometry`] if a shape cannot be built.
    pub fn layout(&self, config: &AppConfig) -> Result<ProtocolLayout, FiguraError> {
        if self.participants.is_empty() {
            return Err(FiguraError::Scenario(
                "a protocol diagram needs at least one participant".to_string(),
            ));
        }

        let style = config.style();
        let protocol = config.protocol();
        let metrics = style.text_metrics();
        let padding = protocol.header_padding();
        let unit = protocol.unit_height();

        let header = self
            .participants
            .iter()
            .map(|name| metrics.size(name))
            .fold(Size::default(), Size::max)
            .pad(padding);
        let pitch = header.width() + protocol.column_gap();
        let column_x = |index: usize| (index as f32).mul_add(pitch, header.width() / 2.0);
        let top = header.height();
        let total = self.total_units();
        debug!(
            participants = self.participants.len(),
            messages = self.messages.len(),
            column_width = header.width(),
            total_units = total;
            "Protocol layout"
        );

        let headers = self
            .participants
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let position = Point::new(index as f32 * pitch, 0.0);
                Ok(Rectangle::new(RectangleProps::new(position, header))?
                    .text(Label::new(name.as_str(), &metrics)))
            })
            .collect::<Result<Vec<_>, FiguraError>>()?;

        let lifeline_stroke = style
            .stroke()
            .with_markers(MarkerSet::NONE)
            .with_dashed(true);
        let bottom = (total + protocol.lifeline_tail()).mul_add(unit, top);
        let lifelines = (0..self.participants.len())
            .map(|index| {
                let x = column_x(index);
                Line::new(
                    LineProps::new(Point::new(x, top), Point::new(x, bottom))
                        .with_stroke(lifeline_stroke),
                )
                .with_color(ColorToken::Grey)
            })
            .collect();

        let stroke = style.stroke();
        let mut cursor = 0.0f32;
        let mut messages = Vec::with_capacity(self.messages.len());
        for (index, message) in self.messages.iter().enumerate() {
            let participant = |i: usize| {
                if i < self.participants.len() {
                    Ok(column_x(i))
                } else {
                    Err(FiguraError::UnknownParticipant {
                        index: i,
                        participants: self.participants.len(),
                    })
                }
            };
            let (from_x, to_x) = (participant(message.from)?, participant(message.to)?);
            if message.from == message.to {
                return Err(FiguraError::Scenario(format!(
                    "message {index} is sent from participant {} to itself",
                    message.from
                )));
            }

            // Arrows stop short of the lifelines horizontally only, so
            // that equal heights keep them level.
            let heading = (to_x - from_x).signum();
            let start_y = (cursor + 1.0).mul_add(unit, top);
            let end_y = message.latency.mul_add(unit, start_y);
            let start = Point::new(
                heading.mul_add(stroke.end_offset(Marker::Start), from_x),
                start_y,
            );
            let end = Point::new(
                to_x - heading * stroke.end_offset(Marker::End),
                end_y,
            );
            trace!(index, start:?, end:?; "Message");

            let mut line = Line::new(LineProps::new(start, end).with_stroke(stroke));
            if let Some(color) = message.color {
                line = line.with_color(color);
            }
            if !message.text.is_empty() {
                let label = message_label(message, &line, style.text_distance(), &metrics)?;
                line = line.add(label);
            }
            messages.push(line);
            cursor += message.duration();
        }

        Ok(ProtocolLayout {
            headers,
            lifelines,
            messages,
        })
    }
}

/// Text above a message arrow, whichever way the arrow points.
fn message_label(
    message: &Message,
    line: &Line,
    distance: f32,
    metrics: &TextMetrics,
) -> Result<Text, FiguraError> {
    let direction = line.end().sub_point(line.start());
    let side = if direction.x() >= 0.0 {
        Side::Left
    } else {
        Side::Right
    };
    let offset = direction.normalize(distance)?.rotate(side);
    let (h_align, v_align) = align_for_offset(offset);
    let [dx, dy] = message.text_offset;
    let position = line.midpoint().add_point(offset).add_point(Point::new(dx, dy));
    Ok(Text::new(
        TextProps::new(position, message.text.as_str(), metrics).with_align(h_align, v_align),
    ))
}

/// The elements of a laid-out protocol diagram.
#[derive(Debug)]
pub struct ProtocolLayout {
    headers: Vec<Rectangle>,
    lifelines: Vec<Line>,
    messages: Vec<Line>,
}

impl ProtocolLayout {
    /// Participant headers, left to right.
    pub fn headers(&self) -> &[Rectangle] {
        &self.headers
    }

    pub fn lifelines(&self) -> &[Line] {
        &self.lifelines
    }

    /// Message arrows with their labels, in sending order.
    pub fn messages(&self) -> &[Line] {
        &self.messages
    }

    /// All elements, lifelines first so that arrows draw over them.
    pub fn into_elements(self) -> Vec<Box<dyn Element>> {
        let lifelines = self.lifelines.into_iter().map(|l| Box::new(l) as Box<dyn Element>);
        let headers = self.headers.into_iter().map(|h| Box::new(h) as Box<dyn Element>);
        let messages = self.messages.into_iter().map(|m| Box::new(m) as Box<dyn Element>);
        lifelines.chain(headers).chain(messages).collect()
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn message_strategy(participants: usize) -> impl Strategy<Value = Message> {
        (0..participants, 1..participants, 0.0f32..3.0, 0.0f32..3.0).prop_map(
            move |(from, shift, latency, delay)| {
                Message::new(from, (from + shift) % participants, "msg")
                    .with_latency(latency)
                    .with_delay(delay)
            },
        )
    }

    fn diagram_strategy() -> impl Strategy<Value = ProtocolDiagram> {
        (2usize..5).prop_flat_map(|participants| {
            prop::collection::vec(message_strategy(participants), 0..8).prop_map(
                move |messages| {
                    let names = (0..participants).map(|i| format!("P{i}"));
                    messages
                        .into_iter()
                        .fold(ProtocolDiagram::new(names), ProtocolDiagram::with_message)
                },
            )
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Every arrow drops by exactly its latency in rows.
    fn check_arrow_span_matches_latency(diagram: &ProtocolDiagram) -> Result<(), TestCaseError> {
        let config = AppConfig::default();
        let unit = config.protocol().unit_height();
        let layout = diagram
            .layout(&config)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        for (message, line) in diagram.messages().iter().zip(layout.messages()) {
            let span = line.end().y() - line.start().y();
            prop_assert!(
                approx_eq!(f32, span, message.latency * unit, epsilon = 1e-3),
                "span {span} for latency {}",
                message.latency
            );
        }
        Ok(())
    }

    /// Arrows are sent in order and never leave the lifelines.
    fn check_arrows_within_lifelines(diagram: &ProtocolDiagram) -> Result<(), TestCaseError> {
        let layout = diagram
            .layout(&AppConfig::default())
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let lifeline_end = layout.lifelines()[0].end().y();

        let mut previous = f32::NEG_INFINITY;
        for line in layout.messages() {
            prop_assert!(line.start().y() > previous);
            prop_assert!(line.end().y() <= lifeline_end + 1e-3);
            previous = line.start().y();
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn arrow_span_matches_latency(diagram in diagram_strategy()) {
            check_arrow_span_matches_latency(&diagram)?;
        }

        #[test]
        fn arrows_within_lifelines(diagram in diagram_strategy()) {
            check_arrows_within_lifelines(&diagram)?;
        }
    }
}
