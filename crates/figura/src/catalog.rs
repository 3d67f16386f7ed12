//! Built-in diagrams.
//!
//! Each entry is a function that builds a [`Diagram`] from the current
//! configuration. Entries are looked up by name with [`find`].
//!
//! ```
//! # use figura::{catalog, config::AppConfig};
//! let entry = catalog::find("hello").unwrap();
//! let diagram = entry.build(&AppConfig::default()).unwrap();
//! assert_eq!(diagram.title(), Some(entry.title()));
//! ```

use std::fmt;

use figura_core::{
    color::ColorToken,
    connector::{connection_arc, connection_line, diagonal_line},
    draw::{
        Circle, CircleProps, Decorated, Element, Ellipse, EllipseProps, Label, MarkerSet,
        Polygon, PolygonProps, Rectangle, RectangleProps,
    },
    geometry::{Point, Side, Size},
};

use crate::{
    FiguraError,
    config::AppConfig,
    diagram::Diagram,
    protocol::{Message, ProtocolDiagram},
};

type BuildFn = fn(&AppConfig) -> Result<Diagram, FiguraError>;

/// A named built-in diagram.
pub struct Entry {
    name: &'static str,
    title: &'static str,
    build: BuildFn,
}

impl Entry {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Builds the diagram with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an element of the diagram cannot be built with
    /// this configuration.
    pub fn build(&self, config: &AppConfig) -> Result<Diagram, FiguraError> {
        (self.build)(config)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("title", &self.title)
            .finish()
    }
}

static ENTRIES: &[Entry] = &[
    Entry {
        name: "hello",
        title: "Alice greets Bob",
        build: hello,
    },
    Entry {
        name: "tcp-handshake",
        title: "TCP three-way handshake",
        build: tcp_handshake,
    },
    Entry {
        name: "tcp-retransmission",
        title: "TCP handshake with a lost SYN",
        build: tcp_retransmission,
    },
    Entry {
        name: "client-server",
        title: "Client, server and database",
        build: client_server,
    },
    Entry {
        name: "network",
        title: "Hosts behind a router",
        build: network,
    },
];

/// Every built-in diagram, in listing order.
pub fn entries() -> &'static [Entry] {
    ENTRIES
}

/// Looks up a built-in diagram by name.
///
/// # Errors
///
/// Returns [`FiguraError::UnknownDiagram`] if no entry has that name.
pub fn find(name: &str) -> Result<&'static Entry, FiguraError> {
    ENTRIES
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| FiguraError::UnknownDiagram(name.to_string()))
}

fn protocol_diagram(
    diagram: &ProtocolDiagram,
    config: &AppConfig,
    title: &str,
) -> Result<Diagram, FiguraError> {
    let mut result = Diagram::new(diagram.layout(config)?.into_elements()).with_title(title);
    if let Some(description) = diagram.description() {
        result = result.with_description(description);
    }
    Ok(result)
}

fn hello(config: &AppConfig) -> Result<Diagram, FiguraError> {
    let diagram = ProtocolDiagram::new(["Alice", "Bob"])
        .with_description("Alice and Bob exchange greetings.")
        .with_message(Message::new(0, 1, "Hi Bob!"))
        .with_message(Message::new(1, 0, "Hi Alice!"));
    protocol_diagram(&diagram, config, "Alice greets Bob")
}

fn handshake() -> ProtocolDiagram {
    ProtocolDiagram::new(["Client", "Server"])
        .with_description("The client opens a connection to the server.")
        .with_message(
            Message::new(0, 1, "SYN")
                .with_latency(1.0)
                .with_color(ColorToken::Blue),
        )
        .with_message(
            Message::new(1, 0, "SYN-ACK")
                .with_latency(1.0)
                .with_color(ColorToken::Green),
        )
        .with_message(
            Message::new(0, 1, "ACK")
                .with_latency(1.0)
                .with_color(ColorToken::Blue),
        )
}

fn tcp_handshake(config: &AppConfig) -> Result<Diagram, FiguraError> {
    protocol_diagram(&handshake(), config, "TCP three-way handshake")
}

fn tcp_retransmission(config: &AppConfig) -> Result<Diagram, FiguraError> {
    let mut diagram = handshake().with_description(
        "The first SYN is lost; the client sends it again after a timeout.",
    );
    if let Some(lost) = diagram.message_mut(0) {
        lost.text = "SYN (lost)".to_string();
        lost.color = Some(ColorToken::Red);
        lost.latency = 0.5;
        lost.delay = 2.0;
    }
    diagram.insert(
        1,
        Message::new(0, 1, "SYN (retry)")
            .with_latency(1.0)
            .with_color(ColorToken::Orange),
    );
    protocol_diagram(&diagram, config, "TCP handshake with a lost SYN")
}

fn client_server(config: &AppConfig) -> Result<Diagram, FiguraError> {
    let style = config.style();
    let metrics = style.text_metrics();
    let stroke = style.stroke();
    let size = Size::new(120.0, 50.0);

    let client = Rectangle::new(RectangleProps::new(Point::new(0.0, 40.0), size).with_radius(6.0))?
        .text(Label::new("Client", &metrics));
    let server = Rectangle::new(RectangleProps::new(Point::new(240.0, 40.0), size))?
        .text(Label::new("Server", &metrics));
    let database = Rectangle::new(RectangleProps::new(Point::new(240.0, 170.0), size))?
        .with_color(ColorToken::Blue)
        .text(Label::new("Database", &metrics));

    let request = connection_line(&client, Side::Right, &server, Side::Left, stroke)
        .text(Label::new("request", &metrics).with_gap(style.text_distance()))?;
    let query = connection_line(
        &server,
        Side::Bottom,
        &database,
        Side::Top,
        stroke.with_markers(MarkerSet::BOTH),
    )
    .text(Label::new("SQL", &metrics).with_gap(style.text_distance()))?;
    let push = connection_arc(
        &server,
        Side::Top,
        &client,
        Side::Top,
        None,
        stroke.with_dashed(true),
    )?
    .with_color(ColorToken::Orange)
    .text(Label::new("push", &metrics).with_gap(style.text_distance()))?;

    let elements: Vec<Box<dyn Element>> = vec![
        Box::new(client),
        Box::new(server),
        Box::new(database),
        Box::new(request),
        Box::new(query),
        Box::new(push),
    ];
    Ok(Diagram::new(elements)
        .with_title("Client, server and database")
        .with_description("A client talks to a server backed by a database."))
}

fn network(config: &AppConfig) -> Result<Diagram, FiguraError> {
    let style = config.style();
    let metrics = style.text_metrics();
    let link = style.stroke().with_markers(MarkerSet::NONE);

    let router = Circle::new(CircleProps::new(Point::new(200.0, 120.0), 30.0))?
        .with_color(ColorToken::Blue)
        .text(Label::new("R", &metrics));
    let hosts = [
        ("A", Point::new(60.0, 40.0)),
        ("B", Point::new(60.0, 200.0)),
        ("C", Point::new(340.0, 40.0)),
        ("D", Point::new(340.0, 200.0)),
    ]
    .into_iter()
    .map(|(name, center)| {
        Ok(Circle::new(CircleProps::new(center, 24.0))?.text(Label::new(name, &metrics)))
    })
    .collect::<Result<Vec<_>, FiguraError>>()?;
    let internet = Ellipse::new(EllipseProps::new(Point::new(200.0, 300.0), 80.0, 30.0))?
        .with_color(ColorToken::Green)
        .text(Label::new("Internet", &metrics));
    let firewall = Polygon::new(PolygonProps::new([
        Point::new(200.0, 190.0),
        Point::new(215.0, 215.0),
        Point::new(185.0, 215.0),
    ]))?
    .with_color(ColorToken::Red)
    .with_class("filled");

    let mut elements: Vec<Box<dyn Element>> = Vec::new();
    for host in &hosts {
        elements.push(Box::new(diagonal_line(host, &router, link)?));
    }
    let uplink = diagonal_line(&router, &internet, style.stroke().with_dashed(true))?
        .with_color(ColorToken::Green);
    elements.push(Box::new(uplink));
    elements.push(Box::new(router));
    elements.extend(hosts.into_iter().map(|h| Box::new(h) as Box<dyn Element>));
    elements.push(Box::new(internet));
    elements.push(Box::new(firewall));

    Ok(Diagram::new(elements)
        .with_title("Hosts behind a router")
        .with_description("Four hosts share a router with a firewalled uplink."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = entries().iter().map(Entry::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), entries().len());
    }

    #[test]
    fn test_every_entry_builds() {
        let config = AppConfig::default();
        for entry in entries() {
            let diagram = entry
                .build(&config)
                .unwrap_or_else(|err| panic!("{} failed: {err}", entry.name()));
            assert!(!diagram.elements().is_empty(), "{}", entry.name());
            assert_eq!(diagram.title(), Some(entry.title()));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            find("does-not-exist"),
            Err(FiguraError::UnknownDiagram(name)) if name == "does-not-exist"
        ));
    }

    #[test]
    fn test_retransmission_extends_handshake() {
        let config = AppConfig::default();
        let handshake = find("tcp-handshake").unwrap().build(&config).unwrap();
        let retransmission = find("tcp-retransmission").unwrap().build(&config).unwrap();
        assert_eq!(
            retransmission.elements().len(),
            handshake.elements().len() + 1
        );
    }
}
