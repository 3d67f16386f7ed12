//! Error adapter for converting FiguraError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use figura::FiguraError;

/// Adapter giving a [`FiguraError`] a stable diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a FiguraError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            FiguraError::Io(_) => "figura::io",
            FiguraError::Geometry(_) => "figura::geometry",
            FiguraError::Config(_) => "figura::config",
            FiguraError::Scenario(_) => "figura::scenario",
            FiguraError::UnknownParticipant { .. } => "figura::unknown_participant",
            FiguraError::UnknownDiagram(_) => "figura::unknown_diagram",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: &str = match self.0 {
            FiguraError::UnknownDiagram(_) => "run `figura list` to see the built-in diagrams",
            FiguraError::UnknownParticipant { .. } => {
                "participants are numbered from 0 in the order they are listed"
            }
            FiguraError::Geometry(_) => "check the sizes, radii and sides of the shapes",
            FiguraError::Config(_) => "pass a valid file with --config or fix figura/config.toml",
            FiguraError::Io(_) | FiguraError::Scenario(_) => return None,
        };
        Some(Box::new(help))
    }
}

#[cfg(test)]
mod tests {
    use figura::geometry::{Bounds, Point};

    use super::*;

    fn code(err: &FiguraError) -> Option<String> {
        ErrorAdapter(err).code().map(|c| c.to_string())
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            code(&FiguraError::Config("bad".to_string())).as_deref(),
            Some("figura::config")
        );
        let inverted = Bounds::new(Point::new(10.0, 10.0), Point::new(0.0, 0.0)).unwrap_err();
        assert_eq!(
            code(&FiguraError::from(inverted)).as_deref(),
            Some("figura::geometry")
        );
        assert_eq!(
            code(&FiguraError::UnknownParticipant {
                index: 3,
                participants: 2
            })
            .as_deref(),
            Some("figura::unknown_participant")
        );
    }

    #[test]
    fn test_help() {
        let err = FiguraError::UnknownDiagram("nope".to_string());
        let adapter = ErrorAdapter(&err);
        assert!(adapter.help().unwrap().to_string().contains("figura list"));
        assert_eq!(adapter.to_string(), "Unknown diagram `nope`");

        let err = FiguraError::Scenario("broken".to_string());
        assert!(ErrorAdapter(&err).help().is_none());
    }

    #[test]
    fn test_report_renders() {
        let err = FiguraError::UnknownDiagram("nope".to_string());
        let mut out = String::new();
        miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor())
            .render_report(&mut out, &ErrorAdapter(&err))
            .unwrap();
        assert!(out.contains("figura::unknown_diagram"));
        assert!(out.contains("nope"));
    }
}
