//! The external research engine seam.
//!
//! All research logic (web crawling, document parsing, report synthesis)
//! lives in the GPT Researcher backend. This module defines the request
//! types the tool adapters hand it and the [`ResearchEngine`] trait the
//! adapters call through; [`GptrClient`] is the HTTP implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

mod gptr;

pub use gptr::GptrClient;

/// Report template selector, consumed only by the engine.
///
/// Serializes to the wire strings the backend expects
/// (`research_report`, `subtopic_report`, ...).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportType {
    /// Full research report
    #[default]
    #[serde(rename = "research_report")]
    Research,
    /// Report on a subtopic of a broader subject
    #[serde(rename = "subtopic_report")]
    Subtopic,
    /// Report following a caller-supplied template
    #[serde(rename = "custom_report")]
    Custom,
    /// Outline of a would-be report
    #[serde(rename = "outline_report")]
    Outline,
    /// Annotated list of sources
    #[serde(rename = "resource_report")]
    Resource,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Research => "research_report",
            ReportType::Subtopic => "subtopic_report",
            ReportType::Custom => "custom_report",
            ReportType::Outline => "outline_report",
            ReportType::Resource => "resource_report",
        }
    }
}

/// Where the engine gathers its material from.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportSource {
    /// Documents under the backend's configured document directory
    Local,
    /// The open web
    #[default]
    Web,
}

impl ReportSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportSource::Local => "local",
            ReportSource::Web => "web",
        }
    }
}

/// The immutable triple handed to the engine for one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRequest {
    pub query: String,
    pub report_type: ReportType,
    pub report_source: ReportSource,
}

/// Opaque artifact linking the engine's research step to its report step.
///
/// The adapters move it from [`ResearchEngine::conduct_research`] to
/// [`ResearchEngine::write_report`] without inspecting it, so each
/// invocation stays self-contained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchContext(serde_json::Value);

impl ResearchContext {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

/// The external research engine, treated as an opaque collaborator.
///
/// One invocation is always the two operations in order: research, then
/// report. Implementations own their transport concerns (timeouts, retry);
/// callers get either the report text or an [`EngineError`].
#[async_trait]
pub trait ResearchEngine: Send + Sync {
    /// Gather source material for the request.
    async fn conduct_research(
        &self,
        request: &ReportRequest,
    ) -> Result<ResearchContext, EngineError>;

    /// Synthesize the gathered material into a report.
    async fn write_report(
        &self,
        request: &ReportRequest,
        context: ResearchContext,
    ) -> Result<String, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_type_wire_strings() {
        assert_eq!(ReportType::Research.as_str(), "research_report");
        assert_eq!(ReportType::Subtopic.as_str(), "subtopic_report");
        assert_eq!(ReportType::Custom.as_str(), "custom_report");
        assert_eq!(ReportType::Outline.as_str(), "outline_report");
        assert_eq!(ReportType::Resource.as_str(), "resource_report");
    }

    #[test]
    fn test_report_type_serialization() {
        let json = serde_json::to_string(&ReportType::Outline).unwrap();
        assert_eq!(json, r#""outline_report""#);

        let parsed: ReportType = serde_json::from_str(r#""research_report""#).unwrap();
        assert_eq!(parsed, ReportType::Research);
    }

    #[test]
    fn test_report_type_rejects_unknown_variant() {
        let result: Result<ReportType, _> = serde_json::from_str(r#""fancy_report""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_report_source_serialization() {
        assert_eq!(ReportSource::Local.as_str(), "local");
        assert_eq!(ReportSource::Web.as_str(), "web");

        let json = serde_json::to_string(&ReportSource::Local).unwrap();
        assert_eq!(json, r#""local""#);

        let parsed: ReportSource = serde_json::from_str(r#""web""#).unwrap();
        assert_eq!(parsed, ReportSource::Web);
    }

    #[test]
    fn test_report_source_rejects_unknown_variant() {
        let result: Result<ReportSource, _> = serde_json::from_str(r#""cloud""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ReportType::default(), ReportType::Research);
        assert_eq!(ReportSource::default(), ReportSource::Web);
    }

    #[test]
    fn test_research_context_roundtrip() {
        let context = ResearchContext::new(serde_json::json!({"sources": ["a", "b"]}));
        let value = context.clone().into_inner();
        assert_eq!(value["sources"][0], "a");

        let json = serde_json::to_string(&context).unwrap();
        let back: ResearchContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back.into_inner(), value);
    }
}
