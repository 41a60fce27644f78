//! rig-gptr: GPT Researcher tools for the Rig agent framework
//!
//! Exposes the GPT Researcher backend as two Rig tools:
//! - `WebResearcher`: research a topic using the internet
//! - `LocalResearcher`: research a topic using a local document directory
//!
//! The tools are thin adapters. All research logic (crawling, document
//! parsing, report synthesis) lives in the backend service; the adapters
//! marshal a query plus two configuration fields into a request, await the
//! backend's two-step sequence (conduct research, then write report), and
//! return the report text unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rig_gptr::{GptrClient, ReportType, WebResearcher};
//!
//! let engine = Arc::new(GptrClient::from_env());
//! let tool = WebResearcher::with_report_type(engine, ReportType::Research);
//!
//! // Register with a Rig agent:
//! // client.agent("llama3.2").tool(tool).build()
//! ```

pub mod agent;
pub mod config;
pub mod engine;
pub mod error;
pub mod tools;

// Re-exports for convenience
pub use agent::ResearchAgent;
pub use config::Config;
pub use engine::{
    GptrClient, ReportRequest, ReportSource, ReportType, ResearchContext, ResearchEngine,
};
pub use error::{EngineError, ToolError};
pub use tools::{LocalResearcher, ResearchArgs, WebResearcher};
