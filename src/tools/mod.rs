//! Tool adapters exposing the research engine to Rig agents.

mod researcher;

pub use researcher::{LocalResearcher, ResearchArgs, WebResearcher};
