//! Text handling: font metrics, escape decoding and word-wrapped runs.

pub mod escape;
pub mod metrics;
pub mod run;

pub use escape::unescape;
pub use metrics::FontMetrics;
pub use run::{TextLine, TextRun};
