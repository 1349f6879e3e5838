pub mod error;
pub mod format;
mod report;
mod run;

pub use error::PipelineError;
pub use format::{format_header, format_payload, PLACEHOLDER};
pub use report::Reporter;
pub use run::{run, RunStats};
