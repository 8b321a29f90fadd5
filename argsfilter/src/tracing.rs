//! Helpers for emitting argument fragments through `tracing`.
//!
//! ```ignore
//! use argsfilter::tracing::TracingArgsExt;
//!
//! let fragment = filter.filter(job.type_name(), job.arguments())?;
//! tracing::info!(job = job.type_name(), args = %fragment.tracing_args(), "performed");
//! ```

use ::tracing::field::{DisplayValue, display};

use crate::pipeline::ArgsFragment;

/// Extension trait for logging a fragment as a `tracing` field.
pub trait TracingArgsExt {
    /// Wraps the fragment text, without its leading separator, as a display
    /// value. Hidden and filtered fragments keep their markers.
    fn tracing_args(&self) -> DisplayValue<String>;
}

impl TracingArgsExt for ArgsFragment {
    fn tracing_args(&self) -> DisplayValue<String> {
        display(self.to_string().trim_start().to_string())
    }
}
