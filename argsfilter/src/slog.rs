//! Adapters for emitting argument fragments through `slog`.
//!
//! Only the pipeline's output implements `slog::Value`; raw argument values do
//! not, so a log statement cannot bypass the configured strategy.
//!
//! ```ignore
//! let fragment = filter.filter(job.type_name(), job.arguments())?;
//! info!(logger, "performed"; "job" => job.type_name(), "args" => &fragment);
//! ```

use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::pipeline::ArgsFragment;

impl SlogValue for ArgsFragment {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        match self {
            ArgsFragment::Empty => serializer.emit_none(key),
            _ => serializer.emit_str(key, self.to_string().trim_start()),
        }
    }
}
