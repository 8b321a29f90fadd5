//! Adapter between a host task framework's log subscriber and [`ArgsFilter`].
//!
//! The host implements [`Job`] for its job objects (or builds a
//! [`JobDescriptor`]) and calls [`LogHook::args_info`] wherever it used to
//! format arguments. The hook never fails: settings errors are reported through
//! `tracing` and produce an empty fragment so the job itself is unaffected.

use crate::{pipeline::ArgsFilter, value::Value};

/// What the pipeline needs to know about a job.
pub trait Job {
    /// The job's declared type name, used to look up per-type overrides.
    fn type_name(&self) -> &str;

    /// The job's arguments, in call order.
    fn arguments(&self) -> &[Value];
}

/// Owned job description, for hosts without a job type of their own.
#[derive(Clone, Debug, PartialEq)]
pub struct JobDescriptor {
    type_name: String,
    arguments: Vec<Value>,
}

impl JobDescriptor {
    #[must_use]
    pub fn new(type_name: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            type_name: type_name.into(),
            arguments,
        }
    }
}

impl Job for JobDescriptor {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn arguments(&self) -> &[Value] {
        &self.arguments
    }
}

/// The host's argument-formatting hook.
pub trait LogHook {
    /// Text appended to the job's log line. Empty means omit.
    fn args_info(&self, job: &dyn Job) -> String;
}

/// [`LogHook`] backed by an [`ArgsFilter`].
#[derive(Clone, Debug, Default)]
pub struct ArgsLogHook {
    filter: ArgsFilter,
}

impl ArgsLogHook {
    #[must_use]
    pub fn new(filter: ArgsFilter) -> Self {
        Self { filter }
    }

    #[must_use]
    pub fn filter(&self) -> &ArgsFilter {
        &self.filter
    }
}

impl LogHook for ArgsLogHook {
    fn args_info(&self, job: &dyn Job) -> String {
        match self.filter.filter(job.type_name(), job.arguments()) {
            Ok(fragment) => fragment.to_string(),
            Err(err) => {
                tracing::error!(job = job.type_name(), error = %err, "cannot resolve argument logging settings");
                String::new()
            }
        }
    }
}

impl From<ArgsFilter> for ArgsLogHook {
    fn from(filter: ArgsFilter) -> Self {
        Self::new(filter)
    }
}
