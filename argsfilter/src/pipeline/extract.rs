//! Payload extraction.
//!
//! Picks the value that will be rendered or filtered, using the shape already
//! detected for the job.

use super::shape::Shape;
use crate::value::Value;

/// Extracts the payload of `arguments` according to `shape`.
///
/// - Delegated dispatch: the value under `args`. A one-element sequence holding
///   a mapping is unwrapped to that mapping (named-parameter call convention).
/// - Direct arguments: a sole mapping element is the payload; any other list
///   is returned whole.
#[must_use]
pub fn extract_payload(arguments: &[Value], shape: &Shape<'_>) -> Value {
    match shape {
        Shape::DelegatedDispatch { .. } => match shape.dispatch_args() {
            Some(Value::Sequence(items)) => match items.as_slice() {
                [only @ Value::Mapping(_)] => only.clone(),
                _ => Value::Sequence(items.clone()),
            },
            Some(other) => other.clone(),
            None => Value::null(),
        },
        Shape::DirectArguments => match arguments {
            [only @ Value::Mapping(_)] => only.clone(),
            _ => Value::Sequence(arguments.to_vec()),
        },
    }
}
