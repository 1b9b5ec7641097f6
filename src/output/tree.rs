//! Decoded message to generic JSON tree.
//!
//! Follows the protobuf JSON mapping with declared field names kept
//! verbatim (`start_time_millis`, not `startTimeMillis`).

use crate::utils::error::OutputError;
use prost_reflect::{DynamicMessage, SerializeOptions};
use serde_json::Value;

/// Convert a decoded record into a `serde_json::Value`
///
/// Fields at their default value are omitted, 64-bit integers become
/// strings, enums are written by name. Object keys come out sorted, so the
/// same record always yields the same tree.
pub fn to_tree(record: &DynamicMessage) -> Result<Value, OutputError> {
    let options = SerializeOptions::new().use_proto_field_name(true);

    record
        .serialize_with_options(serde_json::value::Serializer, &options)
        .map_err(OutputError::SerializationFailed)
}
