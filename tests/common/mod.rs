//! Shared fixtures: a descriptor set mirroring `proto/flare_report.proto`
//! (subset, same field numbers) and a sample report.

#![allow(dead_code)]

use prost::Message;
use prost_reflect::{DescriptorPool, DynamicMessage, MapKey, Value};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, FileDescriptorSet, MessageOptions,
};
use serde_json::json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const PACKAGE: &str = "flare.report";

fn scalar(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(ty as i32),
        ..Default::default()
    }
}

fn typed(name: &str, number: i32, ty: Type, type_name: &str, label: Label) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(label as i32),
        r#type: Some(ty as i32),
        type_name: Some(format!(".{}.{}", PACKAGE, type_name)),
        ..Default::default()
    }
}

fn message(name: &str, field: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field,
        ..Default::default()
    }
}

fn report_file() -> FileDescriptorProto {
    let hotspots_entry = DescriptorProto {
        name: Some("MethodHotspotsEntry".to_string()),
        field: vec![scalar("key", 1, Type::String), scalar("value", 2, Type::Int64)],
        options: Some(MessageOptions {
            map_entry: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    };

    let mut cpu_profile = message(
        "CpuProfileData",
        vec![
            scalar("sampling_interval_ms", 3, Type::Int32),
            typed("samples", 4, Type::Message, "StackSample", Label::Repeated),
            typed(
                "method_hotspots",
                5,
                Type::Message,
                "CpuProfileData.MethodHotspotsEntry",
                Label::Repeated,
            ),
        ],
    );
    cpu_profile.nested_type.push(hotspots_entry);

    let thread_state = EnumDescriptorProto {
        name: Some("ThreadState".to_string()),
        value: [
            ("THREAD_STATE_UNSPECIFIED", 0),
            ("THREAD_STATE_RUNNABLE", 2),
            ("THREAD_STATE_WAITING", 4),
        ]
        .iter()
        .map(|(name, number)| EnumValueDescriptorProto {
            name: Some(name.to_string()),
            number: Some(*number),
            ..Default::default()
        })
        .collect(),
        ..Default::default()
    };

    FileDescriptorProto {
        name: Some("flare_report.proto".to_string()),
        package: Some(PACKAGE.to_string()),
        syntax: Some("proto3".to_string()),
        message_type: vec![
            message(
                "ProfilerData",
                vec![
                    scalar("start_time_millis", 1, Type::Int64),
                    scalar("end_time_millis", 2, Type::Int64),
                    scalar("duration_millis", 3, Type::Int64),
                    scalar("sampling_interval_millis", 4, Type::Int64),
                    typed("metadata", 5, Type::Message, "ProfilerMetadata", Label::Optional),
                    typed("snapshots", 8, Type::Message, "PerformanceSnapshot", Label::Repeated),
                    typed("cpu_profile", 9, Type::Message, "CpuProfileData", Label::Optional),
                ],
            ),
            message(
                "ProfilerMetadata",
                vec![
                    scalar("profile_version", 1, Type::Int32),
                    scalar("plugin_version", 2, Type::String),
                ],
            ),
            message(
                "PerformanceSnapshot",
                vec![
                    scalar("timestamp_millis", 1, Type::Int64),
                    typed("heap", 2, Type::Message, "HeapMetrics", Label::Optional),
                    typed("threads", 4, Type::Message, "ThreadMetrics", Label::Optional),
                ],
            ),
            message(
                "HeapMetrics",
                vec![
                    scalar("used", 1, Type::Int64),
                    scalar("max", 2, Type::Int64),
                    scalar("usage_ratio", 5, Type::Double),
                ],
            ),
            message(
                "ThreadMetrics",
                vec![
                    scalar("total_threads", 1, Type::Int32),
                    typed("threads_by_state", 5, Type::Message, "ThreadStateCount", Label::Repeated),
                ],
            ),
            message(
                "ThreadStateCount",
                vec![
                    typed("state", 1, Type::Enum, "ThreadState", Label::Optional),
                    scalar("count", 2, Type::Int32),
                ],
            ),
            cpu_profile,
            message(
                "StackSample",
                vec![
                    scalar("thread_name", 2, Type::String),
                    typed("stack_trace", 4, Type::Message, "StackFrame", Label::Repeated),
                ],
            ),
            message(
                "StackFrame",
                vec![
                    scalar("class_name", 1, Type::String),
                    scalar("method_name", 2, Type::String),
                    scalar("line_number", 4, Type::Int32),
                ],
            ),
        ],
        enum_type: vec![thread_state],
        ..Default::default()
    }
}

/// Serialized `FileDescriptorSet` for the report schema
pub fn descriptor_set_bytes() -> Vec<u8> {
    FileDescriptorSet {
        file: vec![report_file()],
    }
    .encode_to_vec()
}

pub fn report_pool() -> DescriptorPool {
    DescriptorPool::decode(descriptor_set_bytes().as_slice()).unwrap()
}

/// Write `<module>.binpb` into `dir`
pub fn write_descriptor_set(dir: &Path, module: &str) -> PathBuf {
    let path = dir.join(format!("{}.binpb", module));
    std::fs::write(&path, descriptor_set_bytes()).unwrap();
    path
}

fn new_message(pool: &DescriptorPool, name: &str) -> DynamicMessage {
    let descriptor = pool
        .get_message_by_name(&format!("{}.{}", PACKAGE, name))
        .unwrap();
    DynamicMessage::new(descriptor)
}

fn state_count(pool: &DescriptorPool, state: i32, count: i32) -> Value {
    let mut entry = new_message(pool, "ThreadStateCount");
    entry.set_field_by_name("state", Value::EnumNumber(state));
    entry.set_field_by_name("count", Value::I32(count));
    Value::Message(entry)
}

/// A small but fully nested `ProfilerData`
pub fn sample_record(pool: &DescriptorPool) -> DynamicMessage {
    let mut metadata = new_message(pool, "ProfilerMetadata");
    metadata.set_field_by_name("profile_version", Value::I32(3));
    metadata.set_field_by_name("plugin_version", Value::String("1.0.2".to_string()));

    let mut heap = new_message(pool, "HeapMetrics");
    heap.set_field_by_name("used", Value::I64(536_870_912));
    heap.set_field_by_name("max", Value::I64(2_147_483_648));
    heap.set_field_by_name("usage_ratio", Value::F64(0.25));

    let mut threads = new_message(pool, "ThreadMetrics");
    threads.set_field_by_name("total_threads", Value::I32(42));
    threads.set_field_by_name(
        "threads_by_state",
        Value::List(vec![state_count(pool, 2, 12), state_count(pool, 4, 30)]),
    );

    let mut snapshot = new_message(pool, "PerformanceSnapshot");
    snapshot.set_field_by_name("timestamp_millis", Value::I64(1_767_225_601_000));
    snapshot.set_field_by_name("heap", Value::Message(heap));
    snapshot.set_field_by_name("threads", Value::Message(threads));

    let mut frame = new_message(pool, "StackFrame");
    frame.set_field_by_name(
        "class_name",
        Value::String("com.hypixel.hytale.server.core.universe.world.World".to_string()),
    );
    frame.set_field_by_name("method_name", Value::String("tick".to_string()));
    frame.set_field_by_name("line_number", Value::I32(512));

    let mut sample = new_message(pool, "StackSample");
    sample.set_field_by_name("thread_name", Value::String("WorldThread - default".to_string()));
    sample.set_field_by_name("stack_trace", Value::List(vec![Value::Message(frame)]));

    let mut hotspots = HashMap::new();
    hotspots.insert(MapKey::String("World.tick".to_string()), Value::I64(120));
    hotspots.insert(MapKey::String("ChunkStore.load".to_string()), Value::I64(30));

    let mut cpu_profile = new_message(pool, "CpuProfileData");
    cpu_profile.set_field_by_name("sampling_interval_ms", Value::I32(10));
    cpu_profile.set_field_by_name("samples", Value::List(vec![Value::Message(sample)]));
    cpu_profile.set_field_by_name("method_hotspots", Value::Map(hotspots));

    let mut record = new_message(pool, "ProfilerData");
    record.set_field_by_name("start_time_millis", Value::I64(1_767_225_600_000));
    record.set_field_by_name("end_time_millis", Value::I64(1_767_225_660_000));
    record.set_field_by_name("duration_millis", Value::I64(60_000));
    record.set_field_by_name("sampling_interval_millis", Value::I64(1_000));
    record.set_field_by_name("metadata", Value::Message(metadata));
    record.set_field_by_name("snapshots", Value::List(vec![Value::Message(snapshot)]));
    record.set_field_by_name("cpu_profile", Value::Message(cpu_profile));
    record
}

/// JSON the sample record must convert to
pub fn expected_json() -> serde_json::Value {
    json!({
        "start_time_millis": "1767225600000",
        "end_time_millis": "1767225660000",
        "duration_millis": "60000",
        "sampling_interval_millis": "1000",
        "metadata": {
            "profile_version": 3,
            "plugin_version": "1.0.2"
        },
        "snapshots": [
            {
                "timestamp_millis": "1767225601000",
                "heap": {
                    "used": "536870912",
                    "max": "2147483648",
                    "usage_ratio": 0.25
                },
                "threads": {
                    "total_threads": 42,
                    "threads_by_state": [
                        { "state": "THREAD_STATE_RUNNABLE", "count": 12 },
                        { "state": "THREAD_STATE_WAITING", "count": 30 }
                    ]
                }
            }
        ],
        "cpu_profile": {
            "sampling_interval_ms": 10,
            "samples": [
                {
                    "thread_name": "WorldThread - default",
                    "stack_trace": [
                        {
                            "class_name": "com.hypixel.hytale.server.core.universe.world.World",
                            "method_name": "tick",
                            "line_number": 512
                        }
                    ]
                }
            ],
            "method_hotspots": {
                "World.tick": "120",
                "ChunkStore.load": "30"
            }
        }
    })
}

pub fn compress(bytes: &[u8]) -> Vec<u8> {
    zstd::stream::encode_all(bytes, 3).unwrap()
}

/// Encode, compress and write a `.flarereport`
pub fn write_report(path: &Path, record: &DynamicMessage) {
    std::fs::write(path, compress(&record.encode_to_vec())).unwrap();
}

/// Write the sample report to `dir/profile.flarereport`
pub fn write_sample_report(dir: &Path) -> PathBuf {
    let path = dir.join("profile.flarereport");
    write_report(&path, &sample_record(&report_pool()));
    path
}

/// Shell script standing in for `protoc`
///
/// With `descriptor` set it copies that file to the requested
/// `--descriptor_set_out` path; otherwise it fails like a syntax error.
#[cfg(unix)]
pub fn fake_protoc(dir: &Path, descriptor: Option<&Path>) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let body = match descriptor {
        Some(source) => format!(
            "for arg in \"$@\"; do\n  case \"$arg\" in\n    --descriptor_set_out=*) out=\"${{arg#--descriptor_set_out=}}\" ;;\n  esac\ndone\ncp \"{}\" \"$out\"\n",
            source.display()
        ),
        None => "echo 'flare_report.proto:1:1: Expected top-level statement' >&2\nexit 1\n"
            .to_string(),
    };

    let path = dir.join("protoc");
    std::fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
