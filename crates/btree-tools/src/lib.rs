//! Tooling primitives for behavior tree execution.
//!
//! Trace events are plain data recorded during a tick and rendered later by tooling.
//! Every emitted event is also forwarded to `tracing` at `TRACE` level.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{
    emit, NullTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink, TRACE_LOG, TRACE_SINK,
};
