#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use btree_core::{BbKey, Blackboard, BlackboardError, TaskId};

/// One structured record of something a task did during a tick.
///
/// `a` and `b` are tag-specific payloads (an index, a count, an outcome flag).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub task: TaskId,
    pub a: u64,
    pub b: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            task: TaskId::UNASSIGNED,
            a: 0,
            b: 0,
        }
    }

    pub fn with_task(mut self, task: TaskId) -> Self {
        self.task = task;
        self
    }

    pub fn with_a(mut self, a: u64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u64) -> Self {
        self.b = b;
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }

    pub fn tags(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.tag.as_ref()).collect()
    }
}

/// Blackboard key for collecting events in-memory.
pub const TRACE_LOG: BbKey<TraceLog> = BbKey::new(0xB7EE_7ACE_0000_0001);
/// Blackboard key for streaming events into a user-provided sink.
pub const TRACE_SINK: BbKey<Box<dyn TraceSink>> = BbKey::new(0xB7EE_7ACE_0000_0002);

/// Record `event` into whichever of [`TRACE_LOG`] / [`TRACE_SINK`] the blackboard holds.
pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) -> Result<(), BlackboardError> {
    tracing::trace!(
        tick = event.tick,
        tag = %event.tag,
        task = %event.task,
        a = event.a,
        b = event.b,
        "trace event"
    );

    if let Some(log) = blackboard.get_mut(TRACE_LOG)? {
        log.push(event.clone());
    }
    if let Some(sink) = blackboard.get_mut(TRACE_SINK)? {
        sink.emit(event);
    }
    Ok(())
}
