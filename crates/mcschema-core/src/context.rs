//! Per-run context stack
//!
//! A `Context` holds the ancestor values visible to a node while it is being
//! validated, normalized or defaulted. Composite nodes push one frame per
//! descent and pop it on return; the `with_*` helpers do both around a
//! closure so the stack depth after a call always equals the depth before.
//!
//! Copyright (c) 2025 mcschema Team
//! Licensed under the Apache-2.0 license

use crate::value::Value;
use std::fmt;

/// How a frame entered the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// An object field, map entry or the root value
    Field,
    /// A list element; keyed by the enclosing list's key, never the index
    Element,
    /// A switch selector value re-exposed to descendants
    Selector,
}

/// One (key, value) entry of the context stack
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub key: String,
    pub value: Value,
    pub kind: FrameKind,
}

/// One step of an error path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// One operation of a selector expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorOp {
    /// Move to the enclosing value
    Pop,
    /// Read a field of the current value
    Push(String),
}

/// Ordered `pop`/`push` operations locating a value relative to the top frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    ops: Vec<SelectorOp>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// `[{ push: key }]`: a field of the current object
    pub fn sibling(key: impl Into<String>) -> Self {
        Self::new().push(key)
    }

    /// `['pop', { push: key }]`: a field of the enclosing object
    pub fn parent(key: impl Into<String>) -> Self {
        Self::new().pop().push(key)
    }

    pub fn pop(mut self) -> Self {
        self.ops.push(SelectorOp::Pop);
        self
    }

    pub fn push(mut self, key: impl Into<String>) -> Self {
        self.ops.push(SelectorOp::Push(key.into()));
        self
    }

    pub fn ops(&self) -> &[SelectorOp] {
        &self.ops
    }

    /// Key of the last `push`, used to name the selector frame
    pub fn last_key(&self) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            SelectorOp::Push(key) => Some(key.as_str()),
            SelectorOp::Pop => None,
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .ops
            .iter()
            .map(|op| match op {
                SelectorOp::Pop => "pop".to_string(),
                SelectorOp::Push(key) => format!("push({})", key),
            })
            .collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Stack of ancestor frames plus the error path and reference bookkeeping
#[derive(Debug, Clone, Default)]
pub struct Context {
    frames: Vec<Frame>,
    path: Vec<PathSegment>,
    reference_depth: usize,
    defaults_in_progress: Vec<String>,
    reentered: bool,
}

impl Context {
    /// An empty context; used for default synthesis
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose single frame is the root value
    pub fn root(value: Value) -> Self {
        let mut context = Self::new();
        context.frames.push(Frame {
            key: String::new(),
            value,
            kind: FrameKind::Field,
        });
        context
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Value of the top frame
    pub fn current(&self) -> Option<&Value> {
        self.frames.last().map(|frame| &frame.value)
    }

    /// Replace the value being built in place (no push/pop)
    ///
    /// Selector frames above it are left alone.
    pub(crate) fn set_current(&mut self, value: Value) {
        if let Some(frame) = self
            .frames
            .iter_mut()
            .rev()
            .find(|frame| frame.kind != FrameKind::Selector)
        {
            frame.value = value;
        }
    }

    /// Descend into an object field or map entry
    pub fn with_field<R>(
        &mut self,
        key: &str,
        value: Value,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.scoped(
            Frame {
                key: key.to_string(),
                value,
                kind: FrameKind::Field,
            },
            Some(PathSegment::Key(key.to_string())),
            f,
        )
    }

    /// Descend into a list element
    pub fn with_element<R>(
        &mut self,
        index: usize,
        value: Value,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let key = self.top().map(|frame| frame.key.clone()).unwrap_or_default();
        self.scoped(
            Frame {
                key,
                value,
                kind: FrameKind::Element,
            },
            Some(PathSegment::Index(index)),
            f,
        )
    }

    /// Expose a switch selector value to descendants
    pub fn with_selector<R>(
        &mut self,
        key: &str,
        value: Value,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.scoped(
            Frame {
                key: key.to_string(),
                value,
                kind: FrameKind::Selector,
            },
            None,
            f,
        )
    }

    fn scoped<R>(
        &mut self,
        frame: Frame,
        segment: Option<PathSegment>,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let depth = self.frames.len();
        let has_segment = segment.is_some();
        self.frames.push(frame);
        if let Some(segment) = segment {
            self.path.push(segment);
        }
        let result = f(self);
        self.frames.truncate(depth);
        if has_segment {
            self.path.pop();
        }
        result
    }

    /// Evaluate a selector starting at the top frame
    ///
    /// `Pop` skips selector frames and frames holding lists, so list
    /// elements pop straight to the object that owns the list.
    pub fn resolve(&self, selector: &Selector) -> Option<&Value> {
        let mut cursor = self.frames.len().checked_sub(1)?;
        let mut current = Some(&self.frames[cursor].value);
        for op in selector.ops() {
            match op {
                SelectorOp::Pop => {
                    cursor = (0..cursor).rev().find(|&i| {
                        let frame = &self.frames[i];
                        frame.kind != FrameKind::Selector && !frame.value.is_array()
                    })?;
                    current = Some(&self.frames[cursor].value);
                }
                SelectorOp::Push(key) => {
                    current = current?.get(key.as_str());
                }
            }
        }
        current
    }

    /// Nearest frame with `key`, searching from the top
    pub fn find(&self, key: &str) -> Option<&Value> {
        self.frames
            .iter()
            .rev()
            .find(|frame| frame.key == key)
            .map(|frame| &frame.value)
    }

    /// Dotted path of the current position (`$` at the root)
    pub fn path(&self) -> String {
        render_path(&self.path)
    }

    /// Path of a child key below the current position
    pub fn path_to(&self, key: &str) -> String {
        let mut segments = self.path.clone();
        segments.push(PathSegment::Key(key.to_string()));
        render_path(&segments)
    }

    /// Track entry into a reference; false once `max_depth` is exceeded
    pub(crate) fn enter_reference(&mut self, max_depth: usize) -> bool {
        if self.reference_depth >= max_depth {
            return false;
        }
        self.reference_depth += 1;
        true
    }

    pub(crate) fn leave_reference(&mut self) {
        self.reference_depth = self.reference_depth.saturating_sub(1);
    }

    pub fn reference_depth(&self) -> usize {
        self.reference_depth
    }

    pub(crate) fn begin_default(&mut self, name: &str) {
        if self.defaults_in_progress.iter().any(|n| n == name) {
            self.reentered = true;
        }
        self.defaults_in_progress.push(name.to_string());
    }

    pub(crate) fn end_default(&mut self) {
        self.defaults_in_progress.pop();
    }

    /// Whether a named schema's default was requested while already being built
    pub fn reentered(&self) -> bool {
        self.reentered
    }
}

fn render_path(segments: &[PathSegment]) -> String {
    if segments.is_empty() {
        return "$".to_string();
    }
    let mut out = String::new();
    for segment in segments {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(index) => {
                out.push_str(&format!("[{}]", index));
            }
        }
    }
    out
}
