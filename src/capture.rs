//! Raw stack capture and lazy symbol resolution.
//!
//! Capture records instruction addresses only; turning an address into a
//! [`Frame`] goes through the host runtime's symbol tables and is deferred
//! until someone actually looks at the trace.

use std::ffi::c_void;

/// Default bound on captured stack depth.
pub const DEFAULT_MAX_FRAMES: usize = 50;

/// Extra raw addresses recorded per capture to cover the capture machinery's
/// own frames, which are trimmed at resolution time. Keeps the whole
/// `max_frames` budget available for caller frames.
pub(crate) const MACHINERY_ALLOWANCE: usize = 16;

/// Leading frames whose symbols match this prefix belong to the capture
/// machinery itself and are trimmed at resolution time.
const CRATE_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

// ============================================================================
// StampConfig
// ============================================================================

/// Capture-time configuration, passed explicitly to [`stamp_with`].
///
/// There is no process-wide mutable depth setting; callers that want a
/// non-default bound hold their own config (typically built once at startup)
/// and pass it at each capture site.
///
/// `max_frames` bounds the frames *reported* for a capture. The raw snapshot
/// records a small fixed allowance on top of it so the capture machinery's
/// own frames, trimmed during resolution, do not eat into the budget — even
/// a small bound is spent on caller frames.
///
/// [`stamp_with`]: crate::stamp_with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampConfig {
    /// Maximum number of resolved frames reported per capture.
    pub max_frames: usize,
}

impl Default for StampConfig {
    #[inline]
    fn default() -> Self {
        Self {
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

// ============================================================================
// Frame
// ============================================================================

/// One resolved call site: function name, file path, and line number.
///
/// Immutable once produced. Fields are best-effort: a frame the runtime
/// cannot symbolicate (stripped symbols, foreign code) has empty `name` and
/// `file` and a `line` of zero rather than being dropped from the trace.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Frame {
    /// Demangled function name, or empty if unresolvable.
    pub name: String,
    /// Source file path, or empty if unresolvable.
    pub file: String,
    /// 1-based line number, or zero if unresolvable.
    pub line: u32,
}

// ============================================================================
// Capture and resolution
// ============================================================================

/// Walk the current stack and record instruction addresses, innermost first,
/// up to `max_frames` plus the machinery allowance. No symbolication happens
/// here.
pub(crate) fn capture(config: &StampConfig) -> Vec<usize> {
    if config.max_frames == 0 {
        return Vec::new();
    }
    let budget = config.max_frames.saturating_add(MACHINERY_ALLOWANCE);
    let mut raw = Vec::with_capacity(budget.min(DEFAULT_MAX_FRAMES + MACHINERY_ALLOWANCE));
    backtrace::trace(|frame| {
        raw.push(frame.ip() as usize);
        raw.len() < budget
    });
    raw
}

/// Resolve raw addresses into [`Frame`]s through the runtime symbol table,
/// trim the leading capture-machinery frames, and cap the result at
/// `max_frames`.
///
/// Each address may expand to more than one frame when calls were inlined.
/// Addresses the runtime cannot resolve still produce an (empty) entry, so
/// the output always covers the whole captured stack.
pub(crate) fn resolve(raw: &[usize], max_frames: usize) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(raw.len());
    for &addr in raw {
        let before = frames.len();
        // All but the innermost address is a return address pointing just
        // past the call; step back one byte so resolution lands on the call
        // site's own line.
        let ip = addr.saturating_sub(1) as *mut c_void;
        backtrace::resolve(ip, |symbol| {
            frames.push(Frame {
                name: symbol
                    .name()
                    .map(|name| format!("{name:#}"))
                    .unwrap_or_default(),
                file: symbol
                    .filename()
                    .map(|path| path.display().to_string())
                    .unwrap_or_default(),
                line: symbol.lineno().unwrap_or(0),
            });
        });
        if frames.len() == before {
            frames.push(Frame {
                name: String::new(),
                file: String::new(),
                line: 0,
            });
        }
    }
    let mut frames = trim_machinery(frames);
    frames.truncate(max_frames);
    frames
}

/// Drop the leading frames that sit inside the capture path itself (the
/// `backtrace` crate and this crate's stamping functions), so the first
/// reported frame is the caller of `stamp`.
///
/// Unresolvable (empty-named) frames inside the machinery prefix are dropped
/// with it: trimming runs through the last recognizable machinery frame in
/// the leading region. Empty-named frames after that point are kept — they
/// may be unresolvable caller frames.
pub(crate) fn trim_machinery(mut frames: Vec<Frame>) -> Vec<Frame> {
    let mut skip = 0;
    for (idx, frame) in frames.iter().enumerate() {
        if is_machinery(&frame.name) {
            skip = idx + 1;
        } else if !frame.name.is_empty() {
            break;
        }
    }
    frames.drain(..skip);
    frames
}

fn is_machinery(name: &str) -> bool {
    name.starts_with("backtrace::") || name.starts_with(CRATE_PREFIX)
}
