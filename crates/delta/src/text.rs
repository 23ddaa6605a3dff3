//! The seam between the structural diff and byte-level text diffing.
//!
//! Producing good binary deltas is its own discipline and lives outside
//! this crate. The driver only needs a window source: it hands the
//! ancestor and target content streams to a [`TextDeltaFactory`] and
//! forwards whatever windows come back. [`FullTextFactory`] is the
//! fallback wired in by default; it detects the no-change case and
//! otherwise ships the target content wholesale.

use std::io::Read;

use crate::error::DeltaResult;

/// Default window payload size used by [`FullTextFactory`].
const DEFAULT_WINDOW_SIZE: usize = 16 * 1024;

/// One window of a text delta. The payload is opaque to the driver; only
/// its ordering matters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeltaWindow {
    /// Offset of this window's expansion in the target content.
    pub target_offset: u64,
    /// Window payload.
    pub data: Vec<u8>,
}

/// Pull-based source of delta windows for one file.
pub trait TextDeltaStream {
    /// Returns the next window, or `None` once the delta is complete.
    fn next_window(&mut self) -> DeltaResult<Option<DeltaWindow>>;
}

/// Builds a [`TextDeltaStream`] that transforms `base` into `target`.
pub trait TextDeltaFactory {
    /// Opens a window stream over the two content streams.
    fn stream(
        &mut self,
        base: Box<dyn Read>,
        target: Box<dyn Read>,
    ) -> DeltaResult<Box<dyn TextDeltaStream>>;
}

/// Fallback factory: no real diffing, the target content is sent as-is.
///
/// Identical streams produce an empty delta (no windows at all), which
/// lets the driver skip `apply_textdelta` for property-only changes.
#[derive(Clone, Debug)]
pub struct FullTextFactory {
    window_size: usize,
}

impl FullTextFactory {
    /// Creates a factory with a custom window payload size.
    #[must_use]
    pub fn with_window_size(window_size: usize) -> Self {
        debug_assert!(window_size > 0);
        FullTextFactory { window_size }
    }
}

impl Default for FullTextFactory {
    fn default() -> Self {
        FullTextFactory {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl TextDeltaFactory for FullTextFactory {
    fn stream(
        &mut self,
        mut base: Box<dyn Read>,
        mut target: Box<dyn Read>,
    ) -> DeltaResult<Box<dyn TextDeltaStream>> {
        let mut base_bytes = Vec::new();
        base.read_to_end(&mut base_bytes)?;
        let mut target_bytes = Vec::new();
        target.read_to_end(&mut target_bytes)?;

        let remaining = if base_bytes == target_bytes {
            Vec::new()
        } else {
            target_bytes
        };

        Ok(Box::new(FullTextStream {
            remaining,
            offset: 0,
            window_size: self.window_size,
        }))
    }
}

struct FullTextStream {
    remaining: Vec<u8>,
    offset: u64,
    window_size: usize,
}

impl TextDeltaStream for FullTextStream {
    fn next_window(&mut self) -> DeltaResult<Option<DeltaWindow>> {
        if self.remaining.is_empty() {
            return Ok(None);
        }
        let take = self.remaining.len().min(self.window_size);
        let rest = self.remaining.split_off(take);
        let data = std::mem::replace(&mut self.remaining, rest);
        let window = DeltaWindow {
            target_offset: self.offset,
            data,
        };
        self.offset += take as u64;
        Ok(Some(window))
    }
}
