//! Id generation for components and wires.

use crate::circuit::{ComponentId, WireId};
use crate::components::ComponentKind;

/// Millisecond clock used to seed ids.
pub type Clock = fn() -> u64;

/// Wall-clock milliseconds since the Unix epoch.
#[cfg(not(all(feature = "wasm", target_arch = "wasm32")))]
pub fn system_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Wall-clock milliseconds since the Unix epoch.
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub fn system_clock() -> u64 {
    js_sys::Date::now() as u64
}

/// Hands out `<prefix>-<stamp>` ids.
///
/// Stamps are wall-clock milliseconds, bumped so that every stamp is strictly
/// greater than the previous one. Two additions within the same millisecond
/// therefore still get distinct ids.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    clock: Clock,
    last: Option<u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_clock(system_clock)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self { clock, last: None }
    }

    fn next_stamp(&mut self) -> u64 {
        let now = (self.clock)();
        let stamp = match self.last {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last = Some(stamp);
        stamp
    }

    pub fn component(&mut self, kind: ComponentKind) -> ComponentId {
        ComponentId(format!("{}-{}", kind.slug(), self.next_stamp()))
    }

    pub fn wire(&mut self) -> WireId {
        WireId(format!("wire-{}", self.next_stamp()))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
