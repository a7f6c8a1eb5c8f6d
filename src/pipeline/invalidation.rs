//! What changed since the previous frame.

bitflags::bitflags! {
    /// Inputs that were invalidated before a frame was produced.
    ///
    /// Combine with bitwise OR: `Invalidation::CONFIG | Invalidation::METRICS`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Invalidation: u8 {
        /// A new configuration snapshot was swapped in.
        const CONFIG = 1 << 0;
        /// Title metrics were recomputed.
        const METRICS = 1 << 1;
        /// The header instance was re-created for a new direction.
        const DIRECTION = 1 << 2;
        /// Collapse progress moved.
        const PROGRESS = 1 << 3;
    }
}

impl Invalidation {
    /// Whether the frame's geometry (not just opacity/position) may differ.
    pub fn affects_geometry(self) -> bool {
        self.intersects(Self::METRICS | Self::DIRECTION)
    }
}
