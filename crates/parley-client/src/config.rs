//! Transport configuration.

use parley_proto::Frame;

/// Transport adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Frames that may wait for the socket before new ones are dropped.
    pub outbound_capacity: usize,
    /// Largest outbound frame, in bytes, the adapter will write.
    pub max_frame_size: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { outbound_capacity: 256, max_frame_size: Frame::MAX_SIZE }
    }
}
