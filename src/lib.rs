//! Fixed-capacity ring buffer with overwrite-on-full semantics.

pub mod ring_buffer;

pub use ring_buffer::{RingBuffer, RingBufferError};
