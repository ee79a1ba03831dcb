use std::{fmt::Debug, ptr::NonNull};

use crate::speaker::SpeakerPosition;

/// One named lane of an audio port.
///
/// A channel never owns sample memory. The adapter binds a host buffer
/// pointer into it every block, and the slice views are only valid while
/// that binding is. [crate::port::AudioPort] is the safe surface over this;
/// it knows the sample count the views should carry.
pub struct Channel {
    name: String,
    position: SpeakerPosition,
    buffer: Option<NonNull<f32>>,
}

// A bound pointer is only dereferenced on the audio thread inside the
// process call it was bound for. Adapters rebind every block.
unsafe impl Send for Channel {}

impl Channel {
    pub fn new(name: String, position: SpeakerPosition) -> Self {
        Self {
            name,
            position,
            buffer: None,
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn position(&self) -> SpeakerPosition {
        self.position
    }

    #[inline(always)]
    pub fn is_bound(&self) -> bool {
        self.buffer.is_some()
    }

    /// # Safety
    ///
    /// `buffer` must point to at least the enclosing port's current sample
    /// count of `f32`s, must stay valid until the end of the process call
    /// it is bound for, and must not overlap any other buffer bound into
    /// the same component.
    #[inline(always)]
    pub unsafe fn bind(&mut self, buffer: NonNull<f32>) {
        self.buffer = Some(buffer);
    }

    #[inline(always)]
    pub fn unbind(&mut self) {
        self.buffer = None;
    }

    #[inline(always)]
    pub(crate) fn as_slice(&self, len: usize) -> Option<&[f32]> {
        self.buffer
            .map(|buffer| unsafe { std::slice::from_raw_parts(buffer.as_ptr(), len) })
    }

    #[inline(always)]
    pub(crate) fn as_mut_slice(&mut self, len: usize) -> Option<&mut [f32]> {
        self.buffer
            .map(|buffer| unsafe { std::slice::from_raw_parts_mut(buffer.as_ptr(), len) })
    }
}

impl Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("bound", &self.is_bound())
            .finish()
    }
}
