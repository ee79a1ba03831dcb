use std::{fmt::Debug, ptr::NonNull};

use rtrb::{Consumer, Producer, RingBuffer};

use crate::{channel::Channel, midi::MidiData, speaker::SpeakerConfiguration};

/// Messages a midi port queue holds before feeds start bouncing.
pub const DEFAULT_MIDI_CAPACITY: usize = 1024;

/// Errors an adapter can actually hit on the port surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PortError {
    IndexOutOfRange,
    QueueFull,
    EmptyQueue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortDirection {
    Input,
    Output,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortKind {
    Audio,
    Midi,
}

/// A block of speaker-typed channels moving one direction through a
/// plugin.
///
/// Channel names follow the configuration: port name plus the position
/// suffix when there is one ("OutFL"), the bare port name for single
/// channel configurations, and port name plus channel index when several
/// channels would otherwise share an empty suffix.
#[derive(Debug)]
pub struct AudioPort {
    name: String,
    direction: PortDirection,
    configuration: SpeakerConfiguration,
    channels: Vec<Channel>,
    sample_count: usize,
}

impl AudioPort {
    pub fn new(
        name: &str,
        direction: PortDirection,
        configuration: SpeakerConfiguration,
    ) -> Self {
        Self {
            name: name.to_owned(),
            direction,
            configuration,
            channels: build_channels(name, configuration),
            sample_count: 0,
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    #[inline(always)]
    pub fn configuration(&self) -> SpeakerConfiguration {
        self.configuration
    }

    #[inline(always)]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channel(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Swap in a new configuration, rebuilding every channel.
    ///
    /// Setup path only: allocates, and any current bindings are dropped
    /// with the old channels.
    pub fn reconfigure(&mut self, configuration: SpeakerConfiguration) {
        self.configuration = configuration;
        self.channels = build_channels(&self.name, configuration);
    }

    /// Frame count for the current block, shared by every channel of the
    /// port.
    #[inline(always)]
    pub fn set_sample_count(&mut self, sample_count: usize) {
        self.sample_count = sample_count;
    }

    #[inline(always)]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Bind a host buffer to one channel for the current block.
    ///
    /// # Safety
    ///
    /// `buffer` must point to at least `sample_count()` `f32`s, stay valid
    /// until the end of the process call it is bound for, and not overlap
    /// any other buffer bound into the same component.
    pub unsafe fn feed(&mut self, channel: usize, buffer: NonNull<f32>) -> Result<(), PortError> {
        let channel = self
            .channels
            .get_mut(channel)
            .ok_or(PortError::IndexOutOfRange)?;

        unsafe { channel.bind(buffer) };

        Ok(())
    }

    /// Read view of one channel's bound buffer for the current block.
    #[inline(always)]
    pub fn samples(&self, channel: usize) -> Option<&[f32]> {
        self.channels.get(channel)?.as_slice(self.sample_count)
    }

    #[inline(always)]
    pub fn samples_mut(&mut self, channel: usize) -> Option<&mut [f32]> {
        let sample_count = self.sample_count;
        self.channels.get_mut(channel)?.as_mut_slice(sample_count)
    }

    /// End-of-block hygiene: no binding survives past the process call it
    /// was made for.
    pub fn unbind_all(&mut self) {
        for channel in &mut self.channels {
            channel.unbind();
        }
    }
}

fn build_channels(port_name: &str, configuration: SpeakerConfiguration) -> Vec<Channel> {
    let count = configuration.channel_count();

    configuration
        .positions()
        .enumerate()
        .map(|(n, position)| {
            let suffix = configuration.suffix_at_index(n);

            let name = if !suffix.is_empty() {
                format!("{port_name}{suffix}")
            } else if count == 1 {
                port_name.to_owned()
            } else {
                format!("{port_name}{n}")
            };

            Channel::new(name, position)
        })
        .collect()
}

/// A direction-tagged queue of short midi messages.
///
/// The store is allocated up front and never grows; feeds past capacity
/// are rejected so the audio thread stays allocation free.
pub struct MidiPort {
    name: String,
    direction: PortDirection,
    capacity: usize,
    producer: Producer<MidiData>,
    consumer: Consumer<MidiData>,
}

impl MidiPort {
    pub fn new(name: &str, direction: PortDirection, capacity: usize) -> Self {
        let (producer, consumer) = RingBuffer::new(capacity);

        Self {
            name: name.to_owned(),
            direction,
            capacity,
            producer,
            consumer,
        }
    }

    pub fn with_default_capacity(name: &str, direction: PortDirection) -> Self {
        Self::new(name, direction, DEFAULT_MIDI_CAPACITY)
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append one message. A full queue rejects the new message; the
    /// element is `Copy`, so the caller still holds it.
    #[inline(always)]
    pub fn feed(&mut self, data: MidiData) -> Result<(), PortError> {
        self.producer.push(data).map_err(|_| PortError::QueueFull)
    }

    /// The oldest queued message, left in place.
    #[inline(always)]
    pub fn peek(&self) -> Result<&MidiData, PortError> {
        self.consumer.peek().map_err(|_| PortError::EmptyQueue)
    }

    /// Remove and return the oldest queued message.
    #[inline(always)]
    pub fn get(&mut self) -> Result<MidiData, PortError> {
        self.consumer.pop().map_err(|_| PortError::EmptyQueue)
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }

    /// Queued message count.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.consumer.slots()
    }
}

impl Debug for MidiPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MidiPort")
            .field("name", &self.name)
            .field("direction", &self.direction)
            .field("queued", &self.len())
            .finish()
    }
}

/// The closed set of port shapes a component can carry.
#[derive(Debug)]
pub enum Port {
    Audio(AudioPort),
    Midi(MidiPort),
}

impl Port {
    #[inline(always)]
    pub fn kind(&self) -> PortKind {
        match self {
            Port::Audio(_) => PortKind::Audio,
            Port::Midi(_) => PortKind::Midi,
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        match self {
            Port::Audio(port) => port.name(),
            Port::Midi(port) => port.name(),
        }
    }

    #[inline(always)]
    pub fn direction(&self) -> PortDirection {
        match self {
            Port::Audio(port) => port.direction(),
            Port::Midi(port) => port.direction(),
        }
    }

    pub fn as_audio(&self) -> Option<&AudioPort> {
        match self {
            Port::Audio(port) => Some(port),
            _ => None,
        }
    }

    pub fn as_audio_mut(&mut self) -> Option<&mut AudioPort> {
        match self {
            Port::Audio(port) => Some(port),
            _ => None,
        }
    }

    pub fn as_midi(&self) -> Option<&MidiPort> {
        match self {
            Port::Midi(port) => Some(port),
            _ => None,
        }
    }

    pub fn as_midi_mut(&mut self) -> Option<&mut MidiPort> {
        match self {
            Port::Midi(port) => Some(port),
            _ => None,
        }
    }
}
