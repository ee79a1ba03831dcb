use std::fmt::Debug;

/// A number of errors that can occur when parsing midi messages
#[derive(Debug, Clone, PartialEq)]
pub enum MidiError {
    CouldNotParse,
    NotImplemented,
}

// Status nibbles for channel voice messages
const NOTE_ON: u8 = 0x9;
const NOTE_OFF: u8 = 0x8;
const CONTROL: u8 = 0xB;
const PITCH_WHEEL: u8 = 0xE;
const CHANNEL_AFTER_TOUCH: u8 = 0xD;
const POLYPHONIC_AFTER_TOUCH: u8 = 0xA;

// Full status bytes for system messages
const SYSTEM_PREFIX: u8 = 0xF;
const START: u8 = 0xFA;
const CONTINUE: u8 = 0xFB;
const STOP: u8 = 0xFC;
const CLOCK: u8 = 0xF8;
const SONG_POSITION_POINTER: u8 = 0xF2;

/// A short midi message as it travels through port queues: up to three
/// bytes, zero padded.
///
/// Keeping the element fixed size keeps queue storage flat and copy cheap.
/// The significant byte count is recoverable from the status byte for
/// hosts that want exact sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidiData(pub [u8; 3]);

impl MidiData {
    /// Number of significant bytes, derived from the status byte.
    pub fn len(&self) -> usize {
        let status = self.0[0];

        if status >= 0xF0 {
            return match status {
                SONG_POSITION_POINTER => 3,
                _ => 1,
            };
        }

        match status >> 4 {
            CHANNEL_AFTER_TOUCH => 2,
            _ => 3,
        }
    }

    /// The significant bytes only.
    pub fn bytes(&self) -> &[u8] {
        &self.0[..self.len()]
    }
}

/// 14-bit pitch wheel value, 0x2000 at rest.
#[derive(Clone, Copy, PartialEq)]
pub struct PitchBend(u16);

impl PitchBend {
    pub fn new(value: u16) -> Self {
        Self(value & 0x3FFF)
    }
    /// Convert the "u14" midi pitch bend to a -8192 -> 8191 range i16
    pub fn as_i16(&self) -> i16 {
        self.0 as i16 - 8192
    }
    /// Convert the "u14" midi pitch bend to a -1.0 to 1.0 range
    pub fn as_normalized(&self) -> f32 {
        self.as_i16() as f32 / 8192.0
    }
}

impl Debug for PitchBend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_i16().to_string())
    }
}

/// Limited subset of midi functionality for now.
#[derive(Debug, Clone, PartialEq)]
pub enum MidiMessageKind {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    // After touch
    ChannelAftertouch { amount: u8 },
    PolyphonicAftertouch { note: u8, amount: u8 },
    Control { control_number: u8, value: u8 },
    PitchWheel { shift: PitchBend },
    // Basic clock functionality
    Start,
    Stop,
    Clock,
    Continue,
    SongPositionPointer { value: u16 },
}

/// A minimal struct wrapping the message kind and targeted channel
#[derive(Debug, Clone, PartialEq)]
pub struct MidiMessage {
    pub kind: MidiMessageKind,
    pub channel_idx: u8,
}

impl MidiMessage {
    pub fn encode(&self) -> MidiData {
        let status = |prefix: u8| (prefix << 4) | (self.channel_idx & 0x0F);

        match self.kind {
            MidiMessageKind::NoteOn { note, velocity } => {
                MidiData([status(NOTE_ON), note, velocity])
            }
            MidiMessageKind::NoteOff { note, velocity } => {
                MidiData([status(NOTE_OFF), note, velocity])
            }
            MidiMessageKind::Control {
                control_number,
                value,
            } => MidiData([status(CONTROL), control_number, value]),
            // LSB first, both bytes 7 bit
            MidiMessageKind::PitchWheel { shift } => MidiData([
                status(PITCH_WHEEL),
                (shift.0 & 0x7F) as u8,
                ((shift.0 >> 7) & 0x7F) as u8,
            ]),
            MidiMessageKind::ChannelAftertouch { amount } => {
                MidiData([status(CHANNEL_AFTER_TOUCH), amount, 0])
            }
            MidiMessageKind::PolyphonicAftertouch { note, amount } => {
                MidiData([status(POLYPHONIC_AFTER_TOUCH), note, amount])
            }
            MidiMessageKind::Start => MidiData([START, 0, 0]),
            MidiMessageKind::Continue => MidiData([CONTINUE, 0, 0]),
            MidiMessageKind::Stop => MidiData([STOP, 0, 0]),
            MidiMessageKind::Clock => MidiData([CLOCK, 0, 0]),
            MidiMessageKind::SongPositionPointer { value } => MidiData([
                SONG_POSITION_POINTER,
                (value & 0x7F) as u8,
                ((value >> 7) & 0x7F) as u8,
            ]),
        }
    }
}

impl TryFrom<&[u8]> for MidiMessage {
    type Error = MidiError;

    fn try_from(message: &[u8]) -> Result<Self, Self::Error> {
        let status = *message.first().ok_or(MidiError::CouldNotParse)?;

        let prefix = status >> 4;
        let channel_idx = status & 0x0F;

        let byte = |n: usize| message.get(n).copied().ok_or(MidiError::CouldNotParse);

        let (kind, channel_idx) = match prefix {
            NOTE_ON => (
                MidiMessageKind::NoteOn {
                    note: byte(1)?,
                    velocity: byte(2)?,
                },
                channel_idx,
            ),
            NOTE_OFF => (
                MidiMessageKind::NoteOff {
                    note: byte(1)?,
                    velocity: byte(2)?,
                },
                channel_idx,
            ),
            CONTROL => (
                MidiMessageKind::Control {
                    control_number: byte(1)?,
                    value: byte(2)?,
                },
                channel_idx,
            ),
            PITCH_WHEEL => {
                let lsb = byte(1)? as u16 & 0x7F;
                let msb = byte(2)? as u16 & 0x7F;

                (
                    MidiMessageKind::PitchWheel {
                        shift: PitchBend((msb << 7) | lsb),
                    },
                    channel_idx,
                )
            }
            CHANNEL_AFTER_TOUCH => (
                MidiMessageKind::ChannelAftertouch { amount: byte(1)? },
                channel_idx,
            ),
            POLYPHONIC_AFTER_TOUCH => (
                MidiMessageKind::PolyphonicAftertouch {
                    note: byte(1)?,
                    amount: byte(2)?,
                },
                channel_idx,
            ),
            SYSTEM_PREFIX => {
                let kind = match status {
                    START => MidiMessageKind::Start,
                    CONTINUE => MidiMessageKind::Continue,
                    STOP => MidiMessageKind::Stop,
                    CLOCK => MidiMessageKind::Clock,
                    SONG_POSITION_POINTER => {
                        let lsb = byte(1)? as u16 & 0x7F;
                        let msb = byte(2)? as u16 & 0x7F;

                        MidiMessageKind::SongPositionPointer {
                            value: (msb << 7) | lsb,
                        }
                    }
                    _ => return Err(MidiError::NotImplemented),
                };

                // System messages carry no channel.
                (kind, 0)
            }
            _ => return Err(MidiError::NotImplemented),
        };

        Ok(MidiMessage { kind, channel_idx })
    }
}

impl TryFrom<MidiData> for MidiMessage {
    type Error = MidiError;

    fn try_from(data: MidiData) -> Result<Self, Self::Error> {
        MidiMessage::try_from(&data.0[..])
    }
}
