use crate::{
    component::PortComponent,
    midi::{MidiMessage, MidiMessageKind},
    plugin::Plugin,
};

/// Shifts note numbers by a fixed interval, midi in to midi out.
///
/// Notes saturate into 0..=127; everything that is not a note, or does not
/// parse as a known message, passes through untouched.
pub struct Transpose {
    semitones: i8,
    ports: PortComponent,
}

impl Transpose {
    pub fn new(semitones: i8) -> Self {
        Self {
            semitones,
            ports: PortComponent::builder().midi_in("In").midi_out("Out").build(),
        }
    }
}

impl Plugin for Transpose {
    fn ports(&self) -> &PortComponent {
        &self.ports
    }

    fn ports_mut(&mut self) -> &mut PortComponent {
        &mut self.ports
    }

    fn process(&mut self) {
        let semitones = self.semitones;
        let shift = |note: u8| (note as i16 + semitones as i16).clamp(0, 127) as u8;

        let (inputs, outputs) = self.ports.split_mut();

        let Some(input) = inputs[0].as_midi_mut() else {
            return;
        };
        let Some(output) = outputs[0].as_midi_mut() else {
            return;
        };

        while let Ok(data) = input.get() {
            let shifted = match MidiMessage::try_from(data) {
                Ok(MidiMessage {
                    kind: MidiMessageKind::NoteOn { note, velocity },
                    channel_idx,
                }) => MidiMessage {
                    kind: MidiMessageKind::NoteOn {
                        note: shift(note),
                        velocity,
                    },
                    channel_idx,
                }
                .encode(),
                Ok(MidiMessage {
                    kind: MidiMessageKind::NoteOff { note, velocity },
                    channel_idx,
                }) => MidiMessage {
                    kind: MidiMessageKind::NoteOff {
                        note: shift(note),
                        velocity,
                    },
                    channel_idx,
                }
                .encode(),
                _ => data,
            };

            // A full output queue drops the message; the input side has
            // already consumed it either way.
            let _ = output.feed(shifted);
        }
    }
}
