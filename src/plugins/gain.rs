use crate::{component::PortComponent, plugin::Plugin, speaker::SpeakerConfiguration};

/// Stereo in, stereo out, fixed linear gain.
pub struct Gain {
    gain: f32,
    ports: PortComponent,
}

impl Gain {
    pub fn new(gain: f32) -> Self {
        Self {
            gain,
            ports: PortComponent::builder()
                .audio_in("In", SpeakerConfiguration::STEREO)
                .audio_out("Out", SpeakerConfiguration::STEREO)
                .build(),
        }
    }
}

impl Plugin for Gain {
    fn ports(&self) -> &PortComponent {
        &self.ports
    }

    fn ports_mut(&mut self) -> &mut PortComponent {
        &mut self.ports
    }

    fn process(&mut self) {
        let (inputs, outputs) = self.ports.split_mut();

        let Some(input) = inputs[0].as_audio() else {
            return;
        };
        let Some(output) = outputs[0].as_audio_mut() else {
            return;
        };

        for channel in 0..output.channel_count() {
            let Some(source) = input.samples(channel) else {
                continue;
            };
            let Some(destination) = output.samples_mut(channel) else {
                continue;
            };

            for (out, sample) in destination.iter_mut().zip(source) {
                *out = sample * self.gain;
            }
        }
    }
}
