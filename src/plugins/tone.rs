use std::f32::consts::TAU;

use crate::{
    component::PortComponent, config::Config, plugin::Plugin, speaker::SpeakerConfiguration,
};

/// Fixed-frequency sine generator, stereo out.
///
/// The phase accumulator runs against the prepared sample rate, so
/// [Plugin::prepare] must see the final config before the first block.
pub struct Tone {
    freq: f32,
    phase: f32,
    sample_rate: f32,
    ports: PortComponent,
}

impl Tone {
    pub fn new(freq: f32) -> Self {
        Self {
            freq,
            phase: 0.0,
            sample_rate: 48_000.0,
            ports: PortComponent::builder()
                .audio_out("Out", SpeakerConfiguration::STEREO)
                .build(),
        }
    }
}

impl Plugin for Tone {
    fn ports(&self) -> &PortComponent {
        &self.ports
    }

    fn ports_mut(&mut self) -> &mut PortComponent {
        &mut self.ports
    }

    fn prepare(&mut self, config: &Config) {
        self.sample_rate = config.sample_rate as f32;
        self.phase = 0.0;
    }

    fn process(&mut self) {
        let Some(port) = self
            .ports
            .output_at_mut(0)
            .and_then(|port| port.as_audio_mut())
        else {
            return;
        };

        let step = self.freq / self.sample_rate;
        let frames = port.sample_count();

        for channel in 0..port.channel_count() {
            // Every channel replays the same phase run.
            let mut phase = self.phase;

            let Some(samples) = port.samples_mut(channel) else {
                continue;
            };

            for sample in samples {
                *sample = (phase * TAU).sin();
                phase = (phase + step).fract();
            }
        }

        self.phase = (self.phase + step * frames as f32).fract();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::harness::BlockHarness;

    #[test]
    fn phase_is_continuous_across_blocks() {
        let config = Config::new(8_000, 16);
        let mut plugin = Tone::new(1_000.0);
        plugin.prepare(&config);

        let mut harness = BlockHarness::new(config, plugin.ports());

        harness.process_block(&mut plugin, 16);
        let mut rendered: Vec<f32> = harness.output_channel(0).unwrap().to_vec();
        harness.process_block(&mut plugin, 16);
        rendered.extend_from_slice(harness.output_channel(0).unwrap());

        // 1 kHz at 8 kHz: one cycle every 8 samples, starting at phase 0.
        let step = 1_000.0 / 8_000.0;
        for (n, sample) in rendered.iter().enumerate() {
            let expected = ((n as f32 * step).fract() * TAU).sin();
            assert_relative_eq!(*sample, expected, epsilon = 1e-4);
        }
    }

    #[test]
    fn channels_carry_the_same_signal() {
        let config = Config::new(48_000, 64);
        let mut plugin = Tone::new(440.0);
        plugin.prepare(&config);

        let mut harness = BlockHarness::new(config, plugin.ports());
        harness.process_block(&mut plugin, 64);

        assert_eq!(
            harness.output_channel(0).unwrap(),
            harness.output_channel(1).unwrap()
        );
    }
}
