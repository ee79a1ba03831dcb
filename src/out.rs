use std::{path::Path, time::Duration};

use cpal::{
    BuildStreamError, Device, FromSample, SizedSample, StreamConfig,
    traits::{DeviceTrait, StreamTrait},
};
use hound::{WavSpec, WavWriter};

use assert_no_alloc::*;

use crate::{config::Config, harness::BlockHarness, plugin::Plugin};

/// Render a plugin offline into a 32-bit float wav, one wav channel per
/// flat audio output channel.
pub fn render(
    plugin: &mut dyn Plugin,
    config: Config,
    path: &Path,
    time: Duration,
) -> Result<(), hound::Error> {
    plugin.prepare(&config);

    let mut harness = BlockHarness::new(config, plugin.ports());

    let channels = harness.output_channel_count();
    let duration_in_samples = (time.as_secs_f32() * config.sample_rate as f32) as usize;

    let spec = WavSpec {
        channels: channels as u16,
        sample_rate: config.sample_rate as u32,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    let mut count = 0_usize;

    while count < duration_in_samples {
        let frames = config.max_block_size.min(duration_in_samples - count);

        harness.process_block(plugin, frames);

        for n in 0..frames {
            for channel in 0..channels {
                let sample = harness
                    .output_channel(channel)
                    .map_or(0.0, |samples| samples[n]);
                writer.write_sample(sample)?;
            }
        }

        count += frames;
    }

    writer.finalize()?;

    Ok(())
}

#[inline(always)]
fn write_plugin_block_cpal<T>(
    output: &mut [T],
    stream_config: &StreamConfig,
    config: &Config,
    plugin: &mut dyn Plugin,
    harness: &mut BlockHarness,
) where
    T: SizedSample + FromSample<f64>,
{
    let device_channels = stream_config.channels as usize;

    // Device callbacks are not obliged to match max_block_size, so chunk
    // the request into blocks the harness was sized for.
    for block in output.chunks_mut(device_channels * config.max_block_size) {
        let frames = block.len() / device_channels;

        harness.process_block(plugin, frames);

        for (frame_index, frame) in block.chunks_mut(device_channels).enumerate() {
            for (channel, sample) in frame.iter_mut().enumerate() {
                // Device channels past the plugin's outputs get silence.
                let value = harness
                    .output_channel(channel)
                    .map_or(0.0, |samples| samples[frame_index] as f64);
                *sample = T::from_sample(value);
            }
        }
    }
}

/// Run a plugin live on a cpal output device until the thread is unparked.
pub fn start_plugin_audio_thread(
    device: &Device,
    stream_config: StreamConfig,
    config: Config,
    mut plugin: Box<dyn Plugin>,
) -> Result<(), BuildStreamError> {
    plugin.prepare(&config);

    let mut harness = BlockHarness::new(config, plugin.ports());

    let stream = device.build_output_stream(
        &stream_config.clone(),
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            assert_no_alloc(|| {
                write_plugin_block_cpal(
                    data,
                    &stream_config,
                    &config,
                    plugin.as_mut(),
                    &mut harness,
                )
            })
        },
        |err| eprintln!("An output stream error occurred: {}", err),
        None,
    )?;

    stream.play().unwrap();

    std::thread::park();

    Ok(())
}
