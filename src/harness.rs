use std::ptr::NonNull;

use crate::{
    component::PortComponent,
    config::Config,
    index::{DirectionFilter, PortQuery, ports, ports_mut},
    plugin::Plugin,
    port::Port,
};

/// The reference adapter: owns one max-block-sized buffer per flat audio
/// channel and runs the whole per-block contract against a plugin.
///
/// Everything is allocated at construction, so [BlockHarness::process_block]
/// is safe to call from a realtime callback. Tests, the offline renderer
/// and the standalone runner all drive plugins through this.
pub struct BlockHarness {
    config: Config,
    inputs: Vec<Vec<f32>>,
    outputs: Vec<Vec<f32>>,
}

impl BlockHarness {
    /// Size the channel pools against the component the plugin will carry.
    pub fn new(config: Config, component: &PortComponent) -> Self {
        config.validate();

        let pool = |direction| {
            vec![
                vec![0.0; config.max_block_size];
                audio_channel_count(component, direction)
            ]
        };

        Self {
            config,
            inputs: pool(DirectionFilter::Input),
            outputs: pool(DirectionFilter::Output),
        }
    }

    #[inline(always)]
    pub fn config(&self) -> Config {
        self.config
    }

    #[inline(always)]
    pub fn input_channel_count(&self) -> usize {
        self.inputs.len()
    }

    #[inline(always)]
    pub fn output_channel_count(&self) -> usize {
        self.outputs.len()
    }

    /// Write access to one pooled input channel, flat order across the
    /// audio input ports.
    pub fn input_channel_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        self.inputs.get_mut(index).map(|buffer| buffer.as_mut_slice())
    }

    /// One pooled output channel as the last processed block left it.
    pub fn output_channel(&self, index: usize) -> Option<&[f32]> {
        self.outputs.get(index).map(|buffer| buffer.as_slice())
    }

    /// Run the full per-block contract: set sample counts, bind inputs and
    /// outputs, process, unbind. The plugin must carry the component this
    /// harness was sized for.
    pub fn process_block(&mut self, plugin: &mut dyn Plugin, frames: usize) {
        assert!(frames <= self.config.max_block_size);

        let component = plugin.ports_mut();

        debug_assert_eq!(
            audio_channel_count(component, DirectionFilter::Input),
            self.inputs.len()
        );
        debug_assert_eq!(
            audio_channel_count(component, DirectionFilter::Output),
            self.outputs.len()
        );

        bind_pool(component, DirectionFilter::Input, &mut self.inputs, frames);
        bind_pool(component, DirectionFilter::Output, &mut self.outputs, frames);

        plugin.process();

        for port in ports_mut(plugin.ports_mut(), PortQuery::audio(DirectionFilter::All)) {
            if let Some(audio) = port.as_audio_mut() {
                audio.unbind_all();
            }
        }
    }
}

fn audio_channel_count(component: &PortComponent, direction: DirectionFilter) -> usize {
    ports(component, PortQuery::audio(direction))
        .filter_map(Port::as_audio)
        .map(|audio| audio.channel_count())
        .sum()
}

fn bind_pool(
    component: &mut PortComponent,
    direction: DirectionFilter,
    pool: &mut [Vec<f32>],
    frames: usize,
) {
    let mut next = 0;

    for port in ports_mut(component, PortQuery::audio(direction)) {
        let Some(audio) = port.as_audio_mut() else {
            continue;
        };

        audio.set_sample_count(frames);

        for channel in 0..audio.channel_count() {
            let Some(buffer) = pool.get_mut(next) else {
                return;
            };
            next += 1;

            let pointer =
                NonNull::new(buffer.as_mut_ptr()).expect("pool channels are allocated up front");

            // Pool channels are distinct allocations that outlive the
            // block, which is exactly the bind contract.
            let bound = unsafe { audio.feed(channel, pointer) };
            debug_assert!(bound.is_ok());
        }
    }
}
