use crate::{
    port::{AudioPort, MidiPort, Port, PortDirection},
    speaker::SpeakerConfiguration,
};

/// Every port a plugin exposes, inputs partitioned before outputs.
///
/// Ports land in registration order inside their partition and are never
/// removed; the shape is fixed once a component is handed to an adapter.
/// The combined view puts every input before every output, so `at(k)` is
/// `input_at(k)` while `k` is inside the input partition and
/// `output_at(k - len_inputs())` after that.
#[derive(Debug, Default)]
pub struct PortComponent {
    inputs: Vec<Port>,
    outputs: Vec<Port>,
}

impl PortComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> PortComponentBuilder {
        PortComponentBuilder::default()
    }

    /// Append a port to the partition its direction selects.
    pub fn add_port(&mut self, port: Port) {
        match port.direction() {
            PortDirection::Input => self.inputs.push(port),
            PortDirection::Output => self.outputs.push(port),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.inputs.len() + self.outputs.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }

    #[inline(always)]
    pub fn len_inputs(&self) -> usize {
        self.inputs.len()
    }

    #[inline(always)]
    pub fn len_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Combined view, inputs first.
    #[inline(always)]
    pub fn at(&self, index: usize) -> Option<&Port> {
        if index < self.inputs.len() {
            self.inputs.get(index)
        } else {
            self.outputs.get(index - self.inputs.len())
        }
    }

    #[inline(always)]
    pub fn at_mut(&mut self, index: usize) -> Option<&mut Port> {
        if index < self.inputs.len() {
            self.inputs.get_mut(index)
        } else {
            self.outputs.get_mut(index - self.inputs.len())
        }
    }

    #[inline(always)]
    pub fn input_at(&self, index: usize) -> Option<&Port> {
        self.inputs.get(index)
    }

    #[inline(always)]
    pub fn input_at_mut(&mut self, index: usize) -> Option<&mut Port> {
        self.inputs.get_mut(index)
    }

    #[inline(always)]
    pub fn output_at(&self, index: usize) -> Option<&Port> {
        self.outputs.get(index)
    }

    #[inline(always)]
    pub fn output_at_mut(&mut self, index: usize) -> Option<&mut Port> {
        self.outputs.get_mut(index)
    }

    #[inline(always)]
    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }

    #[inline(always)]
    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }

    /// Both partitions mutably at once, the borrow split process code
    /// needs to read inputs while writing outputs.
    #[inline(always)]
    pub fn split_mut(&mut self) -> (&mut [Port], &mut [Port]) {
        (&mut self.inputs, &mut self.outputs)
    }
}

#[derive(Default)]
pub struct PortComponentBuilder {
    component: PortComponent,
}

impl PortComponentBuilder {
    pub fn audio_in(mut self, name: &str, configuration: SpeakerConfiguration) -> Self {
        self.component.add_port(Port::Audio(AudioPort::new(
            name,
            PortDirection::Input,
            configuration,
        )));
        self
    }

    pub fn audio_out(mut self, name: &str, configuration: SpeakerConfiguration) -> Self {
        self.component.add_port(Port::Audio(AudioPort::new(
            name,
            PortDirection::Output,
            configuration,
        )));
        self
    }

    pub fn midi_in(mut self, name: &str) -> Self {
        self.component.add_port(Port::Midi(MidiPort::with_default_capacity(
            name,
            PortDirection::Input,
        )));
        self
    }

    pub fn midi_out(mut self, name: &str) -> Self {
        self.component.add_port(Port::Midi(MidiPort::with_default_capacity(
            name,
            PortDirection::Output,
        )));
        self
    }

    pub fn midi_in_with_capacity(mut self, name: &str, capacity: usize) -> Self {
        self.component.add_port(Port::Midi(MidiPort::new(
            name,
            PortDirection::Input,
            capacity,
        )));
        self
    }

    pub fn midi_out_with_capacity(mut self, name: &str, capacity: usize) -> Self {
        self.component.add_port(Port::Midi(MidiPort::new(
            name,
            PortDirection::Output,
            capacity,
        )));
        self
    }

    pub fn build(self) -> PortComponent {
        self.component
    }
}
