use crate::{component::PortComponent, config::Config, features::FeatureSet};

/// The processing surface a plugin author implements once.
///
/// Adapters never see past this trait: they enumerate and bind the port
/// component between calls, invoke [Plugin::process] once per block, and
/// consult [Plugin::features] when deciding what to expose to a host.
///
/// `Send` because instances move onto the host's audio thread after
/// construction; processing itself stays single threaded.
pub trait Plugin: Send {
    fn ports(&self) -> &PortComponent;

    fn ports_mut(&mut self) -> &mut PortComponent;

    /// Runs once before the first process call, with the sample rate and
    /// block ceiling the host settled on.
    fn prepare(&mut self, _config: &Config) {}

    /// One block of work. Sample counts are set and buffers bound before
    /// this runs; output midi queues are drained after it returns.
    fn process(&mut self);

    /// Capabilities to report to the host. The default reads them off the
    /// port component; override to register explicit flags on top.
    fn features(&self) -> FeatureSet {
        FeatureSet::from_component(self.ports())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{features::Feature, speaker::SpeakerConfiguration};

    struct Passive {
        ports: PortComponent,
    }

    impl Plugin for Passive {
        fn ports(&self) -> &PortComponent {
            &self.ports
        }

        fn ports_mut(&mut self) -> &mut PortComponent {
            &mut self.ports
        }

        fn process(&mut self) {}
    }

    #[test]
    fn default_features_come_from_the_ports() {
        let plugin = Passive {
            ports: PortComponent::builder()
                .audio_in("In", SpeakerConfiguration::STEREO)
                .midi_in("Events")
                .build(),
        };

        let features = plugin.features();

        assert!(features.supports(Feature::MidiInput));
        assert!(!features.supports(Feature::MidiOutput));
        assert!(!features.supports(Feature::Gui));
    }
}
