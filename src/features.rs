use std::collections::BTreeSet;

use crate::{
    component::PortComponent,
    index::{DirectionFilter, PortQuery, count_ports},
};

/// Optional capabilities a plugin may expose to a host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    MidiInput,
    MidiOutput,
    MultiPort,
    HardRealtime,
    Gui,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::MidiInput,
        Feature::MidiOutput,
        Feature::MultiPort,
        Feature::HardRealtime,
        Feature::Gui,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Feature::MidiInput => "midi-input",
            Feature::MidiOutput => "midi-output",
            Feature::MultiPort => "multi-port",
            Feature::HardRealtime => "hard-realtime",
            Feature::Gui => "gui",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureError {
    Unsupported { feature: Feature, context: String },
}

/// The capability flags one plugin carries.
///
/// Flags arrive two ways: the author registers them explicitly, or
/// [FeatureSet::detect] reads them off a port component. The two sets are
/// kept apart so re-detection replaces stale automatic flags without
/// touching anything registered by hand.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FeatureSet {
    explicit: BTreeSet<Feature>,
    detected: BTreeSet<Feature>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_component(component: &PortComponent) -> Self {
        let mut features = Self::new();
        features.detect(component);
        features
    }

    pub fn register(&mut self, feature: Feature) {
        self.explicit.insert(feature);
    }

    /// Recompute the automatic flags from one scan of the component.
    ///
    /// Midi input is supported iff at least one midi port points inward,
    /// midi output iff at least one points outward. Calling this again
    /// replaces the previous automatic flags; explicit registrations
    /// survive.
    pub fn detect(&mut self, component: &PortComponent) {
        self.detected.clear();

        if count_ports(component, PortQuery::midi(DirectionFilter::Input)) > 0 {
            self.detected.insert(Feature::MidiInput);
        }
        if count_ports(component, PortQuery::midi(DirectionFilter::Output)) > 0 {
            self.detected.insert(Feature::MidiOutput);
        }
    }

    #[inline(always)]
    pub fn supports(&self, feature: Feature) -> bool {
        self.explicit.contains(&feature) || self.detected.contains(&feature)
    }

    /// Fail fast when an adapter assumes a capability the plugin lacks.
    ///
    /// `context` names the call site for the host-facing diagnostic.
    pub fn require(&self, feature: Feature, context: &str) -> Result<(), FeatureError> {
        if self.supports(feature) {
            Ok(())
        } else {
            Err(FeatureError::Unsupported {
                feature,
                context: context.to_owned(),
            })
        }
    }

    /// Supported features in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL
            .into_iter()
            .filter(move |feature| self.supports(*feature))
    }
}
