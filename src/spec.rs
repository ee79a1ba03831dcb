use crate::{
    plugin::Plugin,
    port::{Port, PortDirection, PortKind},
    registry::RegistryError,
};

/// A PluginFactory builds a fresh, unprepared instance for the config the
/// host negotiated. The registry prepares it before handing out a key.
pub type PluginFactory = fn(&crate::config::Config) -> Result<Box<dyn Plugin>, RegistryError>;

/// Display name, description and factory for one plugin definition.
pub struct PluginSpec {
    pub name: String,
    pub description: String,
    pub build: PluginFactory,
}

impl PluginSpec {
    pub fn new(name: &str, description: &str, build: PluginFactory) -> Self {
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            build,
        }
    }
}

/// Host-facing summary of one plugin: capabilities plus the port table in
/// component order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "docs", derive(serde::Serialize))]
pub struct PluginDescriptor {
    pub name: String,
    pub description: String,
    pub features: Vec<&'static str>,
    pub ports: Vec<PortDescriptor>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "docs", derive(serde::Serialize))]
pub struct PortDescriptor {
    pub name: String,
    pub kind: &'static str,
    pub direction: &'static str,
    pub channels: usize,
    pub channel_names: Vec<String>,
}

impl PortDescriptor {
    fn from_port(port: &Port) -> Self {
        let (channels, channel_names) = match port.as_audio() {
            Some(audio) => (
                audio.channel_count(),
                audio
                    .channels()
                    .iter()
                    .map(|channel| channel.name().to_owned())
                    .collect(),
            ),
            None => (0, Vec::new()),
        };

        Self {
            name: port.name().to_owned(),
            kind: match port.kind() {
                PortKind::Audio => "audio",
                PortKind::Midi => "midi",
            },
            direction: match port.direction() {
                PortDirection::Input => "input",
                PortDirection::Output => "output",
            },
            channels,
            channel_names,
        }
    }
}

/// Summarize a built plugin for manifests and docs.
pub fn describe(name: &str, description: &str, plugin: &dyn Plugin) -> PluginDescriptor {
    let component = plugin.ports();

    let ports = (0..component.len())
        .filter_map(|index| component.at(index))
        .map(PortDescriptor::from_port)
        .collect();

    PluginDescriptor {
        name: name.to_owned(),
        description: description.to_owned(),
        features: plugin.features().iter().map(|f| f.name()).collect(),
        ports,
    }
}
