//! Reference plugins exercising the port model end to end.

use crate::{registry::PluginRegistry, spec::PluginSpec};

pub mod gain;
pub mod tone;
pub mod transpose;

pub use gain::Gain;
pub use tone::Tone;
pub use transpose::Transpose;

/// A registry preloaded with the reference plugins.
pub fn builtin_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();

    let builtins = [
        PluginSpec::new("gain", "Fixed stereo gain", |_| Ok(Box::new(Gain::new(0.7)))),
        PluginSpec::new("tone", "Fixed-frequency sine generator", |_| {
            Ok(Box::new(Tone::new(440.0)))
        }),
        PluginSpec::new("transpose", "Shifts midi notes up an octave", |_| {
            Ok(Box::new(Transpose::new(12)))
        }),
    ];

    for spec in builtins {
        registry
            .register(spec)
            .expect("builtin plugin names are unique");
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{config::Config, features::Feature};

    #[test]
    fn builtins_register_in_order() {
        let registry = builtin_registry();

        let names: Vec<&str> = registry.iter_specs().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["gain", "tone", "transpose"]);
    }

    #[test]
    fn builtins_build_and_report_features() {
        let mut registry = builtin_registry();
        let config = Config::new(48_000, 256);

        let key = registry.instantiate("transpose", &config).unwrap();
        let features = registry.instance(key).unwrap().features();

        assert!(features.supports(Feature::MidiInput));
        assert!(features.supports(Feature::MidiOutput));

        let key = registry.instantiate("tone", &config).unwrap();
        let features = registry.instance(key).unwrap().features();

        assert!(!features.supports(Feature::MidiInput));
    }
}
