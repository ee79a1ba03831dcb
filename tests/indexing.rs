use std::ops::ControlFlow;

use approx::assert_relative_eq;
use rand::Rng;

use portato::{
    component::PortComponent,
    config::Config,
    features::{Feature, FeatureSet},
    harness::BlockHarness,
    index::{
        DirectionFilter, KindFilter, PortQuery, count_flat, count_ports, iterate_flat, port_at,
    },
    plugin::Plugin,
    plugins::{Gain, builtin_registry},
    speaker::SpeakerConfiguration,
};

// The smallest useful plugin surface: one mono in, one mono out.
fn mono_pair() -> PortComponent {
    PortComponent::builder()
        .audio_in("In0", SpeakerConfiguration::MONO)
        .audio_out("Out0", SpeakerConfiguration::MONO)
        .build()
}

#[test]
fn mono_ports_resolve_through_filtered_lookup() {
    let component = mono_pair();

    assert_eq!(
        port_at(&component, PortQuery::audio(DirectionFilter::Input), 0)
            .unwrap()
            .name(),
        "In0"
    );
    assert_eq!(
        port_at(&component, PortQuery::audio(DirectionFilter::Output), 0)
            .unwrap()
            .name(),
        "Out0"
    );
    assert!(port_at(&component, PortQuery::audio(DirectionFilter::Input), 1).is_none());
}

#[test]
fn nine_port_component_flattens_to_nine_slots() {
    // Three mono ins, three mono outs, two midi ins, one midi out.
    let component = PortComponent::builder()
        .audio_in("In0", SpeakerConfiguration::MONO)
        .audio_in("In1", SpeakerConfiguration::MONO)
        .audio_in("In2", SpeakerConfiguration::MONO)
        .midi_in("Events0")
        .midi_in("Events1")
        .audio_out("Out0", SpeakerConfiguration::MONO)
        .audio_out("Out1", SpeakerConfiguration::MONO)
        .audio_out("Out2", SpeakerConfiguration::MONO)
        .midi_out("EventsOut")
        .build();

    assert_eq!(component.len(), 9);
    assert_eq!(count_flat(&component), 9);

    let mut visited = Vec::new();
    iterate_flat(&component, |port, flat_index| {
        visited.push((port.name().to_owned(), flat_index));
        ControlFlow::Continue(())
    });

    let names: Vec<&str> = visited.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "In0", "In1", "In2", "Events0", "Events1", "Out0", "Out1", "Out2", "EventsOut"
        ]
    );

    for (expected, (_, flat_index)) in visited.iter().enumerate() {
        assert_eq!(*flat_index, expected);
    }
}

#[test]
fn count_sums_hold_for_every_kind() {
    let component = PortComponent::builder()
        .audio_in("In", SpeakerConfiguration::SURROUND_5_1)
        .midi_in("Events")
        .audio_out("Out", SpeakerConfiguration::STEREO)
        .midi_out("EventsOut")
        .build();

    for kind in [KindFilter::Audio, KindFilter::Midi, KindFilter::Any] {
        let inputs = count_ports(&component, PortQuery::new(kind, DirectionFilter::Input));
        let outputs = count_ports(&component, PortQuery::new(kind, DirectionFilter::Output));
        let all = count_ports(&component, PortQuery::new(kind, DirectionFilter::All));

        assert_eq!(inputs + outputs, all);
    }

    assert_eq!(count_ports(&component, PortQuery::any()), component.len());
    // 6 + 2 audio channels, one slot per midi port.
    assert_eq!(count_flat(&component), 10);
}

#[test]
fn gain_block_through_the_harness() {
    let config = Config::new(48_000, 128);
    let mut plugin = Gain::new(0.5);
    plugin.prepare(&config);

    let mut harness = BlockHarness::new(config, plugin.ports());

    let mut rng = rand::rng();
    let mut fed: Vec<Vec<f32>> = Vec::new();

    for channel in 0..harness.input_channel_count() {
        let samples = harness.input_channel_mut(channel).unwrap();
        for sample in samples.iter_mut() {
            *sample = rng.random_range(-1.0..1.0);
        }
        fed.push(samples.to_vec());
    }

    harness.process_block(&mut plugin, 128);

    for (channel, source) in fed.iter().enumerate() {
        let rendered = harness.output_channel(channel).unwrap();
        for (out, sample) in rendered.iter().zip(source) {
            assert_relative_eq!(*out, sample * 0.5);
        }
    }
}

#[test]
fn registry_drives_the_full_lifecycle() {
    let config = Config::new(48_000, 64);
    let mut registry = builtin_registry();

    let key = registry.instantiate("gain", &config).unwrap();

    {
        let plugin = registry.instance_mut(key).unwrap();
        let mut harness = BlockHarness::new(config, plugin.ports());

        harness.input_channel_mut(0).unwrap().fill(1.0);
        harness.process_block(plugin, 64);

        assert_relative_eq!(harness.output_channel(0).unwrap()[0], 0.7);
    }

    assert_eq!(registry.instance_count(), 1);
    assert!(registry.destroy(key));
    assert_eq!(registry.instance_count(), 0);
}

#[test]
fn adapters_can_reject_on_missing_features() {
    let features = FeatureSet::from_component(&mono_pair());

    assert!(!features.supports(Feature::MidiInput));

    let rejection = features.require(Feature::MidiInput, "lv2 atom input");
    assert!(rejection.is_err());

    let component = PortComponent::builder().midi_in("Events").build();
    let features = FeatureSet::from_component(&component);
    assert!(features.require(Feature::MidiInput, "lv2 atom input").is_ok());
}
