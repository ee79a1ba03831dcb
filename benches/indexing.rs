use criterion::{Criterion, black_box, criterion_group, criterion_main};
use portato::{
    component::PortComponent,
    config::Config,
    harness::BlockHarness,
    index::{DirectionFilter, PortQuery, count_flat, flat_at, port_at},
    plugin::Plugin,
    plugins::Gain,
    speaker::SpeakerConfiguration,
};

fn wide_component() -> PortComponent {
    let mut builder = PortComponent::builder();

    for n in 0..16 {
        builder = builder
            .audio_in(&format!("In{n}"), SpeakerConfiguration::STEREO)
            .audio_out(&format!("Out{n}"), SpeakerConfiguration::SURROUND_5_1);
    }

    builder.midi_in("Events").midi_out("EventsOut").build()
}

fn bench_filtered_lookup(c: &mut Criterion) {
    let component = wide_component();
    let query = PortQuery::audio(DirectionFilter::Output);

    c.bench_function("port_at filtered", |b| {
        b.iter(|| {
            for n in 0..16 {
                black_box(port_at(&component, query, black_box(n)));
            }
        })
    });
}

fn bench_flat_traversal(c: &mut Criterion) {
    let component = wide_component();
    let slots = count_flat(&component);

    c.bench_function("flat_at full walk", |b| {
        b.iter(|| {
            for n in 0..slots {
                black_box(flat_at(&component, black_box(n)));
            }
        })
    });
}

fn bench_harness_block(c: &mut Criterion) {
    let config = Config::new(48_000, 4096);
    let mut plugin = Gain::new(0.7);
    plugin.prepare(&config);

    let mut harness = BlockHarness::new(config, plugin.ports());
    harness.input_channel_mut(0).unwrap().fill(0.25);
    harness.input_channel_mut(1).unwrap().fill(-0.25);

    c.bench_function("gain block 4096", |b| {
        b.iter(|| {
            harness.process_block(&mut plugin, 4096);
            black_box(harness.output_channel(0));
        })
    });
}

criterion_group!(
    benches,
    bench_filtered_lookup,
    bench_flat_traversal,
    bench_harness_block
);
criterion_main!(benches);
