use portato::{
    config::Config,
    harness::BlockHarness,
    midi::{MidiMessage, MidiMessageKind},
    plugin::Plugin,
    plugins::Transpose,
};

fn main() {
    let config = Config::new(48_000, 64);

    let mut plugin = Transpose::new(12);
    plugin.prepare(&config);

    let mut harness = BlockHarness::new(config, plugin.ports());

    // A C major triad into the input queue.
    let input = plugin
        .ports_mut()
        .input_at_mut(0)
        .unwrap()
        .as_midi_mut()
        .unwrap();

    for note in [60, 64, 67] {
        let message = MidiMessage {
            channel_idx: 0,
            kind: MidiMessageKind::NoteOn {
                note,
                velocity: 100,
            },
        };
        input.feed(message.encode()).expect("Input queue is full!");
    }

    harness.process_block(&mut plugin, 64);

    let output = plugin
        .ports_mut()
        .output_at_mut(0)
        .unwrap()
        .as_midi_mut()
        .unwrap();

    while let Ok(data) = output.get() {
        println!("{:?}", MidiMessage::try_from(data).expect("Bad midi out!"));
    }
}
