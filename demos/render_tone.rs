use std::{path::Path, time::Duration};

use portato::{config::Config, out::render, plugins::Tone};

fn main() {
    let config = Config::new(48_000, 512);

    let mut plugin = Tone::new(440.0);

    render(
        &mut plugin,
        config,
        Path::new("tone.wav"),
        Duration::from_secs(2),
    )
    .expect("Could not render tone.wav!");

    println!("Wrote two seconds of 440 Hz to tone.wav");
}
