use portato::{config::Config, plugins::builtin_registry, spec::describe};

/// Dumps the builtin plugin descriptors as pretty JSON on stdout.
fn main() {
    let config = Config::new(48_000, 512);
    let registry = builtin_registry();

    let mut descriptors = Vec::new();

    for spec in registry.iter_specs() {
        let mut plugin = (spec.build)(&config).expect("builtin plugin failed to build");
        plugin.prepare(&config);

        descriptors.push(describe(&spec.name, &spec.description, plugin.as_ref()));
    }

    let json =
        serde_json::to_string_pretty(&descriptors).expect("descriptor serialization failed");

    println!("{}", json);
}
