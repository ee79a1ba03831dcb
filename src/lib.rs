pub mod channel;
pub mod component;
pub mod config;
pub mod features;
pub mod harness;
pub mod index;
pub mod midi;
pub mod out;
pub mod plugin;
pub mod port;
pub mod registry;
pub mod speaker;
pub mod spec;

pub mod plugins;
