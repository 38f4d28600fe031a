pub mod action_map;
#[cfg(feature = "ale")]
pub mod ale;
pub mod atari_environment;
pub mod emulator;
pub mod frame;
pub mod frame_ring_buffer;
pub mod observation;
pub mod prelude;
pub mod viewer;

pub mod test;

pub use atari_environment::{AtariConfig, AtariEnvironment};

#[cfg(test)]
#[ctor::ctor]
fn init() {
    use log::LevelFilter;
    env_logger::builder()
        .format_timestamp_secs()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .init()
}
