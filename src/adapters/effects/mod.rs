//! Effect sink adapters.

mod recording;

pub use recording::RecordingEffectSink;
