pub mod clock;
pub mod control;
pub mod playback;
pub mod sampler;
