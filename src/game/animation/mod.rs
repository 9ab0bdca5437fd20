mod clip;
mod state;
mod stitch;
pub mod track;

pub use clip::Clip;
pub use state::Playback;
pub use stitch::{LoopConfig, LoopDescriptor, StitchError, stitch};
pub use track::{BoneTrack, Interpolate, TransformKey};
