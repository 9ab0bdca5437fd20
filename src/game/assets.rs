use std::sync::Arc;

use ahash::HashMap;

use crate::{
    engine::{
        assets::AssetError,
        storage::{Handle, Storage},
    },
    game::{
        animation::{LoopConfig, LoopDescriptor, StitchError, stitch},
        skeleton::Skeleton,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Stitch(#[from] StitchError),
}

type SkeletonLoader = Box<dyn FnMut(&str) -> Result<Skeleton, AssetError>>;

/// Cached-by-name skeleton store. Loading the same name twice returns the
/// same handle, so every character instance shares one skeleton and its
/// animations.
pub struct Skeletons {
    skeletons: Storage<Skeleton>,
    lookup: HashMap<String, Handle<Skeleton>>,
    loader: SkeletonLoader,

    /// Loop descriptors for clips that have already been stitched, keyed by
    /// clip identity. A clip must never be stitched twice; the second edit
    /// would cut the already shortened loop again.
    loops: HashMap<(Handle<Skeleton>, String), Arc<LoopDescriptor>>,
}

impl Skeletons {
    pub fn new(loader: impl FnMut(&str) -> Result<Skeleton, AssetError> + 'static) -> Self {
        Self {
            skeletons: Storage::default(),
            lookup: HashMap::default(),
            loader: Box::new(loader),
            loops: HashMap::default(),
        }
    }

    pub fn load(&mut self, name: &str) -> Result<Handle<Skeleton>, AssetError> {
        if let Some(handle) = self.lookup.get(name) {
            return Ok(*handle);
        }

        let skeleton = (self.loader)(name)?;
        let handle = self.skeletons.insert(skeleton);
        self.lookup.insert(name.to_string(), handle);

        tracing::info!("Loaded skeleton: {name}");
        Ok(handle)
    }

    pub fn get(&self, handle: Handle<Skeleton>) -> Option<&Skeleton> {
        self.skeletons.get(handle)
    }

    /// Stitch the named animation into a seamless loop, once. Repeat calls
    /// for the same clip return the descriptor from the first call without
    /// touching the clip again.
    pub fn prepare_loop(
        &mut self,
        handle: Handle<Skeleton>,
        animation: &str,
        config: &LoopConfig,
    ) -> Result<Arc<LoopDescriptor>, SetupError> {
        let key = (handle, animation.to_string());
        if let Some(descriptor) = self.loops.get(&key) {
            return Ok(Arc::clone(descriptor));
        }

        let skeleton = self
            .skeletons
            .get_mut(handle)
            .ok_or_else(|| AssetError::NotFound(format!("skeleton {handle:?}")))?;

        let descriptor = Arc::new(stitch(skeleton, animation, config)?);
        self.loops.insert(key, Arc::clone(&descriptor));
        Ok(descriptor)
    }
}
