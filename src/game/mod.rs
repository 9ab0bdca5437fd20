pub mod animation;
pub mod assets;
pub mod scenes;
pub mod skeleton;
