/// Version string embedded by `build.rs` (`git describe`, or `dev`).
pub const GIT_VERSION: &str = env!("GIT_VERSION");
