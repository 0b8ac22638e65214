/// File utilities
pub mod files;

/// Tensor Utilities
pub mod tensors;

/// Renderer Utilities
pub mod renderer;

/// Utilities for index <-> word mappings
pub mod classes;

/// Logger setup for the command line tools
pub mod logging;
