/// Asset access module
///
/// This module handles:
/// - Locating the manifest and images (local directory or http base)
/// - Fetching the manifest with a teardown guard
/// - Loading images and probing their size
/// - Producing the small asset set

pub mod loader;
pub mod manifest;
pub mod shrink;
pub mod source;
