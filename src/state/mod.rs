/// State management module
///
/// This module handles all application state, including:
/// - Manifest and whiteboard data structures (data.rs)
/// - Room id parsing and ordering (room_id.rs)
/// - Floor grouping (gallery.rs)
/// - The full-screen viewer state machine (viewer.rs)
/// - Page scroll suspension (scroll_lock.rs)

pub mod data;
pub mod gallery;
pub mod room_id;
pub mod scroll_lock;
pub mod viewer;
