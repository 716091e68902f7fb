/// User interface module
///
/// - Whiteboard cards (card.rs)
/// - The floor-by-floor page (gallery.rs)
/// - The zoom/pan viewer overlay (viewer.rs)

pub mod card;
pub mod gallery;
pub mod viewer;
