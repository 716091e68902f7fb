/// Floor grouping
///
/// Turns a flat manifest into per-floor groups, each sorted by room id.

use std::collections::BTreeMap;

use super::data::{Manifest, Whiteboard};
use super::room_id::compare_room_ids;

/// All whiteboards on one floor, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct FloorGroup {
    pub floor: u32,
    pub boards: Vec<Whiteboard>,
}

/// The grouped, sorted gallery model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gallery {
    /// Groups in ascending floor order
    pub groups: Vec<FloorGroup>,
}

/// What the page shows: nothing partial, ever
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GalleryLoad {
    #[default]
    Loading,
    /// The manifest could not be fetched or parsed
    Failed(String),
    Ready(Gallery),
}

impl Gallery {
    /// Build the gallery from a manifest.
    ///
    /// Entries whose room id has no digit have no floor and are left out.
    pub fn build(manifest: &Manifest) -> Self {
        let mut floors: BTreeMap<u32, Vec<Whiteboard>> = BTreeMap::new();

        for (room_id, entry) in manifest {
            let board = Whiteboard::new(room_id.as_str(), entry);
            match board.floor {
                Some(floor) => floors.entry(floor).or_default().push(board),
                None => tracing::debug!(room_id = %room_id, "no floor in room id, skipping"),
            }
        }

        let groups = floors
            .into_iter()
            .map(|(floor, mut boards)| {
                boards.sort_by(|a, b| compare_room_ids(&a.room_id, &b.room_id));
                FloorGroup { floor, boards }
            })
            .collect();

        Self { groups }
    }

    /// Number of boards shown across all floors
    pub fn board_count(&self) -> usize {
        self.groups.iter().map(|g| g.boards.len()).sum()
    }

    /// Find a shown board by room id
    pub fn find(&self, room_id: &str) -> Option<&Whiteboard> {
        self.boards().find(|b| b.room_id == room_id)
    }

    /// Every shown board, floor by floor
    pub fn boards(&self) -> impl Iterator<Item = &Whiteboard> {
        self.groups.iter().flat_map(|g| g.boards.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{Corners, ManifestEntry};

    fn manifest(ids: &[&str]) -> Manifest {
        ids.iter()
            .map(|id| {
                (
                    id.to_string(),
                    ManifestEntry {
                        file: format!("{}.webp", id),
                        corners: Corners::default(),
                    },
                )
            })
            .collect()
    }

    fn room_ids(group: &FloorGroup) -> Vec<&str> {
        group.boards.iter().map(|b| b.room_id.as_str()).collect()
    }

    #[test]
    fn test_groups_sorted_by_floor() {
        let gallery = Gallery::build(&manifest(&["9", "205", "101"]));
        let floors: Vec<u32> = gallery.groups.iter().map(|g| g.floor).collect();
        assert_eq!(floors, vec![1, 2, 9]);
    }

    #[test]
    fn test_members_sorted_within_floor() {
        let gallery = Gallery::build(&manifest(&["102A", "101", "103"]));
        assert_eq!(gallery.groups.len(), 1);
        assert_eq!(room_ids(&gallery.groups[0]), vec!["101", "103", "102A"]);
    }

    #[test]
    fn test_rooms_without_floor_are_excluded() {
        let gallery = Gallery::build(&manifest(&["ABC", "Lobby", "101", "B1"]));
        assert_eq!(gallery.board_count(), 2);
        assert!(gallery.find("ABC").is_none());
        assert!(gallery.find("Lobby").is_none());
        for group in &gallery.groups {
            assert!(group.boards.iter().all(|b| b.floor == Some(group.floor)));
        }
    }

    #[test]
    fn test_mixed_floor_and_letters() {
        let gallery = Gallery::build(&manifest(&["B1", "101", "12B", "12A", "1", "10"]));
        assert_eq!(gallery.groups.len(), 1);
        assert_eq!(
            room_ids(&gallery.groups[0]),
            vec!["1", "10", "101", "B1", "12A", "12B"]
        );
    }

    #[test]
    fn test_punctuated_id_sorts_before_plain_twin() {
        let gallery = Gallery::build(&manifest(&["B1", "B-1"]));
        assert_eq!(gallery.groups.len(), 1);
        assert_eq!(room_ids(&gallery.groups[0]), vec!["B-1", "B1"]);
    }

    #[test]
    fn test_empty_manifest() {
        let gallery = Gallery::build(&Manifest::new());
        assert!(gallery.groups.is_empty());
        assert_eq!(gallery.board_count(), 0);
    }

    #[test]
    fn test_find_board() {
        let gallery = Gallery::build(&manifest(&["F30", "305"]));
        let board = gallery.find("F30").unwrap();
        assert_eq!(board.file, "F30.webp");
        assert_eq!(board.floor, Some(3));
    }
}
