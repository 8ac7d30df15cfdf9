//! Corridor layout of section banners and wall exhibits.
//!
//! A pure function of the section list: the same catalog always produces the
//! same placements, so the result is computed once per fetch and shared as a
//! read-only resource.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use constants::layout::{
    HALF_WIDTH, PAIR_GAP, SCREEN_Y, SECTION_GAP, SECTION_TRAILING_GAP, START_OFFSET,
    TRAILING_MARGIN, WALL_INSET,
};

use crate::engine::assets::item::Item;
use crate::engine::loading::catalog::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// -1 for the left wall, +1 for the right wall.
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Rotation turning a +Z facing quad towards the corridor centre.
    pub fn facing(&self) -> Quat {
        Quat::from_rotation_y(-self.sign() * FRAC_PI_2)
    }
}

/// Arch marking the start of a section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBanner {
    pub label: String,
    pub count: usize,
    pub z: f32,
}

/// An exhibit hung on one of the walls.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub item: Item,
    pub side: WallSide,
    pub position: Vec3,
    pub rotation: Quat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutItem {
    Section(SectionBanner),
    Placement(Placement),
}

impl LayoutItem {
    /// Position along the corridor axis.
    pub fn axis_position(&self) -> f32 {
        match self {
            Self::Section(banner) => banner.z,
            Self::Placement(placement) => placement.position.z,
        }
    }
}

/// Immutable placement list for the current catalog.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct MuseumLayout {
    pub items: Vec<LayoutItem>,
    pub corridor_length: f32,
}

impl MuseumLayout {
    pub fn placement(&self, index: usize) -> Option<&Placement> {
        match self.items.get(index)? {
            LayoutItem::Placement(placement) => Some(placement),
            LayoutItem::Section(_) => None,
        }
    }

    pub fn banner(&self, index: usize) -> Option<&SectionBanner> {
        match self.items.get(index)? {
            LayoutItem::Section(banner) => Some(banner),
            LayoutItem::Placement(_) => None,
        }
    }
}

/// Walk the sections with a cursor moving down -Z, emitting one banner per
/// section and left/right pairs of exhibits. A trailing odd item takes the
/// left wall alone.
pub fn layout(sections: &[Section]) -> MuseumLayout {
    let mut items = Vec::new();
    let mut z = START_OFFSET;

    for section in sections {
        items.push(LayoutItem::Section(SectionBanner {
            label: section.key.clone(),
            count: section.count(),
            z,
        }));
        z -= SECTION_GAP;

        for pair in section.items.chunks(2) {
            for (item, side) in pair.iter().zip([WallSide::Left, WallSide::Right]) {
                items.push(LayoutItem::Placement(Placement {
                    item: item.clone(),
                    side,
                    position: Vec3::new(side.sign() * (HALF_WIDTH - WALL_INSET), SCREEN_Y, z),
                    rotation: side.facing(),
                }));
            }
            z -= PAIR_GAP;
        }

        z -= SECTION_TRAILING_GAP;
    }

    MuseumLayout {
        items,
        corridor_length: z.abs() + TRAILING_MARGIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::item::{ItemDetails, Tier};

    fn item(key: &str) -> Item {
        Item {
            key: key.into(),
            tier: Tier::Common,
            section_key: "2024-25".into(),
            owned_count: 0,
            image_url: None,
            video_url: None,
            date_sort_value: "Z".into(),
            parallels: None,
            details: ItemDetails::default(),
        }
    }

    fn section(key: &str, count: usize) -> Section {
        Section {
            key: key.into(),
            items: (0..count).map(|i| item(&format!("{key}-{i}"))).collect(),
        }
    }

    fn placements(layout: &MuseumLayout) -> Vec<&Placement> {
        layout
            .items
            .iter()
            .filter_map(|entry| match entry {
                LayoutItem::Placement(p) => Some(p),
                LayoutItem::Section(_) => None,
            })
            .collect()
    }

    #[test]
    fn same_sections_produce_identical_layouts() {
        let sections = vec![section("2022-23", 5), section("2023-24", 2)];
        assert_eq!(layout(&sections), layout(&sections));
    }

    #[test]
    fn pairs_alternate_starting_left_and_odd_tail_is_left_only() {
        let result = layout(&[section("s", 5)]);
        let placed = placements(&result);

        let sides: Vec<WallSide> = placed.iter().map(|p| p.side).collect();
        assert_eq!(
            sides,
            vec![
                WallSide::Left,
                WallSide::Right,
                WallSide::Left,
                WallSide::Right,
                WallSide::Left
            ]
        );
        // Each pair shares its z, consecutive pairs are PAIR_GAP apart.
        assert_eq!(placed[0].position.z, placed[1].position.z);
        assert_eq!(placed[0].position.z - placed[2].position.z, PAIR_GAP);
        assert!(placed[0].position.x < 0.0 && placed[1].position.x > 0.0);
        assert!(placed[4].position.x < 0.0);
    }

    #[test]
    fn cursor_advances_by_the_documented_gaps() {
        let result = layout(&[section("a", 3), section("b", 1)]);

        let banners: Vec<&SectionBanner> = result
            .items
            .iter()
            .filter_map(|entry| match entry {
                LayoutItem::Section(b) => Some(b),
                LayoutItem::Placement(_) => None,
            })
            .collect();

        assert_eq!(banners[0].z, START_OFFSET);
        assert_eq!(banners[0].count, 3);
        // Two pairs for three items.
        let second_banner_z =
            START_OFFSET - SECTION_GAP - 2.0 * PAIR_GAP - SECTION_TRAILING_GAP;
        assert_eq!(banners[1].z, second_banner_z);

        let final_z = second_banner_z - SECTION_GAP - PAIR_GAP - SECTION_TRAILING_GAP;
        assert_eq!(result.corridor_length, final_z.abs() + TRAILING_MARGIN);
    }

    #[test]
    fn exhibits_face_the_corridor_centre() {
        let result = layout(&[section("s", 2)]);
        let placed = placements(&result);
        let left_normal = placed[0].rotation * Vec3::Z;
        let right_normal = placed[1].rotation * Vec3::Z;
        assert!(left_normal.x > 0.99);
        assert!(right_normal.x < -0.99);
    }

    #[test]
    fn empty_catalog_still_has_a_corridor() {
        let result = layout(&[]);
        assert!(result.items.is_empty());
        assert_eq!(result.corridor_length, START_OFFSET.abs() + TRAILING_MARGIN);
    }
}
