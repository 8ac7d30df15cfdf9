use std::collections::HashMap;

use bevy::prelude::*;

use crate::engine::assets::item::{Item, ItemDetails, ItemFeed, Parallel, RawEdition};

/// Sort value for items with neither a date nor a parseable season label.
pub const MISSING_DATE_SENTINEL: &str = "Z";

/// Section key for items without a season label.
pub const UNKNOWN_SECTION: &str = "Unknown";

/// Ordered group of items sharing a section key.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub key: String,
    pub items: Vec<Item>,
}

impl Section {
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

/// Deduplicated, chronologically sorted and grouped catalog for one fetch.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub sections: Vec<Section>,
    pub label: Option<String>,
}

impl Catalog {
    pub fn from_feed(feed: ItemFeed) -> Self {
        let mut items = dedupe(feed.editions);
        sort_chronologically(&mut items);
        Self {
            sections: group_sections(items),
            label: feed.section_label,
        }
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(Section::count).sum()
    }

    pub fn owned_count(&self) -> usize {
        self.items().filter(|item| item.is_owned()).count()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.sections.iter().flat_map(|section| section.items.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Collapse records sharing a key into one representative item.
///
/// The highest-tier record represents the group (the first seen wins ties),
/// owned counts are summed across the group and, when the group has more than
/// one member, every member is listed in `parallels` in input order.
/// Groups keep the order in which their key was first seen.
pub fn dedupe(editions: Vec<RawEdition>) -> Vec<Item> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<RawEdition>> = Vec::new();

    for edition in editions {
        let Some(key) = edition.key().map(str::to_owned) else {
            debug!("Skipping edition without id or play id");
            continue;
        };
        match index.get(&key) {
            Some(&slot) => groups[slot].push(edition),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![edition]);
            }
        }
    }

    groups.into_iter().filter_map(merge_group).collect()
}

fn merge_group(group: Vec<RawEdition>) -> Option<Item> {
    let mut primary = group.first()?;
    for edition in &group[1..] {
        if edition.tier.rank() > primary.tier.rank() {
            primary = edition;
        }
    }

    let owned_count = group.iter().map(RawEdition::owned).sum();
    let parallels = (group.len() > 1).then(|| {
        group
            .iter()
            .map(|edition| Parallel {
                tier: edition.tier,
                set_name: edition.set_name.clone(),
                owned: edition.owned() > 0,
            })
            .collect()
    });

    Some(Item {
        key: primary.key()?.to_owned(),
        tier: primary.tier,
        section_key: primary
            .nba_season
            .clone()
            .filter(|season| !season.is_empty())
            .unwrap_or_else(|| UNKNOWN_SECTION.to_owned()),
        owned_count,
        image_url: primary.image_url.clone(),
        video_url: primary.video_url.clone(),
        date_sort_value: date_sort_value(
            primary.date_of_moment.as_deref(),
            primary.nba_season.as_deref(),
        ),
        parallels,
        details: ItemDetails {
            set_name: primary.set_name.clone(),
            play_category: primary.play_category.clone(),
            short_description: primary.short_description.clone(),
            description: primary.description.clone(),
            date_of_moment: primary.date_of_moment.clone(),
            team_at_moment: primary.team_at_moment.clone(),
            game_stats: primary.game_stats.clone().unwrap_or_default(),
            circulation_count: primary.circulation_count,
            retired: primary.retired,
        },
    })
}

/// Sortable string for an item.
///
/// An explicit ISO date is used as-is. Otherwise a season label such as
/// `2024-25` maps to October 1st of its closing year, which sorts after every
/// dated moment of that season and before the next season's games. Anything
/// else gets the terminal sentinel.
pub fn date_sort_value(date: Option<&str>, season: Option<&str>) -> String {
    if let Some(date) = date.filter(|d| !d.is_empty()) {
        return date.to_owned();
    }
    season
        .and_then(season_end_year)
        .map(|year| format!("{year:04}-10-01T00:00:00Z"))
        .unwrap_or_else(|| MISSING_DATE_SENTINEL.to_owned())
}

/// Find the first `dddd-dd` run in a season label and expand the two-digit
/// closing year (`< 50` is the 2000s).
fn season_end_year(season: &str) -> Option<u32> {
    let bytes = season.as_bytes();
    bytes.windows(7).find_map(|window| {
        let shape_matches = window[..4].iter().all(u8::is_ascii_digit)
            && window[4] == b'-'
            && window[5..].iter().all(u8::is_ascii_digit);
        if !shape_matches {
            return None;
        }
        let short = u32::from(window[5] - b'0') * 10 + u32::from(window[6] - b'0');
        Some(if short < 50 { 2000 + short } else { 1900 + short })
    })
}

/// Stable ascending sort on `date_sort_value`.
pub fn sort_chronologically(items: &mut [Item]) {
    items.sort_by(|a, b| a.date_sort_value.cmp(&b.date_sort_value));
}

/// Group consecutive items sharing a section key.
pub fn group_sections(items: Vec<Item>) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    for item in items {
        match sections.last_mut() {
            Some(section) if section.key == item.section_key => section.items.push(item),
            _ => sections.push(Section {
                key: item.section_key.clone(),
                items: vec![item],
            }),
        }
    }
    sections
}
