//! Screen-space overlays: entrance card, crosshair, pause overlay, section
//! label and the plaque panel of the nearest exhibit.

use bevy::prelude::*;
use constants::render_settings::ACCENT_GOLD;

use crate::engine::assets::item::Item;
use crate::engine::camera::navigation::{CameraState, NavigationController, NavigationMode};
use crate::engine::camera::orientation::LookSource;
use crate::engine::core::app_state::AppState;
use crate::engine::core::session::WalletSession;
use crate::engine::layout::{MuseumLayout, SectionBanner};
use crate::engine::loading::catalog::Catalog;
use crate::engine::loading::item_loader::{CatalogState, CatalogStatus};
use crate::engine::proximity::loader::ProximityLoader;

#[derive(Component)]
pub struct EntranceScreen;

#[derive(Component)]
pub struct EntranceStatus;

#[derive(Component)]
pub struct WalkingHud;

#[derive(Component)]
pub struct Crosshair;

#[derive(Component)]
pub struct PauseOverlay;

#[derive(Component)]
pub struct SectionLabel;

#[derive(Component)]
pub struct PlaquePanel;

#[derive(Component)]
pub struct PlaqueText;

const PANEL_BACKGROUND: Color = Color::srgba(0.03, 0.03, 0.07, 0.85);

/// Entering needs something to show: a fresh catalog, or the one kept from
/// before a failed refetch.
pub fn can_enter(catalog: &Catalog, state: &CatalogState) -> bool {
    state.status == CatalogStatus::Ready || !catalog.is_empty()
}

/// Status lines under the entrance title.
pub fn entrance_lines(catalog: &Catalog, state: &CatalogState, wallet_connected: bool) -> Vec<String> {
    let mut lines = Vec::new();

    match &state.status {
        CatalogStatus::Idle | CatalogStatus::Loading if catalog.is_empty() => {
            lines.push("Loading moments…".to_owned());
            return lines;
        }
        CatalogStatus::Failed(message) => lines.push(message.clone()),
        _ => {}
    }

    if catalog.is_empty() && state.status != CatalogStatus::Ready {
        return lines;
    }

    lines.push(format!(
        "{} unique moments across {} seasons",
        catalog.item_count(),
        catalog.sections.len()
    ));
    if wallet_connected {
        if state.ownership_loaded() {
            lines.push(format!("You own {} moments", catalog.owned_count()));
        } else if state.status == CatalogStatus::Loading {
            lines.push("Checking collection…".to_owned());
        }
    }
    lines.push("Press Enter or click to enter".to_owned());
    lines
}

pub fn controls_help(touch: bool) -> &'static str {
    if touch {
        "Left thumb: move · Right thumb: look around"
    } else {
        "WASD move · Mouse look around · ESC pause"
    }
}

/// `2024-03-14T00:00:00Z` becomes `Mar 14, 2024`.
pub fn format_moment_date(iso: &str) -> Option<String> {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let date = iso.get(..10)?;
    let mut parts = date.split('-');
    let year: u32 = parts.next()?.parse().ok()?;
    let month: usize = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let name = MONTHS.get(month.checked_sub(1)?)?;
    Some(format!("{name} {day}, {year}"))
}

/// Plaque text for one exhibit, top to bottom.
pub fn plaque_lines(item: &Item) -> Vec<String> {
    let details = &item.details;
    let mut lines = Vec::new();

    match &details.play_category {
        Some(category) => lines.push(format!("{} · {}", item.tier.code(), category)),
        None => lines.push(item.tier.code().to_owned()),
    }
    if let Some(set_name) = &details.set_name {
        lines.push(set_name.clone());
    }
    if let Some(short) = &details.short_description {
        lines.push(short.clone());
    }
    if let Some(date) = details.date_of_moment.as_deref().and_then(format_moment_date) {
        match &details.team_at_moment {
            Some(team) => lines.push(format!("{date} • {team}")),
            None => lines.push(date),
        }
    }

    let stats = &details.game_stats;
    if !stats.is_empty() {
        let line = [(stats.points, "PTS"), (stats.rebounds, "REB"), (stats.assists, "AST")]
            .iter()
            .filter_map(|(value, label)| value.map(|v| format!("{v} {label}")))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line);
    }

    let mut ownership = if item.is_owned() {
        format!("✓ You own {}", item.owned_count)
    } else {
        "✗ Not in your collection".to_owned()
    };
    if let Some(minted) = details.circulation_count {
        ownership.push_str(&format!("  #{minted} minted"));
    }
    lines.push(ownership);

    if let Some(parallels) = &item.parallels {
        let badges = parallels
            .iter()
            .map(|p| {
                if p.owned {
                    format!("{} ✓", p.tier.code())
                } else {
                    p.tier.code().to_owned()
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(badges);
    }

    if let Some(description) = &details.description {
        lines.push(description.clone());
    }
    if details.retired {
        lines.push("RETIRED".to_owned());
    }
    lines
}

pub fn section_caption(banner: &SectionBanner) -> String {
    format!("{} · {} moments", banner.label, banner.count)
}

/// Mounted banner closest to the camera along the corridor.
pub fn nearest_banner(
    layout: &MuseumLayout,
    mounted: impl Iterator<Item = usize>,
    camera_z: f32,
) -> Option<&SectionBanner> {
    mounted
        .filter_map(|index| layout.banner(index))
        .min_by(|a, b| (a.z - camera_z).abs().total_cmp(&(b.z - camera_z).abs()))
}

fn text_line(text: impl Into<String>, size: f32, colour: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(colour),
    )
}

pub fn spawn_entrance_screen(mut commands: Commands, look: Res<LookSource>) {
    commands
        .spawn((
            EntranceScreen,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(14.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.031, 0.031, 0.071)),
        ))
        .with_children(|parent| {
            parent.spawn(text_line("THE JOKIĆ MUSEUM", 42.0, ACCENT_GOLD));
            parent.spawn(text_line(
                "A first-person walk through every Nikola Jokić NBA TopShot moment",
                16.0,
                Color::srgb(0.75, 0.75, 0.85),
            ));
            parent.spawn((
                EntranceStatus,
                text_line("Loading moments…", 18.0, Color::WHITE),
                TextLayout::new_with_justify(JustifyText::Center),
            ));
            parent.spawn(text_line(
                controls_help(look.is_touch()),
                14.0,
                Color::srgb(0.6, 0.6, 0.7),
            ));
        });
}

pub fn update_entrance_status(
    catalog: Res<Catalog>,
    state: Res<CatalogState>,
    session: Res<WalletSession>,
    mut status: Query<&mut Text, With<EntranceStatus>>,
) {
    let text = entrance_lines(&catalog, &state, session.wallet().is_some()).join("\n");
    for mut line in &mut status {
        if line.0 != text {
            line.0.clone_from(&text);
        }
    }
}

/// Enter on keypress, click or tap once there is something to show.
pub fn enter_on_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    catalog: Res<Catalog>,
    state: Res<CatalogState>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let pressed = keys.just_pressed(KeyCode::Enter)
        || keys.just_pressed(KeyCode::Space)
        || mouse.just_pressed(MouseButton::Left)
        || touches.any_just_pressed();
    if pressed && can_enter(&catalog, &state) {
        next_state.set(AppState::Walking);
    }
}

pub fn spawn_walking_hud(mut commands: Commands) {
    commands
        .spawn((
            WalkingHud,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                Crosshair,
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Percent(50.0),
                    top: Val::Percent(50.0),
                    width: Val::Px(6.0),
                    height: Val::Px(6.0),
                    margin: UiRect::all(Val::Px(-3.0)),
                    ..default()
                },
                BorderRadius::MAX,
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.7)),
                Visibility::Hidden,
            ));

            parent
                .spawn((
                    PauseOverlay,
                    Node {
                        position_type: PositionType::Absolute,
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        row_gap: Val::Px(10.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.45)),
                    Visibility::Hidden,
                ))
                .with_children(|overlay| {
                    overlay.spawn(text_line("Click to look around", 26.0, Color::WHITE));
                    overlay.spawn(text_line(
                        "WASD to move · Mouse to look · ESC to pause",
                        15.0,
                        Color::srgb(0.75, 0.75, 0.85),
                    ));
                    overlay.spawn(text_line("Backspace: exit museum", 15.0, ACCENT_GOLD));
                });

            parent.spawn((
                SectionLabel,
                text_line("", 18.0, ACCENT_GOLD),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(16.0),
                    ..default()
                },
            ));

            parent
                .spawn((
                    PlaquePanel,
                    Node {
                        position_type: PositionType::Absolute,
                        bottom: Val::Px(24.0),
                        left: Val::Percent(50.0),
                        width: Val::Px(420.0),
                        margin: UiRect::left(Val::Px(-210.0)),
                        padding: UiRect::all(Val::Px(12.0)),
                        border: UiRect::left(Val::Px(4.0)),
                        ..default()
                    },
                    BackgroundColor(PANEL_BACKGROUND),
                    BorderColor(ACCENT_GOLD),
                    BorderRadius::all(Val::Px(6.0)),
                    Visibility::Hidden,
                ))
                .with_children(|panel| {
                    panel.spawn((PlaqueText, text_line("", 14.0, Color::WHITE)));
                });
        });
}

/// Crosshair while looking around, pause overlay while the pointer is free.
/// Touch devices never show either.
pub fn update_pointer_hud(
    controller: Res<NavigationController>,
    look: Res<LookSource>,
    mut crosshair: Query<&mut Visibility, (With<Crosshair>, Without<PauseOverlay>)>,
    mut overlay: Query<&mut Visibility, (With<PauseOverlay>, Without<Crosshair>)>,
) {
    let touch = look.is_touch();
    let active = controller.mode == NavigationMode::Active;
    let shown = |on: bool| if on { Visibility::Inherited } else { Visibility::Hidden };

    if let Ok(mut visibility) = crosshair.single_mut() {
        visibility.set_if_neq(shown(!touch && active));
    }
    if let Ok(mut visibility) = overlay.single_mut() {
        visibility.set_if_neq(shown(!touch && !active));
    }
}

pub fn update_section_label(
    loader: Res<ProximityLoader>,
    layout: Res<MuseumLayout>,
    camera: Res<CameraState>,
    mut label: Query<&mut Text, With<SectionLabel>>,
) {
    let caption = nearest_banner(&layout, loader.mounted(), camera.position.z)
        .map(section_caption)
        .unwrap_or_default();
    if let Ok(mut text) = label.single_mut() {
        if text.0 != caption {
            text.0 = caption;
        }
    }
}

pub fn update_plaque_panel(
    loader: Res<ProximityLoader>,
    layout: Res<MuseumLayout>,
    mut panel: Query<(&mut Visibility, &mut BorderColor), With<PlaquePanel>>,
    mut text: Query<&mut Text, With<PlaqueText>>,
) {
    let item = loader
        .nearest_plaque()
        .and_then(|(_, slot)| layout.placement(slot.layout_index))
        .map(|placement| &placement.item);

    let Ok((mut visibility, mut border)) = panel.single_mut() else {
        return;
    };
    match item {
        Some(item) => {
            visibility.set_if_neq(Visibility::Inherited);
            let colour = item.tier.colour();
            if border.0 != colour {
                border.0 = colour;
            }
            let content = plaque_lines(item).join("\n");
            if let Ok(mut text) = text.single_mut() {
                if text.0 != content {
                    text.0 = content;
                }
            }
        }
        None => {
            visibility.set_if_neq(Visibility::Hidden);
        }
    }
}

/// Despawn every entity carrying `C`, used on state exit.
pub fn despawn_all<C: Component>(mut commands: Commands, query: Query<Entity, With<C>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::item::{GameStats, ItemDetails, Parallel, Tier};
    use crate::engine::loading::catalog::Section;

    fn item(owned: u32) -> Item {
        Item {
            key: "play-1".into(),
            tier: Tier::Legendary,
            section_key: "2023-24".into(),
            owned_count: owned,
            image_url: None,
            video_url: None,
            date_sort_value: "2024-03-14T00:00:00Z".into(),
            parallels: None,
            details: ItemDetails {
                set_name: Some("Metallic Gold LE".into()),
                play_category: Some("Assist".into()),
                date_of_moment: Some("2024-03-14T00:00:00Z".into()),
                team_at_moment: Some("Denver Nuggets".into()),
                game_stats: GameStats {
                    points: Some(31),
                    rebounds: Some(12),
                    assists: None,
                },
                circulation_count: Some(99),
                ..Default::default()
            },
        }
    }

    fn catalog(items: Vec<Item>) -> Catalog {
        Catalog {
            sections: vec![Section {
                key: "2023-24".into(),
                items,
            }],
            label: None,
        }
    }

    #[test]
    fn dates_render_month_day_year() {
        assert_eq!(format_moment_date("2024-03-14T00:00:00Z").as_deref(), Some("Mar 14, 2024"));
        assert_eq!(format_moment_date("2019-12-01").as_deref(), Some("Dec 1, 2019"));
        assert_eq!(format_moment_date("2019-13-01"), None);
        assert_eq!(format_moment_date("Z"), None);
    }

    #[test]
    fn plaque_lists_details_in_order() {
        let lines = plaque_lines(&item(2));
        assert_eq!(
            lines,
            vec![
                "LEGENDARY · Assist",
                "Metallic Gold LE",
                "Mar 14, 2024 • Denver Nuggets",
                "31 PTS  12 REB",
                "✓ You own 2  #99 minted",
            ]
        );
    }

    #[test]
    fn plaque_shows_parallels_and_missing_ownership() {
        let mut unowned = item(0);
        unowned.parallels = Some(vec![
            Parallel {
                tier: Tier::Legendary,
                set_name: None,
                owned: false,
            },
            Parallel {
                tier: Tier::Rare,
                set_name: None,
                owned: true,
            },
        ]);
        unowned.details.retired = true;
        let lines = plaque_lines(&unowned);
        assert!(lines.contains(&"✗ Not in your collection  #99 minted".to_owned()));
        assert!(lines.contains(&"LEGENDARY  RARE ✓".to_owned()));
        assert_eq!(lines.last().map(String::as_str), Some("RETIRED"));
    }

    #[test]
    fn entrance_waits_for_first_catalog() {
        let state = CatalogState {
            status: CatalogStatus::Loading,
            wallet: None,
        };
        let empty = Catalog::default();
        assert_eq!(entrance_lines(&empty, &state, false), vec!["Loading moments…"]);
        assert!(!can_enter(&empty, &state));
    }

    #[test]
    fn entrance_shows_totals_and_ownership() {
        let state = CatalogState {
            status: CatalogStatus::Ready,
            wallet: Some("0x1".into()),
        };
        let catalog = catalog(vec![item(1), item(0)]);
        let lines = entrance_lines(&catalog, &state, true);
        assert_eq!(lines[0], "2 unique moments across 1 seasons");
        assert_eq!(lines[1], "You own 1 moments");
        assert!(can_enter(&catalog, &state));
    }

    #[test]
    fn failed_refetch_keeps_previous_catalog_enterable() {
        let state = CatalogState {
            status: CatalogStatus::Failed("offline".into()),
            wallet: None,
        };
        let catalog = catalog(vec![item(0)]);
        let lines = entrance_lines(&catalog, &state, false);
        assert_eq!(lines[0], "offline");
        assert!(can_enter(&catalog, &state));

        let empty = Catalog::default();
        assert_eq!(entrance_lines(&empty, &state, false), vec!["offline"]);
        assert!(!can_enter(&empty, &state));
    }

    #[test]
    fn nearest_banner_uses_mounted_banners_only() {
        let layout = MuseumLayout {
            items: vec![
                crate::engine::layout::LayoutItem::Section(SectionBanner {
                    label: "2021-22".into(),
                    count: 4,
                    z: -10.0,
                }),
                crate::engine::layout::LayoutItem::Section(SectionBanner {
                    label: "2022-23".into(),
                    count: 2,
                    z: -40.0,
                }),
            ],
            corridor_length: 60.0,
        };
        let banner = nearest_banner(&layout, [0, 1].into_iter(), -35.0);
        assert_eq!(banner.map(|b| b.label.as_str()), Some("2022-23"));
        let banner = nearest_banner(&layout, [0].into_iter(), -35.0);
        assert_eq!(banner.map(section_caption).as_deref(), Some("2021-22 · 4 moments"));
        assert!(nearest_banner(&layout, std::iter::empty(), 0.0).is_none());
    }
}
