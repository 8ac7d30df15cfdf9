use bevy::prelude::*;

use crate::engine::loading::catalog::Catalog;
use crate::engine::loading::item_loader::CatalogState;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::systems::hud::can_enter;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States, Resource)]
pub enum AppState {
    /// Settings, corridor textures and the first catalog request.
    #[default]
    Loading,
    /// Title card with catalog totals, waiting for the visitor to enter.
    Entrance,
    /// First-person walkthrough.
    Walking,
}

/// Request to enter or leave the walkthrough from outside the input systems.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuseumCommand {
    Enter,
    Exit,
}

pub fn transition_to_entrance(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.is_complete() {
        println!("→ Transitioning to Entrance state");
        next_state.set(AppState::Entrance);
    }
}

/// Apply enter/exit commands that are valid for the current state. Entering
/// needs the same catalog the entrance card asks for.
pub fn apply_museum_commands(
    mut commands: EventReader<MuseumCommand>,
    state: Res<State<AppState>>,
    catalog: Res<Catalog>,
    catalog_state: Res<CatalogState>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for command in commands.read() {
        match (command, state.get()) {
            (MuseumCommand::Enter, AppState::Entrance) if !can_enter(&catalog, &catalog_state) => {
                info!("Enter requested before the catalog is available");
            }
            (MuseumCommand::Enter, AppState::Entrance) => {
                println!("→ Transitioning to Walking state");
                next_state.set(AppState::Walking);
            }
            (MuseumCommand::Exit, AppState::Walking) => {
                println!("→ Transitioning to Entrance state");
                next_state.set(AppState::Entrance);
            }
            (command, current) => {
                debug!("Ignoring {:?} while in {:?}", command, current);
            }
        }
    }
}

/// Report loading milestones to the host page as they change.
pub fn update_loading_frontend(
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !loading_progress.is_changed() {
        return;
    }
    let stages: Vec<_> = loading_progress
        .stages()
        .iter()
        .map(|(name, done)| serde_json::json!({ "name": name, "done": done }))
        .collect();

    rpc_interface.send_notification(
        "loading_progress",
        serde_json::json!({
            "progress": loading_progress.fraction(),
            "stages": stages,
        }),
    );
}

#[cfg(test)]
mod tests {
    use bevy::state::app::StatesPlugin;

    use super::*;
    use crate::engine::loading::item_loader::CatalogStatus;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .insert_state(AppState::Entrance)
            .init_resource::<Catalog>()
            .init_resource::<CatalogState>()
            .add_event::<MuseumCommand>()
            .add_systems(Update, apply_museum_commands);
        app
    }

    fn send(app: &mut App, command: MuseumCommand) {
        app.world_mut().send_event(command);
        // One frame to request the transition, one to apply it.
        app.update();
        app.update();
    }

    fn current(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn enter_waits_for_catalog() {
        let mut app = app();
        app.world_mut().resource_mut::<CatalogState>().status = CatalogStatus::Loading;
        send(&mut app, MuseumCommand::Enter);
        assert_eq!(current(&app), AppState::Entrance);

        app.world_mut().resource_mut::<CatalogState>().status = CatalogStatus::Ready;
        send(&mut app, MuseumCommand::Enter);
        assert_eq!(current(&app), AppState::Walking);
    }

    #[test]
    fn failed_first_fetch_blocks_enter() {
        let mut app = app();
        app.world_mut().resource_mut::<CatalogState>().status =
            CatalogStatus::Failed("offline".into());
        send(&mut app, MuseumCommand::Enter);
        assert_eq!(current(&app), AppState::Entrance);
    }

    #[test]
    fn exit_only_applies_while_walking() {
        let mut app = app();
        send(&mut app, MuseumCommand::Exit);
        assert_eq!(current(&app), AppState::Entrance);

        app.world_mut().resource_mut::<CatalogState>().status = CatalogStatus::Ready;
        send(&mut app, MuseumCommand::Enter);
        send(&mut app, MuseumCommand::Exit);
        assert_eq!(current(&app), AppState::Entrance);
    }
}
