use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::transform::TransformSystem;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::camera::input::{RigInput, gather_rig_input};
use crate::engine::camera::systems::{spawn_rig_camera, sync_camera_selection, update_camera_rig};
use crate::engine::camera::CameraControllers;
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config_loader::{ConfigLoader, load_config_system, start_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::assembly::assemble_scene;
use crate::engine::scene::lighting::{advance_day_cycle, update_sun};
use crate::engine::scene::structures::sync_lamp_lights;
use crate::engine::scene::water::sync_water_level;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::track::systems::build_track;
use crate::engine::train::systems::{drive_train, sync_train_light, sync_train_speed};
// Controls and Web RPC
use crate::controls::{ControlEvent, apply_control_events, keyboard_shortcuts};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers SceneConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SceneConfig>::new(&["json"]))
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ConfigLoader>()
        .init_resource::<RigInput>()
        .init_resource::<CameraControllers>()
        .add_event::<ControlEvent>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, build_track, start_loading).chain())
        .add_systems(
            Update,
            (load_config_system, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Running), assemble_scene);

    // Input first, then the panel, then everything that reads it.
    let runtime_systems = (
        gather_rig_input,
        keyboard_shortcuts,
        apply_control_events,
        sync_train_speed,
        drive_train,
        sync_train_light,
        sync_lamp_lights,
        sync_water_level,
        advance_day_cycle,
        update_sun,
        fps_notification_system,
    )
        .chain();

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));

    // Camera follows anchors after their global transforms are propagated.
    app.add_systems(
        PostUpdate,
        (sync_camera_selection, update_camera_rig)
            .chain()
            .after(TransformSystem::TransformPropagate)
            .run_if(in_state(AppState::Running)),
    );

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_rig_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
