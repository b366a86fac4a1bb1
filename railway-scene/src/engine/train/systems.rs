use bevy::prelude::*;

use super::kinematics::TrainKinematics;
use super::model::{Headlight, HeadlightBulb, Train};
use super::secondary_motion::SecondaryMotion;
use crate::controls::ControlPanel;
use crate::engine::scene::lighting::LightMaterials;
use crate::engine::track::CurvePath;

/// Copy the panel speed into the kinematics; the new speed applies from the next step.
pub fn sync_train_speed(panel: Res<ControlPanel>, mut kinematics: ResMut<TrainKinematics>) {
    if panel.is_changed() && kinematics.speed != panel.train_speed {
        debug!("Train speed {} -> {}", kinematics.speed, panel.train_speed);
        kinematics.speed = panel.train_speed;
    }
}

/// Advance the train by the real time elapsed since the previous frame.
pub fn drive_train(
    time: Res<Time<Real>>,
    path: Res<CurvePath>,
    mut kinematics: ResMut<TrainKinematics>,
    mut train: Query<&mut Transform, With<Train>>,
    mut parts: Query<(&SecondaryMotion, &mut Transform), Without<Train>>,
) -> Result {
    let delta = kinematics.advance_to(time.elapsed_secs_f64());
    let mut transform = train.single_mut()?;
    *transform = kinematics.pose(&path).transform();

    for (motion, mut part) in &mut parts {
        motion.apply(&mut part, delta);
    }
    Ok(())
}

pub fn sync_train_light(
    panel: Res<ControlPanel>,
    light_materials: Res<LightMaterials>,
    mut headlights: Query<&mut Visibility, With<Headlight>>,
    mut bulbs: Query<&mut MeshMaterial3d<StandardMaterial>, With<HeadlightBulb>>,
) {
    if !panel.is_changed() {
        return;
    }
    let visibility = if panel.train_light { Visibility::Inherited } else { Visibility::Hidden };
    for mut headlight in &mut headlights {
        headlight.set_if_neq(visibility);
    }
    let material = light_materials.for_state(panel.train_light);
    for mut bulb in &mut bulbs {
        if bulb.0 != material {
            bulb.0 = material.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::ControlEvent;
    use crate::engine::assets::scene_config::SceneConfig;
    use bevy::ecs::system::RunSystemOnce;

    fn world_with_panel() -> World {
        let mut world = World::new();
        let mut panel = ControlPanel::from_config(&SceneConfig::default());
        panel.apply(ControlEvent::SetTrainLight(false));
        world.insert_resource(panel);
        world
    }

    #[test]
    fn speed_follows_the_panel_without_moving_the_train() {
        let mut world = world_with_panel();
        world.insert_resource(TrainKinematics::new(0.0, 0.0, 60.0));
        world
            .resource_mut::<ControlPanel>()
            .apply(ControlEvent::SetTrainSpeed(-35.0));
        world.run_system_once(sync_train_speed).unwrap();

        let kinematics = world.resource::<TrainKinematics>();
        assert_eq!(kinematics.speed, -35.0);
        assert_eq!(kinematics.distance_traveled(), 0.0);
    }

    #[test]
    fn headlight_and_bulb_follow_the_switch() {
        let mut world = world_with_panel();
        let mut materials = Assets::<StandardMaterial>::default();
        let light_materials = LightMaterials::new(&mut materials);
        world.insert_resource(light_materials.clone());

        let light = world.spawn((Visibility::Hidden, Headlight)).id();
        let bulb = world
            .spawn((MeshMaterial3d(light_materials.off.clone()), HeadlightBulb))
            .id();

        world
            .resource_mut::<ControlPanel>()
            .apply(ControlEvent::ToggleTrainLight);
        world.run_system_once(sync_train_light).unwrap();

        assert_eq!(world.get::<Visibility>(light), Some(&Visibility::Inherited));
        assert_eq!(
            world.get::<MeshMaterial3d<StandardMaterial>>(bulb).map(|m| m.0.clone()),
            Some(light_materials.on.clone())
        );
    }
}
