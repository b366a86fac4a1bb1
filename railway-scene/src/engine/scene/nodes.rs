use bevy::platform::collections::HashMap;
use bevy::prelude::*;

/// Named scene nodes that other systems need to find again after assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SceneNode {
    Train,
    TrainHeadlight,
    TrainHeadlightBulb,
    CabinCamera,
    CabinLookAt,
    FrontCamera,
    ChaseCamera,
    OverviewCamera,
    OverviewTarget,
    BridgeCamera,
    BridgeTarget,
    TunnelCamera,
    TunnelTarget,
    WalkerStart,
    WalkerTarget,
    LakeCamera,
    LakeTarget,
    Water,
    Sun,
}

/// Lookup from [`SceneNode`] names to spawned entities.
#[derive(Resource, Default, Debug)]
pub struct NodeRegistry {
    nodes: HashMap<SceneNode, Entity>,
}

impl NodeRegistry {
    /// Record `entity` under `name`, returning the entity it replaced.
    pub fn insert(&mut self, name: SceneNode, entity: Entity) -> Option<Entity> {
        let previous = self.nodes.insert(name, entity);
        if previous.is_some() {
            warn!("Scene node {:?} re-registered", name);
        }
        previous
    }

    pub fn get(&self, name: SceneNode) -> Option<Entity> {
        self.nodes.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Spawn `bundle` and register it under `name`.
pub fn spawn_named(
    commands: &mut Commands,
    registry: &mut NodeRegistry,
    name: SceneNode,
    bundle: impl Bundle,
) -> Entity {
    let entity = commands.spawn((bundle, Name::new(format!("{name:?}")))).id();
    registry.insert(name, entity);
    entity
}

/// Spawn an invisible marker node under `parent`, used as a camera anchor or target.
pub fn spawn_marker(
    commands: &mut Commands,
    registry: &mut NodeRegistry,
    name: SceneNode,
    parent: Option<Entity>,
    translation: Vec3,
) -> Entity {
    let entity = spawn_named(
        commands,
        registry,
        name,
        (Transform::from_translation(translation), Visibility::default()),
    );
    if let Some(parent) = parent {
        commands.entity(parent).add_child(entity);
    }
    entity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_and_overwrites_names() {
        let mut world = World::new();
        let first = world.spawn_empty().id();
        let second = world.spawn_empty().id();

        let mut registry = NodeRegistry::default();
        assert_eq!(registry.insert(SceneNode::Train, first), None);
        assert_eq!(registry.get(SceneNode::Train), Some(first));
        assert_eq!(registry.insert(SceneNode::Train, second), Some(first));
        assert_eq!(registry.get(SceneNode::Train), Some(second));
        assert_eq!(registry.get(SceneNode::Water), None);
        assert_eq!(registry.len(), 1);
    }
}
