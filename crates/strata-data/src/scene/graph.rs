// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The scene arena.

use super::components::{LightComponent, SceneComponent, StaticMeshComponent};
use super::definition::{NodeDefinition, SceneDefinition, SCENE_SCHEMA_VERSION};
use super::node::{NodeId, SceneNode};
use std::collections::VecDeque;
use strata_core::{asset::AssetUUID, renderer::MeshStreamingContext};
use thiserror::Error;

/// Errors raised by scene graph edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// The id refers to no live node.
    #[error("scene node {0} does not exist")]
    NodeNotFound(NodeId),
    /// The root node cannot be removed or re-parented.
    #[error("the root node cannot be removed or re-parented")]
    RootImmutable,
    /// The edit would make a node its own ancestor.
    #[error("re-parenting {node} under {parent} would create a cycle")]
    Cycle {
        /// The node being moved.
        node: NodeId,
        /// The requested parent.
        parent: NodeId,
    },
    /// The definition was written with an unknown schema.
    #[error("unsupported scene schema version {0}")]
    UnsupportedSchema(u32),
    /// A node definition references a missing or later parent.
    #[error("node definition {node} has invalid parent {parent:?}")]
    InvalidParent {
        /// Index of the node definition.
        node: usize,
        /// Its parent field.
        parent: Option<u32>,
    },
}

struct NodeSlot {
    generation: u32,
    node: Option<SceneNode>,
}

/// A scene graph: an arena of nodes addressed by generational [`NodeId`]s.
///
/// The scene always has a root node. Parent and child links are ids. The
/// scene also owns the streaming context its static meshes are wired to, and
/// a dirty flag raised by edits that change persisted state.
pub struct Scene {
    slots: Vec<NodeSlot>,
    free: Vec<u32>,
    root: NodeId,
    dirty: bool,
    context: MeshStreamingContext,
}

impl Scene {
    /// Creates a scene holding only a root node.
    pub fn new(context: MeshStreamingContext) -> Self {
        let root = NodeId {
            index: 0,
            generation: 0,
        };
        Self {
            slots: vec![NodeSlot {
                generation: 0,
                node: Some(SceneNode::new("Root".to_owned(), None)),
            }],
            free: Vec::new(),
            root,
            dirty: false,
            context,
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The streaming context given to static meshes.
    pub fn context(&self) -> &MeshStreamingContext {
        &self.context
    }

    /// Returns `true` if persisted state changed since the last save or load.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Sets the dirty flag.
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    /// Always `false`: the root cannot be removed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Returns the node for `id`.
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Returns the node for `id`, mutably.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn require_mut(&mut self, id: NodeId) -> Result<&mut SceneNode, SceneError> {
        self.node_mut(id).ok_or(SceneError::NodeNotFound(id))
    }

    /// Creates a node under `parent`.
    pub fn create_node(
        &mut self,
        name: impl Into<String>,
        parent: NodeId,
    ) -> Result<NodeId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        let node = SceneNode::new(name.into(), Some(parent));
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.generation = slot.generation.wrapping_add(1);
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(NodeSlot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        };
        self.require_mut(parent)?.children.push(id);
        self.dirty = true;
        Ok(id)
    }

    /// Removes `id` and its whole subtree.
    ///
    /// Static meshes of removed nodes are dropped, each sending its shrink hint.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootImmutable);
        }
        let parent = self.node(id).ok_or(SceneError::NodeNotFound(id))?.parent;
        if let Some(parent) = parent.and_then(|parent| self.node_mut(parent)) {
            parent.children.retain(|child| *child != id);
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.index as usize];
            if let Some(node) = slot.node.take() {
                stack.extend_from_slice(&node.children);
                self.free.push(current.index);
            }
        }
        self.dirty = true;
        Ok(())
    }

    /// Moves `id` under `new_parent`, keeping its local transform.
    pub fn set_parent(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootImmutable);
        }
        if !self.contains(new_parent) {
            return Err(SceneError::NodeNotFound(new_parent));
        }
        let old_parent = self.node(id).ok_or(SceneError::NodeNotFound(id))?.parent;

        let mut ancestor = Some(new_parent);
        while let Some(current) = ancestor {
            if current == id {
                return Err(SceneError::Cycle {
                    node: id,
                    parent: new_parent,
                });
            }
            ancestor = self.node(current).and_then(SceneNode::parent);
        }

        if let Some(old) = old_parent.and_then(|old| self.node_mut(old)) {
            old.children.retain(|child| *child != id);
        }
        self.require_mut(new_parent)?.children.push(id);
        self.require_mut(id)?.parent = Some(new_parent);
        self.dirty = true;
        Ok(())
    }

    /// Node ids in depth-first pre-order, children in insertion order.
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.slots.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            order.push(id);
            stack.extend(node.children.iter().rev());
        }
        order
    }

    /// Node ids in breadth-first order from the root.
    pub fn breadth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.slots.len());
        let mut queue = VecDeque::from([self.root]);
        while let Some(id) = queue.pop_front() {
            let Some(node) = self.node(id) else {
                continue;
            };
            order.push(id);
            queue.extend(node.children.iter().copied());
        }
        order
    }

    /// Iterates over live nodes in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|node| {
                (
                    NodeId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    node,
                )
            })
        })
    }

    /// Iterates mutably over live nodes in arena order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut SceneNode)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| {
                let generation = slot.generation;
                slot.node.as_mut().map(|node| {
                    (
                        NodeId {
                            index: index as u32,
                            generation,
                        },
                        node,
                    )
                })
            })
    }

    /// Binds `uuid` to the node's static mesh, creating the component if the
    /// node has none.
    ///
    /// Returns whether the mesh was replaced. A replacement marks the scene
    /// dirty; a refused or redundant one leaves it untouched.
    pub fn set_static_mesh(&mut self, node: NodeId, uuid: AssetUUID) -> Result<bool, SceneError> {
        let context = self.context.clone();
        let target = self.require_mut(node)?;
        let replaced = match target
            .components
            .iter_mut()
            .find_map(SceneComponent::as_static_mesh_mut)
        {
            Some(mesh) => mesh.bind_identifier(uuid),
            None => {
                let mut mesh = StaticMeshComponent::new(context);
                let replaced = mesh.bind_identifier(uuid);
                if replaced {
                    target.components.push(SceneComponent::StaticMesh(mesh));
                }
                replaced
            }
        };
        if replaced {
            self.dirty = true;
        }
        Ok(replaced)
    }

    /// Attaches a static mesh referencing `uuid`, resolved on the next tick.
    ///
    /// Used when building a scene from persisted data. Does not mark the scene dirty.
    pub fn add_static_mesh(&mut self, node: NodeId, uuid: AssetUUID) -> Result<(), SceneError> {
        let mesh = StaticMeshComponent::with_uuid(self.context.clone(), uuid);
        self.require_mut(node)?
            .components
            .push(SceneComponent::StaticMesh(mesh));
        Ok(())
    }

    /// Attaches a light.
    pub fn add_light(&mut self, node: NodeId, light: LightComponent) -> Result<(), SceneError> {
        self.require_mut(node)?
            .components
            .push(SceneComponent::Light(light));
        self.dirty = true;
        Ok(())
    }

    /// Builds the persisted form of the scene.
    pub fn to_definition(&self) -> SceneDefinition {
        let order = self.depth_first();
        let position = |id: NodeId| order.iter().position(|other| *other == id).map(|i| i as u32);

        let nodes = order
            .iter()
            .filter_map(|&id| self.node(id))
            .map(|node| NodeDefinition {
                name: node.name().to_owned(),
                parent: node.parent.and_then(position),
                transform: node.transform,
                components: node
                    .components
                    .iter()
                    .map(SceneComponent::to_definition)
                    .collect(),
            })
            .collect();

        SceneDefinition {
            schema_version: SCENE_SCHEMA_VERSION,
            nodes,
        }
    }

    /// Rebuilds a scene from its persisted form. The result is clean.
    pub fn from_definition(
        definition: &SceneDefinition,
        context: MeshStreamingContext,
    ) -> Result<Self, SceneError> {
        if definition.schema_version != SCENE_SCHEMA_VERSION {
            return Err(SceneError::UnsupportedSchema(definition.schema_version));
        }

        let mut scene = Scene::new(context);
        let mut ids: Vec<NodeId> = Vec::with_capacity(definition.nodes.len());
        for (index, node_def) in definition.nodes.iter().enumerate() {
            let id = match (index, node_def.parent) {
                (0, None) => scene.root,
                (i, Some(parent)) if i > 0 && (parent as usize) < i => {
                    scene.create_node(node_def.name.clone(), ids[parent as usize])?
                }
                (_, parent) => return Err(SceneError::InvalidParent { node: index, parent }),
            };

            let components: Vec<SceneComponent> = node_def
                .components
                .iter()
                .map(|component| SceneComponent::from_definition(component, &scene.context))
                .collect();
            let node = scene.require_mut(id)?;
            node.set_name(node_def.name.clone());
            node.transform = node_def.transform;
            node.components = components;
            ids.push(id);
        }

        scene.dirty = false;
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::test_support::CountingContext;
    use strata_core::math::{LinearRgba, Vec3};

    #[test]
    fn test_new_scene_has_root() {
        let harness = CountingContext::new();
        let scene = Scene::new(harness.context());
        assert_eq!(scene.len(), 1);
        assert!(scene.contains(scene.root()));
        assert_eq!(scene.node(scene.root()).unwrap().parent(), None);
        assert!(!scene.is_dirty());
    }

    #[test]
    fn test_stale_id_does_not_reach_new_occupant() {
        let harness = CountingContext::new();
        let mut scene = Scene::new(harness.context());
        let root = scene.root();
        let old = scene.create_node("old", root).unwrap();
        scene.remove_node(old).unwrap();

        let new = scene.create_node("new", root).unwrap();

        assert_eq!(new.index, old.index);
        assert!(scene.node(old).is_none());
        assert_eq!(scene.node(new).unwrap().name(), "new");
    }

    #[test]
    fn test_remove_subtree_sends_shrink_hints() {
        // Arrange
        let harness = CountingContext::new();
        let mut scene = Scene::new(harness.context());
        let root = scene.root();
        let parent = scene.create_node("parent", root).unwrap();
        let child = scene.create_node("child", parent).unwrap();
        scene.add_static_mesh(parent, AssetUUID::new()).unwrap();
        scene.add_static_mesh(child, AssetUUID::new()).unwrap();
        let hints_before = harness.hints();

        // Act
        scene.remove_node(parent).unwrap();

        // Assert
        assert_eq!(harness.hints() - hints_before, 2);
        assert!(!scene.contains(child));
        assert_eq!(scene.len(), 1);
        assert!(scene.node(root).unwrap().children().is_empty());
    }

    #[test]
    fn test_root_is_immutable() {
        let harness = CountingContext::new();
        let mut scene = Scene::new(harness.context());
        let root = scene.root();
        let child = scene.create_node("child", root).unwrap();
        assert_eq!(scene.remove_node(root), Err(SceneError::RootImmutable));
        assert_eq!(scene.set_parent(root, child), Err(SceneError::RootImmutable));
    }

    #[test]
    fn test_set_parent_rejects_cycles() {
        let harness = CountingContext::new();
        let mut scene = Scene::new(harness.context());
        let root = scene.root();
        let a = scene.create_node("a", root).unwrap();
        let b = scene.create_node("b", a).unwrap();

        assert_eq!(
            scene.set_parent(a, b),
            Err(SceneError::Cycle { node: a, parent: b })
        );
        scene.set_parent(b, root).unwrap();
        assert_eq!(scene.node(b).unwrap().parent(), Some(root));
        assert!(scene.node(a).unwrap().children().is_empty());
    }

    #[test]
    fn test_traversal_orders() {
        let harness = CountingContext::new();
        let mut scene = Scene::new(harness.context());
        let root = scene.root();
        let a = scene.create_node("a", root).unwrap();
        let b = scene.create_node("b", root).unwrap();
        let a1 = scene.create_node("a1", a).unwrap();

        assert_eq!(scene.depth_first(), vec![root, a, a1, b]);
        assert_eq!(scene.breadth_first(), vec![root, a, b, a1]);
    }

    #[test]
    fn test_set_static_mesh_marks_dirty_only_on_replacement() {
        let harness = CountingContext::new();
        let mut scene = Scene::new(harness.context());
        let root = scene.root();
        let id = AssetUUID::new();

        assert_eq!(scene.set_static_mesh(root, id), Ok(true));
        assert!(scene.is_dirty());

        scene.set_dirty(false);
        assert_eq!(scene.set_static_mesh(root, id), Ok(false));
        assert!(!scene.is_dirty());

        harness.set_busy(true);
        assert_eq!(scene.set_static_mesh(root, AssetUUID::new()), Ok(false));
        assert!(!scene.is_dirty());
        let mesh_count = scene
            .node(root)
            .unwrap()
            .components()
            .iter()
            .filter(|c| c.as_static_mesh().is_some())
            .count();
        assert_eq!(mesh_count, 1);
    }

    #[test]
    fn test_definition_keeps_hierarchy_and_components() {
        // Arrange
        let harness = CountingContext::new();
        let mut scene = Scene::new(harness.context());
        let root = scene.root();
        let lamp = scene.create_node("lamp", root).unwrap();
        let statue = scene.create_node("statue", lamp).unwrap();
        let mesh = AssetUUID::new_v5("meshes/statue");
        scene
            .add_light(lamp, LightComponent::point(LinearRgba::WHITE, 3.0, 8.0))
            .unwrap();
        scene.add_static_mesh(statue, mesh).unwrap();
        scene.node_mut(statue).unwrap().transform.translation = Vec3::new(0.0, 2.0, 0.0);

        // Act
        let definition = scene.to_definition();
        let loaded = Scene::from_definition(&definition, harness.context()).unwrap();

        // Assert
        assert!(!loaded.is_dirty());
        assert_eq!(loaded.to_definition(), definition);
        let order = loaded.depth_first();
        let statue = loaded.node(order[2]).unwrap();
        assert_eq!(statue.name(), "statue");
        assert_eq!(statue.transform.translation, Vec3::new(0.0, 2.0, 0.0));
        let component = statue.components()[0].as_static_mesh().unwrap();
        assert_eq!(component.uuid(), mesh);
        assert!(component.gpu_handle().is_none());
    }

    #[test]
    fn test_definition_rejects_forward_parent() {
        let harness = CountingContext::new();
        let mut definition = Scene::new(harness.context()).to_definition();
        definition.nodes.push(NodeDefinition {
            name: "orphan".into(),
            parent: Some(5),
            transform: Default::default(),
            components: Vec::new(),
        });
        assert_eq!(
            Scene::from_definition(&definition, harness.context()).err(),
            Some(SceneError::InvalidParent {
                node: 1,
                parent: Some(5)
            })
        );

        definition.schema_version = 99;
        assert_eq!(
            Scene::from_definition(&definition, harness.context()).err(),
            Some(SceneError::UnsupportedSchema(99))
        );
    }
}
