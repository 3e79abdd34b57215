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

//! The static mesh component: resolves a mesh identifier into cached render records.

use std::sync::Arc;
use strata_core::{
    asset::{AssetHandle, AssetUUID, StaticMeshAssetHeader},
    renderer::{
        GpuMeshAsset, GpuMeshHandle, GpuPerObjectData, MaterialInstance, MeshStreamingContext,
        TransformProvider, BUILT_IN_EXTENTS, BUILT_IN_SPHERE_BOUNDS,
    },
};

/// Display name of meshes without a header.
pub const ENGINE_MESH_NAME: &str = "EngineMesh";

/// Draws a mesh asset, referenced by identifier, at its node's transform.
///
/// The component keeps a cache of per-submesh render records and rebuilds it
/// only when the mesh is replaced or its loading state changes:
///
/// - [`bind_identifier`](Self::bind_identifier) switches meshes, unless the
///   uploader is busy, in which case the request is refused and the caller
///   retries.
/// - [`tick`](Self::tick) resolves an unresolved identifier or refreshes the
///   records while the mesh or its materials are still streaming. Once
///   everything is ready, ticking is a no-op.
/// - [`render_object_collect`](Self::render_object_collect) copies the
///   cached records, stamped with the frame matrices. It never rebuilds.
///
/// Records are only built from a ready GPU asset; an unresolved or loading
/// mesh contributes nothing to the frame.
pub struct StaticMeshComponent {
    context: MeshStreamingContext,
    mesh_uuid: AssetUUID,
    cached_handle: Option<GpuMeshHandle>,
    cached_header: Option<AssetHandle<StaticMeshAssetHeader>>,
    per_object_data: Vec<GpuPerObjectData>,
    per_object_materials: Vec<Arc<MaterialInstance>>,
    mesh_ready: bool,
    mesh_replaced: bool,
    records_revision: u64,
}

impl StaticMeshComponent {
    /// Creates a component with no mesh bound.
    pub fn new(context: MeshStreamingContext) -> Self {
        Self {
            context,
            mesh_uuid: AssetUUID::EMPTY,
            cached_handle: None,
            cached_header: None,
            per_object_data: Vec::new(),
            per_object_materials: Vec::new(),
            mesh_ready: false,
            mesh_replaced: false,
            records_revision: 0,
        }
    }

    /// Creates a component that references `uuid` without resolving it.
    ///
    /// The next [`tick`](Self::tick) resolves the identifier. Used when a scene
    /// is loaded from disk.
    pub fn with_uuid(context: MeshStreamingContext, uuid: AssetUUID) -> Self {
        let mut component = Self::new(context);
        component.mesh_uuid = uuid;
        component
    }

    /// The bound mesh identifier. Empty when nothing is bound.
    pub fn uuid(&self) -> AssetUUID {
        self.mesh_uuid
    }

    /// Returns `true` if a replacement would currently be accepted.
    pub fn can_replace(&self) -> bool {
        !self.context.uploader.is_busy()
    }

    /// Binds a new mesh identifier.
    ///
    /// Returns `false` without touching any state if `uuid` is already bound
    /// or if the uploader is busy. On success the previous GPU handle is
    /// released, a cache shrink is hinted and the records are rebuilt at once.
    /// Binding the empty identifier clears the records.
    pub fn bind_identifier(&mut self, uuid: AssetUUID) -> bool {
        if uuid == self.mesh_uuid {
            return false;
        }
        self.replace_mesh(uuid)
    }

    /// Per-tick update.
    pub fn tick(&mut self) {
        if self.cached_handle.is_some() {
            self.rebuild();
            return;
        }
        if self.mesh_uuid.is_empty() {
            return;
        }
        // Unresolved this session: re-bind the current identifier.
        let uuid = self.mesh_uuid;
        if !self.replace_mesh(uuid) {
            log::trace!("Resolving mesh {} deferred: uploader busy.", uuid);
        }
    }

    fn replace_mesh(&mut self, uuid: AssetUUID) -> bool {
        if !self.can_replace() {
            log::trace!("Mesh replacement to {} refused: uploader busy.", uuid);
            return false;
        }

        self.mesh_uuid = uuid;
        self.cached_header = if uuid.is_empty() {
            None
        } else {
            self.context.headers.try_get_header(&uuid)
        };
        self.cached_handle = None;
        self.context.cache.request_shrink();
        self.mesh_replaced = true;

        if uuid.is_empty() {
            self.per_object_data.clear();
            self.per_object_materials.clear();
            self.mesh_ready = false;
            self.mesh_replaced = false;
            self.records_revision += 1;
        } else {
            self.rebuild();
        }
        true
    }

    fn rebuild(&mut self) {
        if self.mesh_uuid.is_empty() {
            return;
        }

        let handle = match &self.cached_handle {
            Some(handle) => handle.clone(),
            None => {
                let handle = self.context.cache.get_or_create(self.mesh_uuid);
                self.mesh_replaced = true;
                self.mesh_ready = handle.is_ready();
                self.cached_handle = Some(handle.clone());
                handle
            }
        };

        if !self.mesh_replaced && self.mesh_ready {
            return;
        }

        self.mesh_ready = handle.is_ready();
        if self.mesh_replaced || self.mesh_ready {
            self.per_object_data.clear();
            if let Some(asset) = handle.ready_asset() {
                self.build_records(asset);
            }
            self.records_revision += 1;
        }
        self.mesh_replaced = false;
    }

    fn build_records(&mut self, asset: &GpuMeshAsset) {
        let template = GpuPerObjectData {
            vertices_array_id: asset.vertices_bindless_index,
            indices_array_id: asset.indices_bindless_index,
            ..GpuPerObjectData::default()
        };

        let Some(header) = &self.cached_header else {
            self.per_object_data.push(GpuPerObjectData {
                index_start_position: 0,
                index_count: asset.index_count,
                sphere_bounds: BUILT_IN_SPHERE_BOUNDS,
                extents: BUILT_IN_EXTENTS,
                ..template
            });
            self.per_object_materials.clear();
            return;
        };

        let mut materials = Vec::with_capacity(header.submeshes.len());
        for submesh in &header.submeshes {
            let mut record = template;
            record.index_start_position = submesh.index_start_position;
            record.index_count = submesh.index_count;
            record.set_bounds(&submesh.bounds);

            let (material, material_ready) =
                self.context.materials.build_material(&submesh.material);
            self.mesh_ready &= material_ready;
            record.material = material.gpu;

            self.per_object_data.push(record);
            materials.push(material);
        }

        if self.mesh_ready {
            self.per_object_materials = materials;
        } else {
            // Instances of earlier partial builds stay referenced until everything is ready.
            self.per_object_materials.extend(materials);
        }
    }

    /// Appends the cached records, stamped with `transform`'s frame matrices.
    pub fn render_object_collect<T>(&self, transform: &T, out: &mut Vec<GpuPerObjectData>)
    where
        T: TransformProvider + ?Sized,
    {
        let model = transform.world_matrix();
        let model_prev = transform.prev_world_matrix();
        out.extend(self.per_object_data.iter().map(|record| {
            let mut record = *record;
            record.stamp(&model, &model_prev);
            record
        }));
    }

    /// Returns `true` once the mesh and every submesh material are ready.
    pub fn is_ready(&self) -> bool {
        self.mesh_ready
    }

    /// The cached GPU handle, if the identifier has been resolved.
    pub fn gpu_handle(&self) -> Option<&GpuMeshHandle> {
        self.cached_handle.as_ref()
    }

    /// The cached header, if the mesh has one.
    pub fn header(&self) -> Option<&AssetHandle<StaticMeshAssetHeader>> {
        self.cached_header.as_ref()
    }

    /// The cached render records, without frame matrices.
    pub fn records(&self) -> &[GpuPerObjectData] {
        &self.per_object_data
    }

    /// The material instances kept alive for the records.
    pub fn materials(&self) -> &[Arc<MaterialInstance>] {
        &self.per_object_materials
    }

    /// Incremented every time the record cache is cleared or rebuilt.
    pub fn records_revision(&self) -> u64 {
        self.records_revision
    }

    /// Vertex count of the bound mesh, once its GPU asset is ready.
    pub fn vertices_count(&self) -> Option<u32> {
        self.cached_handle.as_ref()?.vertices_count()
    }

    /// Index count of the bound mesh, once its GPU asset is ready.
    pub fn indices_count(&self) -> Option<u32> {
        self.cached_handle.as_ref()?.indices_count()
    }

    /// Number of cached render records.
    pub fn submesh_count(&self) -> usize {
        self.per_object_data.len()
    }

    /// The header's display name, or [`ENGINE_MESH_NAME`] without a header.
    pub fn mesh_asset_name(&self) -> &str {
        self.cached_header
            .as_ref()
            .map_or(ENGINE_MESH_NAME, |header| header.name.as_str())
    }
}

impl Drop for StaticMeshComponent {
    fn drop(&mut self) {
        self.context.cache.request_shrink();
    }
}

impl std::fmt::Debug for StaticMeshComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticMeshComponent")
            .field("mesh_uuid", &self.mesh_uuid)
            .field("ready", &self.mesh_ready)
            .field("records", &self.per_object_data.len())
            .finish_non_exhaustive()
    }
}
