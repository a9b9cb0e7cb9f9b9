//! Material resolution

use scene_common::{Material, MaterialType};

use crate::source::{SourceMaterial, TextureInfo};

/// A texture slot is kept only for UV set 0 with an in-range texture index
fn resolve_texture(info: Option<TextureInfo>, texture_count: usize) -> Option<u32> {
    info.filter(|info| info.tex_coord == 0 && info.index < texture_count)
        .map(|info| info.index as u32)
}

/// Convert a source material to a physically based material
///
/// Factors are copied without clamping.
pub fn resolve_material(material: &SourceMaterial, texture_count: usize) -> Material {
    Material {
        material_type: MaterialType::PhysicallyBased,
        base_color_factor: material.base_color_factor,
        metallic_factor: material.metallic_factor,
        roughness_factor: material.roughness_factor,
        normal_scale: material.normal_scale,
        emissive_factor: material.emissive_factor,
        base_color_texture: resolve_texture(material.base_color_texture, texture_count),
        metallic_roughness_texture: resolve_texture(
            material.metallic_roughness_texture,
            texture_count,
        ),
        normal_texture: resolve_texture(material.normal_texture, texture_count),
        emissive_texture: resolve_texture(material.emissive_texture, texture_count),
        occlusion_texture: resolve_texture(material.occlusion_texture, texture_count),
    }
}
