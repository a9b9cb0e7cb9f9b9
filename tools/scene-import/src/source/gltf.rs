//! glTF/GLB front-end
//!
//! Parses a file with the `gltf` crate and flattens the result into a
//! [`SourceDocument`]. Indices are copied as-is; nothing is validated here.

use std::collections::BTreeMap;
use std::path::Path;

use ::gltf::animation::Property;
use ::gltf::image::Format;
use ::gltf::json;

use super::*;
use crate::mesh::codec::ComponentType;

/// Load a `.gltf` or `.glb` file (external buffers and images resolved relative to it)
pub fn load(path: &Path) -> Result<SourceDocument, ::gltf::Error> {
    let (document, buffers, images) = ::gltf::import(path)?;
    Ok(from_gltf(&document, buffers, images))
}

/// Load a self-contained glTF from memory (GLB or JSON with data URIs)
pub fn load_slice(bytes: &[u8]) -> Result<SourceDocument, ::gltf::Error> {
    let (document, buffers, images) = ::gltf::import_slice(bytes)?;
    Ok(from_gltf(&document, buffers, images))
}

/// Convert an imported glTF document plus its resolved data
pub fn from_gltf(
    document: &::gltf::Document,
    buffers: Vec<::gltf::buffer::Data>,
    images: Vec<::gltf::image::Data>,
) -> SourceDocument {
    SourceDocument {
        nodes: document
            .nodes()
            .zip(&document.as_json().nodes)
            .map(|(node, raw)| convert_node(node, raw))
            .collect(),
        meshes: document.meshes().map(convert_mesh).collect(),
        accessors: document.accessors().map(convert_accessor).collect(),
        buffer_views: document
            .views()
            .map(|view| SourceBufferView {
                buffer: view.buffer().index(),
                byte_offset: view.offset(),
                byte_length: view.length(),
                byte_stride: view.stride(),
            })
            .collect(),
        buffers: buffers.into_iter().map(|data| data.0).collect(),
        materials: document.materials().map(convert_material).collect(),
        textures: document
            .textures()
            .map(|texture| SourceTexture {
                source: Some(texture.source().index()),
            })
            .collect(),
        images: convert_images(document, images),
        skins: document
            .skins()
            .map(|skin| SourceSkin {
                joints: skin.joints().map(|joint| joint.index()).collect(),
                inverse_bind_matrices: skin.inverse_bind_matrices().map(|a| a.index()),
                skeleton: skin.skeleton().map(|node| node.index()),
            })
            .collect(),
        animations: document.animations().map(convert_animation).collect(),
        scenes: document
            .scenes()
            .map(|scene| SourceScene {
                name: scene.name().unwrap_or_default().to_string(),
                nodes: scene.nodes().map(|node| node.index()).collect(),
            })
            .collect(),
        default_scene: document.default_scene().map(|scene| scene.index()),
    }
}

/// Transform fields come from the raw JSON: `Node::transform` drops TRS
/// whenever a matrix is also present.
fn convert_node(node: ::gltf::Node, raw: &json::Node) -> SourceNode {
    SourceNode {
        name: node.name().unwrap_or_default().to_string(),
        children: node.children().map(|child| child.index()).collect(),
        scale: raw.scale.map(Vec::from).unwrap_or_default(),
        rotation: raw.rotation.as_ref().map(|q| q.0.to_vec()).unwrap_or_default(),
        translation: raw.translation.map(Vec::from).unwrap_or_default(),
        matrix: raw.matrix.map(Vec::from).unwrap_or_default(),
        mesh: node.mesh().map(|mesh| mesh.index()),
        skin: node.skin().map(|skin| skin.index()),
    }
}

fn convert_mesh(mesh: ::gltf::Mesh) -> SourceMesh {
    SourceMesh {
        name: mesh.name().unwrap_or_default().to_string(),
        primitives: mesh
            .primitives()
            .map(|primitive| SourcePrimitive {
                attributes: primitive
                    .attributes()
                    .map(|(semantic, accessor)| (semantic.to_string(), accessor.index()))
                    .collect::<BTreeMap<_, _>>(),
                indices: primitive.indices().map(|accessor| accessor.index()),
                material: primitive.material().index(),
            })
            .collect(),
    }
}

fn convert_accessor(accessor: ::gltf::Accessor) -> SourceAccessor {
    use ::gltf::accessor::Dimensions;

    let accessor_type = match accessor.dimensions() {
        Dimensions::Scalar => AccessorType::Scalar,
        Dimensions::Vec2 => AccessorType::Vec2,
        Dimensions::Vec3 => AccessorType::Vec3,
        Dimensions::Vec4 => AccessorType::Vec4,
        Dimensions::Mat2 => AccessorType::Mat2,
        Dimensions::Mat3 => AccessorType::Mat3,
        Dimensions::Mat4 => AccessorType::Mat4,
    };

    SourceAccessor {
        buffer_view: accessor.view().map(|view| view.index()),
        byte_offset: accessor.offset(),
        component_type: accessor.data_type().as_gl_enum(),
        accessor_type,
        count: accessor.count(),
    }
}

fn texture_info(index: usize, tex_coord: u32) -> TextureInfo {
    TextureInfo { index, tex_coord }
}

fn convert_material(material: ::gltf::Material) -> SourceMaterial {
    let pbr = material.pbr_metallic_roughness();
    SourceMaterial {
        name: material.name().unwrap_or_default().to_string(),
        base_color_factor: pbr.base_color_factor(),
        base_color_texture: pbr
            .base_color_texture()
            .map(|info| texture_info(info.texture().index(), info.tex_coord())),
        metallic_factor: pbr.metallic_factor(),
        roughness_factor: pbr.roughness_factor(),
        metallic_roughness_texture: pbr
            .metallic_roughness_texture()
            .map(|info| texture_info(info.texture().index(), info.tex_coord())),
        normal_scale: material.normal_texture().map_or(1.0, |normal| normal.scale()),
        normal_texture: material
            .normal_texture()
            .map(|normal| texture_info(normal.texture().index(), normal.tex_coord())),
        emissive_factor: material.emissive_factor(),
        emissive_texture: material
            .emissive_texture()
            .map(|info| texture_info(info.texture().index(), info.tex_coord())),
        occlusion_texture: material
            .occlusion_texture()
            .map(|occlusion| texture_info(occlusion.texture().index(), occlusion.tex_coord())),
    }
}

/// Pixel component tag and channel count for a decoded image format
fn pixel_layout(format: Format) -> (ComponentType, u32) {
    match format {
        Format::R8 => (ComponentType::UnsignedByte, 1),
        Format::R8G8 => (ComponentType::UnsignedByte, 2),
        Format::R8G8B8 => (ComponentType::UnsignedByte, 3),
        Format::R8G8B8A8 => (ComponentType::UnsignedByte, 4),
        Format::R16 => (ComponentType::UnsignedShort, 1),
        Format::R16G16 => (ComponentType::UnsignedShort, 2),
        Format::R16G16B16 => (ComponentType::UnsignedShort, 3),
        Format::R16G16B16A16 => (ComponentType::UnsignedShort, 4),
        Format::R32G32B32FLOAT => (ComponentType::Float, 3),
        Format::R32G32B32A32FLOAT => (ComponentType::Float, 4),
    }
}

fn convert_images(
    document: &::gltf::Document,
    images: Vec<::gltf::image::Data>,
) -> Vec<SourceImage> {
    document
        .images()
        .zip(images)
        .map(|(image, data)| {
            let (component_type, components) = pixel_layout(data.format);
            let uri = match image.source() {
                ::gltf::image::Source::Uri { uri, .. } => Some(uri.to_string()),
                ::gltf::image::Source::View { .. } => None,
            };
            SourceImage {
                pixels: data.pixels,
                pixel_type: component_type.tag(),
                components,
                width: data.width,
                height: data.height,
                uri,
            }
        })
        .collect()
}

fn convert_animation(animation: ::gltf::Animation) -> SourceAnimation {
    SourceAnimation {
        name: animation.name().unwrap_or_default().to_string(),
        channels: animation
            .channels()
            .map(|channel| {
                let target = channel.target();
                let target_path = match target.property() {
                    Property::Translation => "translation",
                    Property::Rotation => "rotation",
                    Property::Scale => "scale",
                    Property::MorphTargetWeights => "weights",
                };
                SourceChannel {
                    sampler: channel.sampler().index(),
                    target_node: Some(target.node().index()),
                    target_path: target_path.to_string(),
                }
            })
            .collect(),
        samplers: animation
            .samplers()
            .map(|sampler| SourceSampler {
                input: sampler.input().index(),
                output: sampler.output().index(),
            })
            .collect(),
    }
}
