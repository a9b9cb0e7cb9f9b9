//! Programmatic GLB generation for integration tests.
//!
//! Generates a GLB with:
//! - A 2-joint hierarchy (Root -> Spine) with TRS transforms
//! - A skinned, colored triangle on a scaled node with a material
//! - A node carrying a raw matrix
//! - A 3-key animation whose channels are listed scale, translation, rotation
//! - A 2x2 RGBA PNG shared by two textures, referenced from every material slot

mod glb_assembly;

use bytemuck::Pod;
use gltf_json as json;
use json::validation::Checked::Valid;

pub const ROOT_NODE: usize = 0;
pub const SPINE_NODE: usize = 1;
pub const MESH_NODE: usize = 2;
pub const MATRIX_NODE: usize = 3;

pub const POSITIONS: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
const POSITION_MIN: [f32; 3] = [0.0, 0.0, 0.0];
const POSITION_MAX: [f32; 3] = [1.0, 1.0, 0.0];
pub const NORMALS: [[f32; 3]; 3] = [[0.0, 0.0, 1.0]; 3];
pub const UVS: [[f32; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
pub const COLORS: [[u8; 4]; 3] = [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 0]];
pub const JOINTS: [[u8; 4]; 3] = [[0, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]];
pub const WEIGHTS: [[f32; 4]; 3] = [
    [0.75, 0.25, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
];
pub const INDICES: [u16; 3] = [0, 1, 2];

pub const BASE_COLOR: [f32; 4] = [0.5, 0.25, 1.0, 1.0];
pub const METALLIC: f32 = 0.25;
pub const ROUGHNESS: f32 = 0.75;
pub const EMISSIVE: [f32; 3] = [0.125, 0.25, 0.5];
pub const NORMAL_SCALE: f32 = 0.5;

pub const TEXTURE_SIZE: u32 = 2;
pub const TEXTURE_PIXELS: [u8; 16] = [
    255, 0, 0, 255, 0, 255, 0, 255, //
    0, 0, 255, 255, 255, 255, 255, 128,
];
pub const BASE_COLOR_TEXTURE: u32 = 0;
pub const DETAIL_TEXTURE: u32 = 1;

/// Where the generated document's image lives
pub enum ImageSource<'a> {
    /// PNG bytes stored in the binary chunk
    Embedded,
    /// External file next to the GLB
    Uri(&'a str),
}

pub const ROOT_TRANSLATION: [f32; 3] = [0.0, 1.0, 0.0];
pub const MESH_SCALE: [f32; 3] = [2.0, 2.0, 2.0];
/// Column-major translation by (5, 0, 0)
pub const RAW_MATRIX: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    5.0, 0.0, 0.0, 1.0,
];

pub const TIMES: [f32; 3] = [0.0, 0.5, 1.0];
pub const TRANSLATIONS: [[f32; 3]; 3] = [[0.0, 1.0, 0.0], [0.0, 1.5, 0.0], [0.0, 2.0, 0.0]];
pub const ROTATIONS: [[f32; 4]; 3] = [
    [0.0, 0.0, 0.0, 1.0],
    [0.0, 0.0, 0.38268343, 0.9238795],
    [0.0, 0.0, 0.70710677, 0.70710677],
];
pub const SCALES: [[f32; 3]; 3] = [[1.0; 3], [1.5; 3], [1.0; 3]];

/// Binary buffer plus views/accessors describing it
#[derive(Default)]
struct BufferPacker {
    buffer: Vec<u8>,
    views: Vec<json::buffer::View>,
    accessors: Vec<json::Accessor>,
}

impl BufferPacker {
    /// Append bytes with their own view; returns the view index
    fn push_view(&mut self, bytes: &[u8]) -> u32 {
        while !self.buffer.len().is_multiple_of(4) {
            self.buffer.push(0);
        }
        let offset = self.buffer.len();
        self.buffer.extend_from_slice(bytes);

        self.views.push(json::buffer::View {
            buffer: json::Index::new(0),
            byte_length: bytes.len().into(),
            byte_offset: Some(offset.into()),
            byte_stride: None,
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            target: None,
        });
        self.views.len() as u32 - 1
    }

    /// Append tightly packed data with its own view; returns the accessor index
    fn push<T: Pod>(
        &mut self,
        data: &[T],
        count: usize,
        component_type: json::accessor::ComponentType,
        type_: json::accessor::Type,
        normalized: bool,
        bounds: Option<(&[f32], &[f32])>,
    ) -> u32 {
        let view = self.push_view(bytemuck::cast_slice(data));

        let to_value = |v: &[f32]| {
            json::Value::Array(v.iter().copied().map(json::Value::from).collect())
        };
        self.accessors.push(json::Accessor {
            buffer_view: Some(json::Index::new(view)),
            byte_offset: Some(0u64.into()),
            count: count.into(),
            component_type: Valid(json::accessor::GenericComponentType(component_type)),
            extensions: Default::default(),
            extras: Default::default(),
            type_: Valid(type_),
            min: bounds.map(|(min, _)| to_value(min)),
            max: bounds.map(|(_, max)| to_value(max)),
            name: None,
            normalized,
            sparse: None,
        });
        self.accessors.len() as u32 - 1
    }
}

fn node(name: &str) -> json::Node {
    json::Node {
        camera: None,
        children: None,
        extensions: Default::default(),
        extras: Default::default(),
        matrix: None,
        mesh: None,
        name: Some(name.to_string()),
        rotation: None,
        scale: None,
        translation: None,
        skin: None,
        weights: None,
    }
}

fn sampler(input: u32, output: u32) -> json::animation::Sampler {
    json::animation::Sampler {
        input: json::Index::new(input),
        interpolation: Valid(json::animation::Interpolation::Linear),
        output: json::Index::new(output),
        extensions: Default::default(),
        extras: Default::default(),
    }
}

fn channel(sampler: u32, node: usize, path: json::animation::Property) -> json::animation::Channel {
    json::animation::Channel {
        sampler: json::Index::new(sampler),
        target: json::animation::Target {
            node: json::Index::new(node as u32),
            path: Valid(path),
            extensions: Default::default(),
            extras: Default::default(),
        },
        extensions: Default::default(),
        extras: Default::default(),
    }
}

/// Encode [`TEXTURE_PIXELS`] as a PNG file
pub fn texture_png() -> Vec<u8> {
    let image = image::RgbaImage::from_raw(TEXTURE_SIZE, TEXTURE_SIZE, TEXTURE_PIXELS.to_vec())
        .expect("Pixel count matches dimensions");
    let mut png = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut png, image::ImageFormat::Png)
        .expect("Failed to encode PNG");
    png.into_inner()
}

fn texture_info(index: u32, tex_coord: u32) -> json::texture::Info {
    json::texture::Info {
        index: json::Index::new(index),
        tex_coord,
        extensions: Default::default(),
        extras: Default::default(),
    }
}

/// Generate the test scene as a GLB file.
pub fn generate_scene_glb() -> Vec<u8> {
    let (root, buffer) = scene_document(ImageSource::Embedded);
    glb_assembly::assemble_glb(&root, &buffer)
}

/// Generate the test scene with its image referenced by `uri` instead of embedded.
pub fn generate_scene_glb_with_image_uri(uri: &str) -> Vec<u8> {
    let (root, buffer) = scene_document(ImageSource::Uri(uri));
    glb_assembly::assemble_glb(&root, &buffer)
}

/// Generate the test scene with a non-identity scale on the matrix node.
pub fn generate_matrix_override_glb() -> Vec<u8> {
    let (mut root, buffer) = scene_document(ImageSource::Embedded);
    root.nodes[MATRIX_NODE].scale = Some(MESH_SCALE);
    glb_assembly::assemble_glb(&root, &buffer)
}

fn scene_document(image_source: ImageSource<'_>) -> (json::Root, Vec<u8>) {
    use json::accessor::{ComponentType as C, Type as T};

    let mut packer = BufferPacker::default();
    let pos = packer.push(
        &POSITIONS,
        3,
        C::F32,
        T::Vec3,
        false,
        Some((POSITION_MIN.as_slice(), POSITION_MAX.as_slice())),
    );
    let norm = packer.push(&NORMALS, 3, C::F32, T::Vec3, false, None);
    let uv = packer.push(&UVS, 3, C::F32, T::Vec2, false, None);
    let color = packer.push(&COLORS, 3, C::U8, T::Vec4, true, None);
    let joints = packer.push(&JOINTS, 3, C::U8, T::Vec4, false, None);
    let weights = packer.push(&WEIGHTS, 3, C::F32, T::Vec4, false, None);
    let indices = packer.push(&INDICES, 3, C::U16, T::Scalar, false, None);
    let ibm_data = [RAW_MATRIX, RAW_MATRIX];
    let ibm = packer.push(&ibm_data, 2, C::F32, T::Mat4, false, None);
    let times = packer.push(&TIMES, 3, C::F32, T::Scalar, false, Some((&TIMES[..1], &TIMES[2..])));
    let translations = packer.push(&TRANSLATIONS, 3, C::F32, T::Vec3, false, None);
    let rotations = packer.push(&ROTATIONS, 3, C::F32, T::Vec4, false, None);
    let scales = packer.push(&SCALES, 3, C::F32, T::Vec3, false, None);

    let mut attributes = std::collections::BTreeMap::new();
    attributes.insert(Valid(json::mesh::Semantic::Positions), json::Index::new(pos));
    attributes.insert(Valid(json::mesh::Semantic::Normals), json::Index::new(norm));
    attributes.insert(Valid(json::mesh::Semantic::TexCoords(0)), json::Index::new(uv));
    attributes.insert(Valid(json::mesh::Semantic::Colors(0)), json::Index::new(color));
    attributes.insert(Valid(json::mesh::Semantic::Joints(0)), json::Index::new(joints));
    attributes.insert(Valid(json::mesh::Semantic::Weights(0)), json::Index::new(weights));

    let primitive = |material: u32| json::mesh::Primitive {
        attributes: attributes.clone(),
        extensions: Default::default(),
        extras: Default::default(),
        indices: Some(json::Index::new(indices)),
        material: Some(json::Index::new(material)),
        mode: Valid(json::mesh::Mode::Triangles),
        targets: None,
    };
    let meshes = vec![json::Mesh {
        extensions: Default::default(),
        extras: Default::default(),
        name: Some("Triangle".to_string()),
        primitives: vec![primitive(0), primitive(1)],
        weights: None,
    }];

    let images = vec![match image_source {
        ImageSource::Embedded => json::Image {
            buffer_view: Some(json::Index::new(packer.push_view(&texture_png()))),
            mime_type: Some(json::image::MimeType("image/png".to_string())),
            name: Some("Albedo".to_string()),
            uri: None,
            extensions: Default::default(),
            extras: Default::default(),
        },
        ImageSource::Uri(uri) => json::Image {
            buffer_view: None,
            mime_type: None,
            name: Some("Albedo".to_string()),
            uri: Some(uri.to_string()),
            extensions: Default::default(),
            extras: Default::default(),
        },
    }];
    let texture = || json::Texture {
        name: None,
        sampler: None,
        source: json::Index::new(0),
        extensions: Default::default(),
        extras: Default::default(),
    };
    let textures = vec![texture(), texture()];

    let materials = vec![
        json::Material {
            name: Some("Paint".to_string()),
            pbr_metallic_roughness: json::material::PbrMetallicRoughness {
                base_color_factor: json::material::PbrBaseColorFactor(BASE_COLOR),
                base_color_texture: Some(texture_info(BASE_COLOR_TEXTURE, 0)),
                metallic_factor: json::material::StrengthFactor(METALLIC),
                roughness_factor: json::material::StrengthFactor(ROUGHNESS),
                metallic_roughness_texture: Some(texture_info(DETAIL_TEXTURE, 0)),
                ..Default::default()
            },
            normal_texture: Some(json::material::NormalTexture {
                index: json::Index::new(DETAIL_TEXTURE),
                scale: NORMAL_SCALE,
                tex_coord: 0,
                extensions: Default::default(),
                extras: Default::default(),
            }),
            occlusion_texture: Some(json::material::OcclusionTexture {
                index: json::Index::new(DETAIL_TEXTURE),
                strength: json::material::StrengthFactor(1.0),
                tex_coord: 0,
                extensions: Default::default(),
                extras: Default::default(),
            }),
            emissive_texture: Some(texture_info(BASE_COLOR_TEXTURE, 0)),
            emissive_factor: json::material::EmissiveFactor(EMISSIVE),
            ..Default::default()
        },
        // Second UV set is not supported
        json::Material {
            name: Some("SecondUv".to_string()),
            pbr_metallic_roughness: json::material::PbrMetallicRoughness {
                base_color_texture: Some(texture_info(BASE_COLOR_TEXTURE, 1)),
                ..Default::default()
            },
            ..Default::default()
        },
    ];

    let mut root_node = node("Root");
    root_node.children = Some(vec![json::Index::new(SPINE_NODE as u32)]);
    root_node.translation = Some(ROOT_TRANSLATION);
    let mut spine_node = node("Spine");
    spine_node.rotation = Some(json::scene::UnitQuaternion(ROTATIONS[2]));
    let mut mesh_node = node("Mesh");
    mesh_node.mesh = Some(json::Index::new(0));
    mesh_node.skin = Some(json::Index::new(0));
    mesh_node.scale = Some(MESH_SCALE);
    let mut matrix_node = node("Matrix");
    matrix_node.matrix = Some(RAW_MATRIX);
    let nodes = vec![root_node, spine_node, mesh_node, matrix_node];

    let skins = vec![json::Skin {
        extensions: Default::default(),
        extras: Default::default(),
        inverse_bind_matrices: Some(json::Index::new(ibm)),
        joints: vec![
            json::Index::new(ROOT_NODE as u32),
            json::Index::new(SPINE_NODE as u32),
        ],
        name: Some("Skeleton".to_string()),
        skeleton: Some(json::Index::new(ROOT_NODE as u32)),
    }];

    use json::animation::Property;
    let animations = vec![json::Animation {
        channels: vec![
            channel(2, SPINE_NODE, Property::Scale),
            channel(0, ROOT_NODE, Property::Translation),
            channel(1, SPINE_NODE, Property::Rotation),
        ],
        extensions: Default::default(),
        extras: Default::default(),
        name: Some("Wave".to_string()),
        samplers: vec![
            sampler(times, translations),
            sampler(times, rotations),
            sampler(times, scales),
        ],
    }];

    let scenes = vec![json::Scene {
        extensions: Default::default(),
        extras: Default::default(),
        name: Some("TestScene".to_string()),
        nodes: vec![
            json::Index::new(ROOT_NODE as u32),
            json::Index::new(MESH_NODE as u32),
            json::Index::new(MATRIX_NODE as u32),
        ],
    }];

    let buffers = vec![json::Buffer {
        byte_length: 0u64.into(),
        extensions: Default::default(),
        extras: Default::default(),
        name: None,
        uri: None,
    }];

    let root = json::Root {
        accessors: packer.accessors,
        animations,
        asset: json::Asset {
            copyright: None,
            extensions: Default::default(),
            extras: Default::default(),
            generator: Some("scene-import-test".to_string()),
            min_version: None,
            version: "2.0".to_string(),
        },
        buffers,
        buffer_views: packer.views,
        cameras: Vec::new(),
        extensions: Default::default(),
        extras: Default::default(),
        extensions_required: Vec::new(),
        extensions_used: Vec::new(),
        images,
        materials,
        meshes,
        nodes,
        samplers: Vec::new(),
        scene: Some(json::Index::new(0)),
        scenes,
        skins,
        textures,
    };

    (root, packer.buffer)
}
