//! Texture conversion

use scene_common::{EmbeddedImage, ImageComponentType, Texture};

use crate::diagnostics::{DiagnosticKind, Diagnostics, Scope};
use crate::mesh::codec::ComponentType;
use crate::source::SourceDocument;

/// Convert the source texture at `texture_index`
///
/// Always yields a record so texture indices stay stable. When the image is
/// missing, out of range, of an unsupported pixel type, or does not match its
/// declared size, the record is left empty.
pub fn convert_texture(
    document: &SourceDocument,
    texture_index: usize,
    diagnostics: &mut Diagnostics,
) -> Texture {
    let scope = Scope::Texture(texture_index);
    let Some(image_index) = document.textures[texture_index].source else {
        return Texture::default();
    };
    let Some(image) = document.images.get(image_index) else {
        diagnostics.report(scope, DiagnosticKind::ImageOutOfRange(image_index));
        return Texture::default();
    };

    let component_type = match ComponentType::from_tag(image.pixel_type) {
        Some(ComponentType::UnsignedByte) => ImageComponentType::U8,
        Some(ComponentType::UnsignedShort) => ImageComponentType::U16,
        _ => {
            diagnostics.report(scope, DiagnosticKind::UnsupportedPixelType(image.pixel_type));
            return Texture::default();
        }
    };

    // usize::MAX when the declared size is not addressable; no buffer matches it
    let expected = [image.height, image.components]
        .into_iter()
        .try_fold(image.width as usize, |acc, n| acc.checked_mul(n as usize))
        .and_then(|n| n.checked_mul(component_type.size_bytes()))
        .unwrap_or(usize::MAX);
    if image.pixels.len() != expected {
        diagnostics.report(
            scope,
            DiagnosticKind::ImageSizeMismatch {
                expected,
                found: image.pixels.len(),
            },
        );
        return Texture::default();
    }

    Texture {
        embedded_image: Some(EmbeddedImage {
            bytes: image.pixels.clone(),
            component_type,
            component_count: image.components,
            width: image.width,
            height: image.height,
        }),
        uri: image.uri.clone(),
    }
}
