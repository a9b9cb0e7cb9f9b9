//! Animation channel extraction
//!
//! Each channel is validated on its own; a failing channel is diagnosed and
//! dropped while the rest of the animation is kept. The output channel list is
//! always grouped translation, then rotation, then scale, preserving source
//! order within each group.

use std::cmp::Ordering;

use scene_common::{Animation, Channel, Keyframes};

use crate::config::AnimationConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics, Scope};
use crate::mesh::codec::ComponentType;
use crate::source::{AccessorError, AccessorType, SourceChannel, SourceDocument};

/// Decode and validate one channel
///
/// Returns `None` when the channel is skipped. An empty timeline is skipped
/// without a diagnostic.
pub fn extract_channel(
    document: &SourceDocument,
    animation_index: usize,
    channel_index: usize,
    config: &AnimationConfig,
    diagnostics: &mut Diagnostics,
) -> Option<Channel> {
    let animation = &document.animations[animation_index];
    let channel: &SourceChannel = &animation.channels[channel_index];
    let scope = Scope::Channel {
        animation: animation_index,
        channel: channel_index,
    };

    match decode_channel(document, animation_index, channel) {
        Ok(Some(decoded)) => {
            if !is_ascending(&decoded.timeline) {
                if config.reject_unsorted_timelines {
                    diagnostics.report(scope, DiagnosticKind::UnsortedTimelineRejected);
                    return None;
                }
                diagnostics.report(scope, DiagnosticKind::TimelineNotAscending);
            }
            Some(decoded)
        }
        Ok(None) => None,
        Err(kind) => {
            diagnostics.report(scope, kind);
            None
        }
    }
}

/// Non-decreasing, with NaN counting as out of order
fn is_ascending(timeline: &[f32]) -> bool {
    timeline.windows(2).all(|w| {
        matches!(
            w[0].partial_cmp(&w[1]),
            Some(Ordering::Less | Ordering::Equal)
        )
    }) && timeline.first().is_none_or(|t| !t.is_nan())
}

fn decode_channel(
    document: &SourceDocument,
    animation_index: usize,
    channel: &SourceChannel,
) -> Result<Option<Channel>, DiagnosticKind> {
    let animation = &document.animations[animation_index];
    let sampler = animation
        .samplers
        .get(channel.sampler)
        .ok_or(DiagnosticKind::SamplerOutOfRange(channel.sampler))?;
    let node = channel.target_node.ok_or(DiagnosticKind::MissingTargetNode)?;
    if node >= document.nodes.len() {
        return Err(DiagnosticKind::TargetNodeOutOfRange(node));
    }

    // Keyframe times; an empty timeline is skipped before its data is resolved
    if document
        .accessors
        .get(sampler.input)
        .is_some_and(|accessor| accessor.count == 0)
    {
        return Ok(None);
    }
    let times = document.accessor_view(sampler.input).map_err(|e| match e {
        AccessorError::UnknownComponentType(tag) => DiagnosticKind::InvalidTimeAccessor {
            component_type: tag,
            accessor_type: document.accessors[sampler.input].accessor_type,
        },
        e => DiagnosticKind::Accessor(e),
    })?;
    if times.component_type() != ComponentType::Float
        || times.accessor_type() != AccessorType::Scalar
    {
        return Err(DiagnosticKind::InvalidTimeAccessor {
            component_type: times.component_type().tag(),
            accessor_type: times.accessor_type(),
        });
    }
    let timeline: Vec<f32> = times.read_floats::<1>().into_iter().map(|[t]| t).collect();

    // Keyframe values
    let values = document.accessor_view(sampler.output).map_err(|e| match e {
        AccessorError::UnknownComponentType(tag) => DiagnosticKind::InvalidValueComponentType(tag),
        e => DiagnosticKind::Accessor(e),
    })?;
    if values.count() != timeline.len() {
        return Err(DiagnosticKind::KeyframeCountMismatch {
            times: timeline.len(),
            values: values.count(),
        });
    }
    if values.component_type() != ComponentType::Float {
        return Err(DiagnosticKind::InvalidValueComponentType(
            values.component_type().tag(),
        ));
    }

    let (path, expected) = match channel.target_path.as_str() {
        "translation" => ("translation", AccessorType::Vec3),
        "rotation" => ("rotation", AccessorType::Vec4),
        "scale" => ("scale", AccessorType::Vec3),
        other => return Err(DiagnosticKind::UnsupportedTargetPath(other.to_string())),
    };
    if values.accessor_type() != expected {
        return Err(DiagnosticKind::InvalidValueType {
            path,
            expected,
            found: values.accessor_type(),
        });
    }

    let keyframes = match path {
        "translation" => Keyframes::Translation(values.read_floats::<3>()),
        "rotation" => Keyframes::Rotation(values.read_floats::<4>()),
        _ => Keyframes::Scale(values.read_floats::<3>()),
    };

    Ok(Some(Channel {
        node: node as u32,
        timeline,
        keyframes,
    }))
}

/// Convert the source animation at `animation_index`
pub fn convert_animation(
    document: &SourceDocument,
    animation_index: usize,
    config: &AnimationConfig,
    diagnostics: &mut Diagnostics,
) -> Animation {
    let source = &document.animations[animation_index];
    let mut translations = Vec::new();
    let mut rotations = Vec::new();
    let mut scales = Vec::new();

    for channel_index in 0..source.channels.len() {
        let Some(channel) =
            extract_channel(document, animation_index, channel_index, config, diagnostics)
        else {
            continue;
        };
        match channel.keyframes {
            Keyframes::Translation(_) => translations.push(channel),
            Keyframes::Rotation(_) => rotations.push(channel),
            Keyframes::Scale(_) => scales.push(channel),
        }
    }

    let mut channels = translations;
    channels.extend(rotations);
    channels.extend(scales);

    Animation {
        name: source.name.clone(),
        channels,
    }
}
