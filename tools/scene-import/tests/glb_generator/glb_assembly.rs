//! GLB container assembly.

use gltf_json as json;

const CHUNK_JSON: u32 = 0x4E4F534A;
const CHUNK_BIN: u32 = 0x004E4942;

/// Append one 4-byte aligned chunk
fn push_chunk(glb: &mut Vec<u8>, chunk_type: u32, data: &[u8], pad: u8) {
    let padded = data.len().next_multiple_of(4);
    glb.extend_from_slice(&(padded as u32).to_le_bytes());
    glb.extend_from_slice(&chunk_type.to_le_bytes());
    glb.extend_from_slice(data);
    glb.resize(glb.len() + padded - data.len(), pad);
}

/// Wrap a document and its single binary buffer into a GLB file
pub(crate) fn assemble_glb(root: &json::Root, buffer_data: &[u8]) -> Vec<u8> {
    let mut root = root.clone();
    root.buffers[0].byte_length = buffer_data.len().into();
    let json_string = json::serialize::to_string(&root).expect("Failed to serialize JSON");

    let mut glb = Vec::new();
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&0u32.to_le_bytes()); // total length, patched below

    // JSON is padded with spaces, binary with zeros
    push_chunk(&mut glb, CHUNK_JSON, json_string.as_bytes(), b' ');
    push_chunk(&mut glb, CHUNK_BIN, buffer_data, 0);

    let total = glb.len() as u32;
    glb[8..12].copy_from_slice(&total.to_le_bytes());
    glb
}
