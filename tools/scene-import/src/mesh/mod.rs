//! Mesh conversion
//!
//! - `codec`: component type tags and scalar readers
//! - `layout`: semantic to vertex-record layout table
//! - `vertices`: per-primitive vertex assembly
//! - `primitive`: vertices + indices + material

pub mod codec;
pub mod layout;
pub mod primitive;
pub mod vertices;

pub use codec::ComponentType;
pub use layout::{AttributeLayout, AttributeTable, AttributeType, VertexVariant};
pub use primitive::assemble_primitive;
pub use vertices::{assemble_vertices, VerticesBuilder};
