//! Component codec
//!
//! Maps a glTF component type tag to its byte width and a scalar reader.
//! Integer readers optionally normalize by the type's maximum value, giving
//! `[0, 1]` for unsigned and `[-1, 1]` for signed types. Floats ignore the
//! normalized flag.

/// Numeric encoding of one accessor component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ComponentType {
    SignedByte = 5120,
    UnsignedByte = 5121,
    SignedShort = 5122,
    UnsignedShort = 5123,
    SignedInt = 5124,
    UnsignedInt = 5125,
    Float = 5126,
}

/// Reads the component starting at `offset` in `bytes` as an f32
pub type ComponentConverter = fn(bytes: &[u8], offset: usize, normalized: bool) -> f32;

/// Width and reader for one component type
#[derive(Clone, Copy)]
pub struct ComponentCodec {
    pub size_bytes: usize,
    pub read: ComponentConverter,
}

macro_rules! integer_converter {
    ($name:ident, $ty:ty, $size:literal) => {
        fn $name(bytes: &[u8], offset: usize, normalized: bool) -> f32 {
            let mut raw = [0u8; $size];
            raw.copy_from_slice(&bytes[offset..offset + $size]);
            let value = <$ty>::from_le_bytes(raw);
            if normalized {
                // Signed minimum is one further from zero than MAX
                ((value as f64 / <$ty>::MAX as f64) as f32).max(-1.0)
            } else {
                value as f32
            }
        }
    };
}

integer_converter!(read_i8, i8, 1);
integer_converter!(read_u8, u8, 1);
integer_converter!(read_i16, i16, 2);
integer_converter!(read_u16, u16, 2);
integer_converter!(read_i32, i32, 4);
integer_converter!(read_u32, u32, 4);

fn read_f32(bytes: &[u8], offset: usize, _normalized: bool) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Indexed by declaration order of [`ComponentType`]
static COMPONENT_CODECS: [ComponentCodec; 7] = [
    ComponentCodec {
        size_bytes: 1,
        read: read_i8,
    },
    ComponentCodec {
        size_bytes: 1,
        read: read_u8,
    },
    ComponentCodec {
        size_bytes: 2,
        read: read_i16,
    },
    ComponentCodec {
        size_bytes: 2,
        read: read_u16,
    },
    ComponentCodec {
        size_bytes: 4,
        read: read_i32,
    },
    ComponentCodec {
        size_bytes: 4,
        read: read_u32,
    },
    ComponentCodec {
        size_bytes: 4,
        read: read_f32,
    },
];

impl ComponentType {
    pub const ALL: [ComponentType; 7] = [
        ComponentType::SignedByte,
        ComponentType::UnsignedByte,
        ComponentType::SignedShort,
        ComponentType::UnsignedShort,
        ComponentType::SignedInt,
        ComponentType::UnsignedInt,
        ComponentType::Float,
    ];

    /// Parse a raw glTF tag; `None` for unknown encodings
    pub fn from_tag(tag: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Raw glTF tag
    pub fn tag(self) -> u32 {
        self as u32
    }

    pub fn codec(self) -> &'static ComponentCodec {
        &COMPONENT_CODECS[(self.tag() - ComponentType::SignedByte.tag()) as usize]
    }

    pub fn size_bytes(self) -> usize {
        self.codec().size_bytes
    }

    /// Read one component at `offset`
    pub fn read(self, bytes: &[u8], offset: usize, normalized: bool) -> f32 {
        (self.codec().read)(bytes, offset, normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_roundtrip() {
        for ty in ComponentType::ALL {
            assert_eq!(ComponentType::from_tag(ty.tag()), Some(ty));
        }
        assert_eq!(ComponentType::from_tag(5119), None);
        assert_eq!(ComponentType::from_tag(5127), None);
    }

    #[test]
    fn test_sizes() {
        assert_eq!(ComponentType::SignedByte.size_bytes(), 1);
        assert_eq!(ComponentType::UnsignedByte.size_bytes(), 1);
        assert_eq!(ComponentType::SignedShort.size_bytes(), 2);
        assert_eq!(ComponentType::UnsignedShort.size_bytes(), 2);
        assert_eq!(ComponentType::SignedInt.size_bytes(), 4);
        assert_eq!(ComponentType::UnsignedInt.size_bytes(), 4);
        assert_eq!(ComponentType::Float.size_bytes(), 4);
    }

    #[test]
    fn test_unsigned_normalization_range() {
        let ty = ComponentType::UnsignedByte;
        assert_eq!(ty.read(&[0], 0, true), 0.0);
        assert_eq!(ty.read(&[255], 0, true), 1.0);
        assert!((ty.read(&[128], 0, true) - 128.0 / 255.0).abs() < 1e-6);

        let ty = ComponentType::UnsignedShort;
        assert_eq!(ty.read(&u16::MAX.to_le_bytes(), 0, true), 1.0);

        let ty = ComponentType::UnsignedInt;
        assert_eq!(ty.read(&u32::MAX.to_le_bytes(), 0, true), 1.0);
        assert_eq!(ty.read(&0u32.to_le_bytes(), 0, true), 0.0);
    }

    #[test]
    fn test_signed_normalization_range() {
        let ty = ComponentType::SignedByte;
        assert_eq!(ty.read(&[127], 0, true), 1.0);
        assert_eq!(ty.read(&(-127i8).to_le_bytes(), 0, true), -1.0);
        // -128 / 127 clamps to -1
        assert_eq!(ty.read(&i8::MIN.to_le_bytes(), 0, true), -1.0);

        let ty = ComponentType::SignedShort;
        assert_eq!(ty.read(&i16::MIN.to_le_bytes(), 0, true), -1.0);
        assert_eq!(ty.read(&i16::MAX.to_le_bytes(), 0, true), 1.0);

        let ty = ComponentType::SignedInt;
        for value in [i32::MIN, -1, 0, 1, i32::MAX] {
            let v = ty.read(&value.to_le_bytes(), 0, true);
            assert!((-1.0..=1.0).contains(&v), "{} -> {}", value, v);
        }
    }

    #[test]
    fn test_unnormalized_integers() {
        assert_eq!(ComponentType::UnsignedByte.read(&[200], 0, false), 200.0);
        assert_eq!(ComponentType::SignedByte.read(&[0xFF], 0, false), -1.0);
        assert_eq!(
            ComponentType::UnsignedShort.read(&1000u16.to_le_bytes(), 0, false),
            1000.0
        );
    }

    #[test]
    fn test_float_bit_identical() {
        for value in [0.0f32, -0.0, 1.5, -3.25e-7, f32::MAX, f32::MIN_POSITIVE] {
            let bytes = value.to_le_bytes();
            for normalized in [false, true] {
                let read = ComponentType::Float.read(&bytes, 0, normalized);
                assert_eq!(read.to_bits(), value.to_bits());
            }
        }
    }

    #[test]
    fn test_read_at_offset() {
        let mut bytes = vec![0xAA, 0xBB];
        bytes.extend_from_slice(&7u16.to_le_bytes());
        assert_eq!(ComponentType::UnsignedShort.read(&bytes, 2, false), 7.0);
    }
}
