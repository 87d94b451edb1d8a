// src/types.rs
use crate::utils::native_byte_order;
use std::fmt;

/// Byte order requested for a conversion or declared by a tagged array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Whatever the executing CPU uses
    #[default]
    Native,
    Little,
    Big,
}

impl ByteOrder {
    /// Replace `Native` with the concrete order of this platform.
    ///
    /// The result is always `Little` or `Big`.
    pub fn resolve(self) -> ByteOrder {
        match self {
            ByteOrder::Native => native_byte_order(),
            other => other,
        }
    }

    /// The second magic byte for this order
    pub fn magic_byte(self) -> u8 {
        match self {
            ByteOrder::Native => b'N',
            ByteOrder::Little => b'L',
            ByteOrder::Big => b'B',
        }
    }

    /// Parse the second magic byte. Only concrete orders appear on the wire.
    pub fn from_magic_byte(byte: u8) -> Option<Self> {
        match byte {
            b'L' => Some(ByteOrder::Little),
            b'B' => Some(ByteOrder::Big),
            _ => None,
        }
    }

    pub fn is_big_endian(self) -> bool {
        self.resolve() == ByteOrder::Big
    }
}

/// Describes one scalar numeric kind as it appears in a tagged array.
///
/// Every valid (floating point, byte order, size) triple has exactly one
/// instance, living in a static table; obtain them through [`ElementEncoding::lookup`]
/// or [`ElementEncoding::from_magic`]. The three-byte magic is derived from the
/// fields, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementEncoding {
    floating_point: bool,
    byte_order: ByteOrder,
    size_in_bytes: u8,
}

const fn enc(floating_point: bool, byte_order: ByteOrder, size_in_bytes: u8) -> ElementEncoding {
    ElementEncoding {
        floating_point,
        byte_order,
        size_in_bytes,
    }
}

static ENCODINGS: [ElementEncoding; 12] = [
    enc(true, ByteOrder::Little, 4),
    enc(true, ByteOrder::Little, 8),
    enc(true, ByteOrder::Big, 4),
    enc(true, ByteOrder::Big, 8),
    enc(false, ByteOrder::Little, 1),
    enc(false, ByteOrder::Little, 2),
    enc(false, ByteOrder::Little, 4),
    enc(false, ByteOrder::Little, 8),
    enc(false, ByteOrder::Big, 1),
    enc(false, ByteOrder::Big, 2),
    enc(false, ByteOrder::Big, 4),
    enc(false, ByteOrder::Big, 8),
];

impl ElementEncoding {
    pub const MAGIC_LEN: usize = 3;
    pub const FLOAT_MARKER: u8 = b'F';
    pub const INTEGER_MARKER: u8 = b'I';

    /// Find the encoding for an exact triple. `Native` is resolved first;
    /// sizes are never coerced.
    pub fn lookup(
        floating_point: bool,
        byte_order: ByteOrder,
        size_in_bytes: usize,
    ) -> Option<&'static ElementEncoding> {
        let byte_order = byte_order.resolve();
        ENCODINGS.iter().find(|e| {
            e.floating_point == floating_point
                && e.byte_order == byte_order
                && e.size_in_bytes as usize == size_in_bytes
        })
    }

    /// Parse a three-byte magic. Returns `None` for anything that is not a known encoding.
    pub fn from_magic(magic: &[u8]) -> Option<&'static ElementEncoding> {
        if magic.len() < Self::MAGIC_LEN {
            return None;
        }
        let floating_point = match magic[0] {
            Self::FLOAT_MARKER => true,
            Self::INTEGER_MARKER => false,
            _ => return None,
        };
        let byte_order = ByteOrder::from_magic_byte(magic[1])?;
        Self::lookup(floating_point, byte_order, magic[2] as usize)
    }

    /// All encodings known to the format
    pub fn all() -> &'static [ElementEncoding] {
        &ENCODINGS
    }

    pub fn is_floating_point(&self) -> bool {
        self.floating_point
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn size_in_bytes(&self) -> usize {
        self.size_in_bytes as usize
    }

    pub fn magic(&self) -> [u8; 3] {
        [
            if self.floating_point {
                Self::FLOAT_MARKER
            } else {
                Self::INTEGER_MARKER
            },
            self.byte_order.magic_byte(),
            self.size_in_bytes,
        ]
    }

    /// Short type name, e.g. `f32` or `i16`
    pub fn type_name(&self) -> &'static str {
        match (self.floating_point, self.size_in_bytes) {
            (true, 4) => "f32",
            (true, _) => "f64",
            (false, 1) => "i8",
            (false, 2) => "i16",
            (false, 4) => "i32",
            (false, _) => "i64",
        }
    }
}

impl fmt::Display for ElementEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = match self.byte_order {
            ByteOrder::Big => "be",
            _ => "le",
        };
        write!(f, "{}_{}", self.type_name(), order)
    }
}
