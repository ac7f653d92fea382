use std::{error, fmt};

pub const MAGIC: u32 = 0x0723_0203;
/// magic, version, generator, bound, schema.
pub const HEADER_WORDS: usize = 5;

pub static TRIANGLE_VERT: &[u8] = include_bytes!("../shaders/triangle.vert.spv");
pub static TRIANGLE_FRAG: &[u8] = include_bytes!("../shaders/triangle.frag.spv");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    TooShort { len: usize },
    Misaligned { len: usize },
    BadMagic { word: u32 },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { len } => f.write_fmt(format_args!(
                "spir-v module is too short ({len} bytes, header needs {})",
                HEADER_WORDS * 4
            )),
            Self::Misaligned { len } => f.write_fmt(format_args!(
                "spir-v module length ({len} bytes) is not a multiple of 4"
            )),
            Self::BadMagic { word } => {
                f.write_fmt(format_args!("invalid spir-v magic number {word:#010x}"))
            }
        }
    }
}

/// a spir-v binary with a validated header. the driver still validates the rest when the binary
/// is loaded.
#[derive(Debug, Clone, Copy)]
pub struct Module<'a> {
    bytes: &'a [u8],
    pub endianness: Endianness,
    pub version: (u8, u8),
    pub generator: u32,
    /// every id in the module is below this.
    pub bound: u32,
}

impl<'a> Module<'a> {
    pub fn parse(bytes: &'a [u8]) -> Result<Self, Error> {
        let len = bytes.len();
        if len < HEADER_WORDS * 4 {
            return Err(Error::TooShort { len });
        }
        if len % 4 != 0 {
            return Err(Error::Misaligned { len });
        }

        let word_le = |index: usize| {
            let offset = index * 4;
            u32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };
        let endianness = match word_le(0) {
            MAGIC => Endianness::Little,
            word if word.swap_bytes() == MAGIC => Endianness::Big,
            word => return Err(Error::BadMagic { word }),
        };
        let word = |index: usize| match endianness {
            Endianness::Little => word_le(index),
            Endianness::Big => word_le(index).swap_bytes(),
        };

        // NOTE: version word is laid out as 0x00MMmm00.
        let version = word(1);
        Ok(Self {
            bytes,
            endianness,
            version: ((version >> 16) as u8, (version >> 8) as u8),
            generator: word(2),
            bound: word(3),
        })
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn word_count(&self) -> usize {
        self.bytes.len() / 4
    }
}
