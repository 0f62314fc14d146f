//! Abstract Syntax Tree for XML protocol definitions.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Root of a parsed protocol definition: identity, structure, header and optional enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub proto: ProtocolInfo,
    pub structure: Structure,
    pub header: Header,
    /// `None` when the document declares no `<enum>` section.
    pub enumeration: Option<Enum>,
}

impl Document {
    /// The structure field the header designates as the message id, if it is declared.
    pub fn id_field(&self) -> Option<&Field> {
        self.structure.field(&self.header.id_field_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolInfo {
    pub proto_name: String,
    /// Explicit `<protocolshort>` (surrounding whitespace trimmed, blank treated as absent)
    /// or derived from `proto_name`. Never empty.
    pub proto_short: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    pub name: String,
    pub byte_order: ByteOrder,
    /// Declaration order; generators lay out bits sequentially from the first field.
    pub fields: Vec<Field>,
}

impl Structure {
    /// First field with the given name. Duplicate names are not rejected by the parser.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Sum of all field widths in bits. No alignment is implied.
    pub fn total_bits(&self) -> u64 {
        self.fields.iter().map(|f| u64::from(f.bits)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    /// Protocol-defined primitive type name (e.g. `uint32`), kept verbatim.
    pub ty: String,
    pub bits: u32,
}

/// Byte order applied when laying out a structure's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    #[default]
    BigEndian,
    LittleEndian,
    /// Native order of the platform running the generated code.
    AsHost,
}

impl ByteOrder {
    /// Token as written in `<byte_order>`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ByteOrder::BigEndian => "big_endian",
            ByteOrder::LittleEndian => "little_endian",
            ByteOrder::AsHost => "as_host",
        }
    }

    /// Resolve to a concrete order; `AsHost` follows the target this crate was built for.
    pub fn is_big_endian(&self) -> bool {
        match self {
            ByteOrder::BigEndian => true,
            ByteOrder::LittleEndian => false,
            ByteOrder::AsHost => cfg!(target_endian = "big"),
        }
    }
}

impl FromStr for ByteOrder {
    type Err = ValueError;

    /// Exact, case-sensitive match on the three wire tokens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "big_endian" => Ok(ByteOrder::BigEndian),
            "little_endian" => Ok(ByteOrder::LittleEndian),
            "as_host" => Ok(ByteOrder::AsHost),
            other => Err(ValueError::UnknownByteOrder(other.to_string())),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    /// Name of the structure field carrying the message id. Not cross-checked at parse time.
    pub id_field_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
}

impl Enum {
    /// Label of the first value with the given id.
    pub fn label(&self, id: u64) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub id: u64,
    pub name: String,
}
