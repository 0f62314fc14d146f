//! # lelei — XML protocol definitions to a typed AST
//!
//! Front end of a protocol codec generator: reads a declarative XML description of
//! a binary protocol (identity, one structure of bit-width fields, a header naming
//! the id field, an optional enumeration) and produces a validated [`Document`].
//! Code generators consume the AST; nothing here touches the wire.
//!
//! ## Document shape
//!
//! ```text
//! <protocol>
//!   <protocolname>Lelei Protocol</protocolname>
//!   <protocolshort>lelei</protocolshort>
//!   <structure>
//!     <byte_order>big_endian</byte_order>
//!     <fields>
//!       <field name="PacketID" type="uint16" bits="16"/>
//!     </fields>
//!     <name>stdUDPHeader</name>
//!   </structure>
//!   <header>
//!     <name>muhheader</name>
//!     <id_field_name>PacketID</id_field_name>
//!   </header>
//!   <enum>
//!     <name>messageid_enum</name>
//!     <values>
//!       <value id="0x64">Hello</value>
//!     </values>
//!   </enum>
//! </protocol>
//! ```
//!
//! ## Defaults
//!
//! - `protocolshort` absent: the name itself for one word, else lower-cased initials (`proto name` → `pn`).
//! - `byte_order` absent: `big_endian`. Only `big_endian`, `little_endian`, `as_host` are accepted.
//! - `fields` / `values` absent: empty lists. `enum` absent: `None`.
//!
//! ## Errors
//!
//! [`ParseError::Structural`] when the document has the wrong shape (bad XML, missing
//! header), [`ParseError::Value`] when a present value is unusable (unknown byte
//! order, bad enum id, missing protocol name).

pub mod ast;
pub mod config;
pub mod dump;
pub mod error;
pub mod parser;

pub use ast::{ByteOrder, Document, Enum, EnumValue, Field, Header, ProtocolInfo, Structure};
pub use config::ParserConfig;
pub use error::{ParseError, StructuralError, ValueError};
pub use parser::{
    header_idfield, parse, parse_document, parse_enum, parse_enum_pair, parse_field,
    parse_id_literal, parse_structure, parse_with_config, protocol_info, struct_byteorder,
};
