//! Format a parsed document for display (dump text). Shows bit offsets and the id field resolution.

use std::fmt::Write;

use crate::ast::{Document, Enum, EnumValue, Field};

/// Render the whole document as an indented tree.
pub fn format_document(doc: &Document) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "protocol {:?} (short {:?})",
        doc.proto.proto_name, doc.proto.proto_short
    );
    let s = &doc.structure;
    let _ = writeln!(
        out,
        "  structure {} [{}] {} field(s), {} bit(s)",
        s.name,
        s.byte_order,
        s.fields.len(),
        s.total_bits()
    );
    let mut offset = 0u64;
    for f in &s.fields {
        let _ = writeln!(out, "    {}", format_field(f, offset));
        offset += u64::from(f.bits);
    }
    let id = match doc.id_field() {
        Some(f) => format!("{} ({}, {} bits)", f.name, f.ty, f.bits),
        None => format!("{} (not a structure field)", doc.header.id_field_name),
    };
    let _ = writeln!(out, "  header {} id={}", doc.header.name, id);
    match &doc.enumeration {
        Some(e) => out.push_str(&format_enum(e)),
        None => out.push_str("  enum: none\n"),
    }
    out
}

/// One field line: `@offset name: type (bits)`.
pub fn format_field(f: &Field, bit_offset: u64) -> String {
    format!("@{:<4} {}: {} ({} bits)", bit_offset, f.name, f.ty, f.bits)
}

/// Enum header line followed by one line per value, hex and decimal.
pub fn format_enum(e: &Enum) -> String {
    let mut out = format!("  enum {} {} value(s)\n", e.name, e.values.len());
    for v in &e.values {
        let _ = writeln!(out, "    {}", format_enum_value(v));
    }
    out
}

fn format_enum_value(v: &EnumValue) -> String {
    format!("{:#x} ({}) = {}", v.id, v.id, v.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    fn sample(enumeration: Option<Enum>) -> Document {
        Document {
            proto: ProtocolInfo {
                proto_name: "Lelei Protocol".to_string(),
                proto_short: "lelei".to_string(),
            },
            structure: Structure {
                name: "hdr".to_string(),
                byte_order: ByteOrder::LittleEndian,
                fields: vec![
                    Field { name: "Kind".to_string(), ty: "uint8".to_string(), bits: 4 },
                    Field { name: "Flags".to_string(), ty: "uint8".to_string(), bits: 4 },
                    Field { name: "Id".to_string(), ty: "uint16".to_string(), bits: 16 },
                ],
            },
            header: Header {
                name: "h".to_string(),
                id_field_name: "Id".to_string(),
            },
            enumeration,
        }
    }

    #[test]
    fn field_offsets_accumulate() {
        let text = format_document(&sample(None));
        assert!(text.contains("structure hdr [little_endian] 3 field(s), 24 bit(s)"));
        assert!(text.contains("@0    Kind: uint8 (4 bits)"));
        assert!(text.contains("@4    Flags: uint8 (4 bits)"));
        assert!(text.contains("@8    Id: uint16 (16 bits)"));
        assert!(text.contains("header h id=Id (uint16, 16 bits)"));
        assert!(text.ends_with("  enum: none\n"));
    }

    #[test]
    fn unresolved_id_field_is_shown() {
        let mut doc = sample(None);
        doc.header.id_field_name = "Missing".to_string();
        assert!(format_document(&doc).contains("id=Missing (not a structure field)"));
    }

    #[test]
    fn enum_values_hex_and_decimal() {
        let e = Enum {
            name: "kinds".to_string(),
            values: vec![
                EnumValue { id: 0x300, name: "w00t".to_string() },
                EnumValue { id: 7, name: "seven".to_string() },
            ],
        };
        let text = format_document(&sample(Some(e)));
        assert!(text.contains("enum kinds 2 value(s)"));
        assert!(text.contains("0x300 (768) = w00t"));
        assert!(text.contains("0x7 (7) = seven"));
    }
}
