//! Parse XML protocol definitions into the AST.
//!
//! [`parse`] tokenizes the text with `roxmltree`, checks the root shape and hands
//! each section of the `<protocol>` element to its own sub-parser. The sub-parsers
//! are public and work on any `roxmltree::Node`, so callers holding a tree already
//! can use them directly.

use roxmltree::Node;
use tracing::{debug, trace};

use crate::ast::*;
use crate::config::ParserConfig;
use crate::error::{ParseError, StructuralError, ValueError};

const ROOT: &str = "protocol";
const STRUCTURE: &str = "structure";
const HEADER: &str = "header";
const ENUM: &str = "enum";

/// Parse protocol definition source into AST with the default configuration.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    parse_with_config(source, &ParserConfig::default())
}

/// Parse protocol definition source into AST.
pub fn parse_with_config(source: &str, config: &ParserConfig) -> Result<Document, ParseError> {
    if let Some(max) = config.max_input_len {
        if source.len() > max {
            return Err(StructuralError::InputTooLarge {
                len: source.len(),
                max,
            }
            .into());
        }
    }
    let tree = roxmltree::Document::parse_with_options(source, config.xml_options()).map_err(|e| {
        let pos = e.pos();
        StructuralError::Xml {
            row: pos.row,
            col: pos.col,
            message: e.to_string(),
        }
    })?;
    parse_document(tree.root_element())
}

/// Build the AST from the `<protocol>` root element of an already tokenized tree.
pub fn parse_document(root: Node) -> Result<Document, ParseError> {
    if root.tag_name().name() != ROOT {
        return Err(StructuralError::UnexpectedRoot(root.tag_name().name().to_string()).into());
    }
    // Shape checks come first so a document with no header is reported as such
    // even when its other sections hold bad values.
    child(root, STRUCTURE).ok_or(StructuralError::MissingSection(STRUCTURE))?;
    child(root, HEADER).ok_or(StructuralError::MissingSection(HEADER))?;

    let proto = protocol_info(root)?;
    let structure = parse_structure(root)?;
    let header = header_idfield(root)?;
    let enumeration = match child(root, ENUM) {
        Some(node) => Some(parse_enum(node)?),
        None => None,
    };
    debug!(
        proto = %proto.proto_name,
        fields = structure.fields.len(),
        has_enum = enumeration.is_some(),
        "parsed protocol document"
    );
    Ok(Document {
        proto,
        structure,
        header,
        enumeration,
    })
}

/// Protocol name and short name. The short name is derived when not given.
pub fn protocol_info(protocol: Node) -> Result<ProtocolInfo, ParseError> {
    let proto_name = child_text(protocol, "protocolname").ok_or(ValueError::MissingProtocolName)?;
    let proto_short = match child_text(protocol, "protocolshort") {
        Some(short) => short,
        None => {
            let short = derive_short_name(&proto_name);
            debug!(%proto_name, %short, "derived protocol short name");
            short
        }
    };
    Ok(ProtocolInfo {
        proto_name,
        proto_short,
    })
}

/// Single-word names are kept verbatim; otherwise the lower-cased initials of each word.
fn derive_short_name(name: &str) -> String {
    if !name.contains(char::is_whitespace) {
        return name.to_string();
    }
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Byte order of the structure section; `big_endian` when not declared.
pub fn struct_byteorder(protocol: Node) -> Result<ByteOrder, ParseError> {
    let text = child(protocol, STRUCTURE).and_then(|s| child_text(s, "byte_order"));
    let order = match text {
        None => ByteOrder::default(),
        Some(t) => t.parse::<ByteOrder>()?,
    };
    Ok(order)
}

/// Structure name, byte order and fields in declaration order.
pub fn parse_structure(protocol: Node) -> Result<Structure, ParseError> {
    let node = child(protocol, STRUCTURE).ok_or(StructuralError::MissingSection(STRUCTURE))?;
    let name = child_text(node, "name").ok_or(StructuralError::MissingElement {
        parent: STRUCTURE,
        child: "name",
    })?;
    let byte_order = struct_byteorder(protocol)?;
    let fields = match child(node, "fields") {
        Some(list) => elements(list, "field")
            .map(parse_field)
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };
    debug!(%name, %byte_order, fields = fields.len(), "parsed structure");
    Ok(Structure {
        name,
        byte_order,
        fields,
    })
}

/// One `<field name=".." type=".." bits="N"/>`.
pub fn parse_field(node: Node) -> Result<Field, ParseError> {
    let name = required_attr(node, "field", "name")?;
    let ty = required_attr(node, "field", "type")?;
    let literal = required_attr(node, "field", "bits")?;
    let bits = match literal.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => return Err(ValueError::InvalidBits { field: name, literal }.into()),
    };
    Ok(Field { name, ty, bits })
}

/// Header name and the name of the field carrying the message id.
///
/// A missing header, or one without both children, is a structural failure.
pub fn header_idfield(protocol: Node) -> Result<Header, ParseError> {
    let node = child(protocol, HEADER).ok_or(StructuralError::MissingSection(HEADER))?;
    let name = child_text(node, "name").ok_or(StructuralError::MissingElement {
        parent: HEADER,
        child: "name",
    })?;
    let id_field_name = child_text(node, "id_field_name").ok_or(StructuralError::MissingElement {
        parent: HEADER,
        child: "id_field_name",
    })?;
    debug!(%name, %id_field_name, "parsed header");
    Ok(Header {
        name,
        id_field_name,
    })
}

/// Named enumeration; values keep document order.
pub fn parse_enum(node: Node) -> Result<Enum, ParseError> {
    let name = child_text(node, "name").ok_or(ValueError::MissingText { element: "name" })?;
    let values = match child(node, "values") {
        Some(list) => elements(list, "value")
            .map(parse_enum_pair)
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };
    debug!(%name, values = values.len(), "parsed enum");
    Ok(Enum { name, values })
}

/// One `<value id="..">Label</value>`.
pub fn parse_enum_pair(node: Node) -> Result<EnumValue, ParseError> {
    let literal = required_attr(node, "value", "id")?;
    let id = parse_id_literal(&literal)?;
    let name = text(node).ok_or(ValueError::MissingText { element: "value" })?;
    trace!(id, %name, "enum value");
    Ok(EnumValue { id, name })
}

/// Integer literal: `0x` followed by hex digits is base 16, otherwise base 10.
pub fn parse_id_literal(literal: &str) -> Result<u64, ValueError> {
    let s = literal.trim();
    if let Some(digits) = s.strip_prefix("0x") {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return u64::from_str_radix(digits, 16)
                .map_err(|_| ValueError::InvalidEnumId(literal.to_string()));
        }
    }
    s.parse::<u64>()
        .map_err(|_| ValueError::InvalidEnumId(literal.to_string()))
}

// ==================== Tree lookups ====================

fn elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

fn child<'a, 'input: 'a>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
}

/// Direct text children joined (comments and processing instructions skipped, CDATA kept),
/// then trimmed; `None` when absent or blank.
fn text(node: Node) -> Option<String> {
    let joined: String = node
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn child_text(node: Node, tag: &str) -> Option<String> {
    child(node, tag).and_then(text)
}

fn required_attr(
    node: Node,
    element: &'static str,
    attribute: &'static str,
) -> Result<String, ValueError> {
    node.attribute(attribute)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ValueError::MissingAttribute { element, attribute })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_literal_decimal_and_hex() {
        assert_eq!(parse_id_literal("100"), Ok(100));
        assert_eq!(parse_id_literal("0x300"), Ok(768));
        assert_eq!(parse_id_literal("0xff"), Ok(255));
        assert_eq!(parse_id_literal(" 42 "), Ok(42));
        assert_eq!(parse_id_literal("0"), Ok(0));
    }

    #[test]
    fn id_literal_rejects_garbage() {
        for bad in ["asdf", "", "0x", "0xzz", "-5", "0X10", "1.5", "0x10000000000000000"] {
            assert_eq!(
                parse_id_literal(bad),
                Err(ValueError::InvalidEnumId(bad.to_string())),
                "literal {:?}",
                bad
            );
        }
    }

    #[test]
    fn short_name_derivation() {
        assert_eq!(derive_short_name("lelei"), "lelei");
        assert_eq!(derive_short_name("proto_name"), "proto_name");
        assert_eq!(derive_short_name("proto name"), "pn");
        assert_eq!(derive_short_name("Lelei  Wire\tProtocol"), "lwp");
    }

    #[test]
    fn text_is_trimmed_and_blank_is_absent() {
        let tree = roxmltree::Document::parse("<a><b>  x y </b><c>   </c></a>").unwrap();
        let root = tree.root_element();
        assert_eq!(child_text(root, "b").as_deref(), Some("x y"));
        assert_eq!(child_text(root, "c"), None);
        assert_eq!(child_text(root, "d"), None);
    }

    #[test]
    fn text_skips_comments_and_keeps_cdata() {
        let tree = roxmltree::Document::parse(
            "<a><b>Pack<!-- x -->et<?pi y?>ID</b><c><![CDATA[ Lelei Protocol ]]></c><d><!-- only --></d></a>",
        )
        .unwrap();
        let root = tree.root_element();
        assert_eq!(child_text(root, "b").as_deref(), Some("PacketID"));
        assert_eq!(child_text(root, "c").as_deref(), Some("Lelei Protocol"));
        assert_eq!(child_text(root, "d"), None);
    }
}
