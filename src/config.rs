//! Parser configuration: limits applied before and while tokenizing the XML text.

/// Configuration for [`parse_with_config`](crate::parse_with_config).
///
/// Parsing is synchronous and cannot be cancelled, so bounding the input is the
/// caller's only lever on parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Accept a `<!DOCTYPE>` declaration. Entity expansion stays bounded by `roxmltree`.
    pub allow_dtd: bool,
    /// Maximum number of tree nodes the tokenizer may allocate.
    pub nodes_limit: u32,
    /// Reject inputs longer than this many bytes before tokenizing.
    pub max_input_len: Option<usize>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            allow_dtd: false,
            nodes_limit: u32::MAX,
            max_input_len: None,
        }
    }
}

impl ParserConfig {
    pub fn with_allow_dtd(mut self, allow: bool) -> Self {
        self.allow_dtd = allow;
        self
    }

    pub fn with_nodes_limit(mut self, limit: u32) -> Self {
        self.nodes_limit = limit;
        self
    }

    pub fn with_max_input_len(mut self, max: usize) -> Self {
        self.max_input_len = Some(max);
        self
    }

    pub(crate) fn xml_options(&self) -> roxmltree::ParsingOptions {
        let mut opts = roxmltree::ParsingOptions::default();
        opts.allow_dtd = self.allow_dtd;
        opts.nodes_limit = self.nodes_limit;
        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded_without_dtd() {
        let c = ParserConfig::default();
        assert!(!c.allow_dtd);
        assert_eq!(c.nodes_limit, u32::MAX);
        assert!(c.max_input_len.is_none());
    }

    #[test]
    fn setters_chain() {
        let c = ParserConfig::default()
            .with_allow_dtd(true)
            .with_nodes_limit(64)
            .with_max_input_len(1024);
        assert!(c.allow_dtd);
        assert_eq!(c.nodes_limit, 64);
        assert_eq!(c.max_input_len, Some(1024));
        let opts = c.xml_options();
        assert!(opts.allow_dtd);
        assert_eq!(opts.nodes_limit, 64);
    }
}
