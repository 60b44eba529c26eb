//! Parser configuration

/// Default maximum element nesting depth
pub const DEFAULT_MAX_DEPTH: u16 = 128;
/// Default maximum input size in bytes
pub const DEFAULT_MAX_SIZE: usize = 10 * 1024 * 1024;

/// How close tags that don't match the innermost open element are handled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CloseTagPolicy {
    /// Close the nearest open element with that name (ASCII
    /// case-insensitive), closing everything opened after it. Close tags
    /// matching nothing are ignored and elements left open at the end of
    /// input are closed there.
    #[default]
    Lenient,
    /// Reject mismatched, unexpected and missing close tags
    Strict,
}

/// How text that shares a parent with other children is folded
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MixedContent {
    /// Group every child under its own key
    #[default]
    Grouped,
    /// After the first text child, later children go to the `""` list as
    /// single-entry structs so their position relative to the text is kept
    Ordered,
}

/// Configuration for [`crate::from_xml_with_config`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
    pub close_tags: CloseTagPolicy,
    pub mixed_content: MixedContent,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE)
    }
}

impl Config {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self::new(0, 0)
    }

    /// Create a new config with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
            close_tags: CloseTagPolicy::Lenient,
            mixed_content: MixedContent::Grouped,
        }
    }

    pub const fn with_close_tags(mut self, policy: CloseTagPolicy) -> Self {
        self.close_tags = policy;
        self
    }

    pub const fn with_mixed_content(mut self, mode: MixedContent) -> Self {
        self.mixed_content = mode;
        self
    }

    pub(crate) fn depth_exceeded(&self, depth: usize) -> bool {
        let max = usize::from(self.max_depth);
        max > 0 && depth > max
    }

    pub(crate) const fn size_exceeded(&self, len: usize) -> bool {
        self.max_size > 0 && len > self.max_size
    }
}
