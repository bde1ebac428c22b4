//! Configuration options for tokenizing and rendering

/// Options shared by the tokenizer (attribute values) and the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// Separator placed between block-level results of the root
    pub block_separator: String,

    /// Style for `*text*`
    pub italic_style: String,

    /// Style for `**text**`
    pub bold_style: String,

    /// Style for `***text***`
    pub bold_italic_style: String,

    /// Style for `~~text~~`
    pub strikethrough_style: String,

    /// Class for inline code spans and fenced code blocks
    pub code_class: String,
}

impl Options {
    /// Style for an emphasis run of `run_len` asterisks, if that run is supported
    pub fn emphasis_style(&self, run_len: usize) -> Option<&str> {
        match run_len {
            1 => Some(&self.italic_style),
            2 => Some(&self.bold_style),
            3 => Some(&self.bold_italic_style),
            _ => None,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            block_separator: "\n".to_string(),
            italic_style: "font-style: italic;".to_string(),
            bold_style: "font-weight: bold;".to_string(),
            bold_italic_style: "font-style: italic; font-weight: bold;".to_string(),
            strikethrough_style: "text-decoration: line-through;".to_string(),
            code_class: "render-code".to_string(),
        }
    }
}
