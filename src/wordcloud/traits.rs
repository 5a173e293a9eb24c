use anyhow::Result;

/// Turns a token stream into an encoded image.
pub trait CloudRenderer {
    /// Render `tokens` (lowercase, stop-words removed, duplicates kept).
    fn render(&self, tokens: &[String]) -> Result<Vec<u8>>;

    /// File extension matching the encoded output.
    fn extension(&self) -> &'static str;

    /// Output file used when none is given.
    fn default_file_name(&self) -> String {
        format!("wordcloud.{}", self.extension())
    }
}
