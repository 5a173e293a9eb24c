// SVG word cloud.
//
// Words are ranked by frequency, sized between MIN_FONT and a maximum that
// scales with the canvas, and packed into rows from the top-left. Sizes
// follow the square root of the count ratio so a single dominant word does
// not shrink everything else to nothing. Whatever does not fit is dropped.

use std::fmt::Write as _;

use anyhow::Result;
use tracing::info;

use super::traits::CloudRenderer;
use crate::topics::frequency::TermFrequencyTable;

const MIN_FONT: f64 = 10.0;
/// Rough glyph advance as a fraction of the font size.
const GLYPH_WIDTH: f64 = 0.6;
const PADDING: f64 = 8.0;

/// Viridis stops, dark to light.
const PALETTE: &[&str] = &[
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b", "#fde725",
];

/// A word placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
}

pub struct SvgWordCloud {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
}

impl Default for SvgWordCloud {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            max_words: 100,
        }
    }
}

impl SvgWordCloud {
    fn max_font(&self) -> f64 {
        (self.height as f64 / 5.0).max(MIN_FONT)
    }

    /// Lay out the most frequent words. Deterministic for a given token stream.
    pub fn layout(&self, tokens: &[String]) -> Vec<PlacedWord> {
        let table = TermFrequencyTable::from_tokens(tokens.iter().cloned());
        let ranked = table.top(self.max_words);
        let Some(top_count) = ranked.first().map(|(_, c)| *c) else {
            return Vec::new();
        };

        let width = self.width as f64;
        let height = self.height as f64;
        let max_font = self.max_font();

        let mut placed = Vec::new();
        let mut x = PADDING;
        let mut row_top = PADDING;
        let mut row_height: f64 = 0.0;

        for (text, count) in ranked {
            let ratio = (count as f64 / top_count as f64).sqrt();
            let font_size = MIN_FONT + (max_font - MIN_FONT) * ratio;
            let word_width = text.chars().count() as f64 * font_size * GLYPH_WIDTH;

            if word_width + 2.0 * PADDING > width {
                continue;
            }
            if x + word_width + PADDING > width {
                x = PADDING;
                row_top += row_height + PADDING;
                row_height = 0.0;
            }
            if row_top + font_size + PADDING > height {
                // A smaller word further down the ranking may still fit.
                continue;
            }

            placed.push(PlacedWord {
                text,
                count,
                x,
                y: row_top + font_size,
                font_size,
            });
            x += word_width + PADDING;
            row_height = row_height.max(font_size);
        }

        placed
    }
}

impl CloudRenderer for SvgWordCloud {
    fn render(&self, tokens: &[String]) -> Result<Vec<u8>> {
        let words = self.layout(tokens);
        if words.is_empty() {
            anyhow::bail!("Not enough words to render a word cloud");
        }

        let mut svg = String::new();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        )?;
        writeln!(svg, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;

        for (rank, word) in words.iter().enumerate() {
            let color = PALETTE[rank * PALETTE.len() / words.len()];
            writeln!(
                svg,
                r#"  <text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="{:.1}" fill="{}">{}</text>"#,
                word.x,
                word.y,
                word.font_size,
                color,
                escape_xml(&word.text)
            )?;
        }
        svg.push_str("</svg>\n");

        info!(words = words.len(), bytes = svg.len(), "Rendered word cloud");
        Ok(svg.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
