// Word-cloud rendering, compiled only with the `wordcloud` feature.
//
// The crawler hands a renderer the filtered token stream and gets image bytes
// back. Layout and styling are entirely the renderer's business.

pub mod svg;
pub mod traits;
