//! Chinese word segmentation behind an explicit, shareable handle.
//!
//! The same segmenter instance is used at corpus-validation time and at query
//! time, so token sequences line up between the two. Constructing the jieba
//! dictionary is expensive; build one `Segmenter` at process start and pass it
//! by reference (no lazy globals).

use jieba_rs::Jieba;

/// Word segmenter for Chinese domain text.
pub struct Segmenter {
    jieba: Jieba,
}

impl Segmenter {
    /// Create a segmenter with the default dictionary.
    pub fn new() -> Self {
        Self { jieba: Jieba::new() }
    }

    /// Segment `text` into words. Deterministic for a fixed dictionary.
    pub fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.jieba.cut(text, true)
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Segmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Segmenter").finish_non_exhaustive()
    }
}
