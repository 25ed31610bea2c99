const DEFAULT_CHUNK_CHARS: usize = 1000;
const DEFAULT_OVERLAP_CHARS: usize = 200;

/// Overlapping window splitter feeding the language model one chunk at a time.
///
/// A cut prefers the last newline inside the window, then the last space, and
/// only falls back to a hard cut when the window contains neither. Successive
/// chunks overlap so a mention spanning a cut still appears whole in at least
/// one chunk.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    chunk_chars: usize,
    overlap_chars: usize,
}

impl TextChunker {
    pub fn new(chunk_chars: usize, overlap_chars: usize) -> Self {
        let chunk_chars = chunk_chars.max(1);
        let overlap_chars = overlap_chars.min(chunk_chars.saturating_sub(1));

        Self {
            chunk_chars,
            overlap_chars,
        }
    }

    pub fn chunk_chars(&self) -> usize {
        self.chunk_chars
    }

    pub fn overlap_chars(&self) -> usize {
        self.overlap_chars
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }
        if chars.len() <= self.chunk_chars {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;
        loop {
            let window_end = (start + self.chunk_chars).min(chars.len());
            let end = if window_end == chars.len() {
                window_end
            } else {
                self.cut_point(&chars, start, window_end)
            };

            chunks.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start = end.saturating_sub(self.overlap_chars).max(start + 1);
        }
        chunks
    }

    // The cut may not retreat past chunk - overlap, so every chunk keeps at
    // least the non-overlapping portion of its window.
    fn cut_point(&self, chars: &[char], start: usize, window_end: usize) -> usize {
        let floor = (start + self.chunk_chars - self.overlap_chars)
            .min(window_end.saturating_sub(1))
            .max(start + 1);

        for separator in ['\n', ' '] {
            if let Some(offset) = chars[floor..window_end]
                .iter()
                .rposition(|c| *c == separator)
            {
                return floor + offset + 1;
            }
        }
        window_end
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_CHARS, DEFAULT_OVERLAP_CHARS)
    }
}
