use serde::Serialize;

/// Fraction of the window a delimiter must reach before it is used as a cut
const MIN_CUT_RATIO: f64 = 0.5;

/// One provider-sized slice of a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub content: String,
    pub index: usize,
    pub total: usize,
}

impl Segment {
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }
}

/// Split `text` into segments of roughly `max_size` characters.
///
/// Each cut prefers the last newline starting at or before offset `max_size`,
/// then the last ". " starting there, and falls back to a hard cut at exactly
/// `max_size`. A delimiter found in the first half of the window is ignored.
/// Delimiters stay with the segment they end, so a segment can exceed
/// `max_size` by the delimiter width, and joining all segments gives back
/// `text` exactly.
pub fn split(text: &str, max_size: usize) -> Vec<Segment> {
    let max_size = max_size.max(1);
    let chars: Vec<char> = text.chars().collect();
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    let mut pieces: Vec<&str> = Vec::new();
    let mut start = 0;

    while chars.len() - start > max_size {
        let cut = find_cut(&chars[start..], max_size);
        pieces.push(&text[boundaries[start]..boundaries[start + cut]]);
        start += cut;
    }

    if start < chars.len() {
        pieces.push(&text[boundaries[start]..]);
    }

    let total = pieces.len();
    pieces
        .into_iter()
        .enumerate()
        .map(|(index, content)| Segment {
            content: content.to_string(),
            index,
            total,
        })
        .collect()
}

/// Length in characters of the next segment taken from `rest`, which is
/// longer than `max_size`
fn find_cut(rest: &[char], max_size: usize) -> usize {
    let threshold = max_size as f64 * MIN_CUT_RATIO;
    let late_enough = |offset: &usize| *offset as f64 >= threshold;

    let newline = rest[..(max_size + 1).min(rest.len())]
        .iter()
        .rposition(|&c| c == '\n')
        .filter(late_enough)
        .map(|offset| offset + 1);

    newline
        .or_else(|| {
            rest[..(max_size + 2).min(rest.len())]
                .windows(2)
                .rposition(|pair| pair == ['.', ' '])
                .filter(late_enough)
                .map(|offset| offset + 2)
        })
        .unwrap_or(max_size)
}
