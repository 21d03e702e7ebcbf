pub mod language;
pub mod markers;
pub mod proofread;
pub mod segmenter;

pub use language::{resolve_language, LanguageHint};
pub use markers::{catalog, extract_markers, format_marker, Intensity, Marker, MarkerCatalog, MarkerCategory};
pub use proofread::ProofreadService;
pub use segmenter::{split, Segment};
