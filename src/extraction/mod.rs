//! Section segmentation and heuristic field extraction

pub mod lines;
pub mod patterns;
pub mod contact;
pub mod segmenter;
pub mod education;
pub mod skills;
pub mod extractor;

pub use contact::ContactFields;
pub use extractor::{ExtractionResult, ResumeExtractor};
pub use patterns::{PatternLibrary, SectionKey};
pub use segmenter::{HeaderPolicy, LineJoin, SegmentOptions};
