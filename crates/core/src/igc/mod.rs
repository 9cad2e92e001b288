//! IGC module - track source validation, parsing and extraction.

mod extractor;
mod parser;

pub use extractor::{validate_source_url, ExtractedTrack, HttpTrackExtractor, TrackExtractorTrait};
pub use parser::{parse_igc, Fix, IgcFlight};
