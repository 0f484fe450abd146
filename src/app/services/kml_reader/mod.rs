//! Streaming MOSMIX KML extraction service
//!
//! Reads a MOSMIX KML bulletin in a single forward pass: the global forecast
//! time axis first, then one station block after another. Only the requested
//! stations are materialized; everything else is skipped event by event
//! without buffering the document.

pub mod element_table;
pub mod reader;

#[cfg(test)]
pub mod tests;

pub use element_table::ElementTable;
pub use reader::MosmixKmlReader;
