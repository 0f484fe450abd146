//! Tests for the streaming KML extractor.
