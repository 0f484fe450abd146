//! Raw per-parameter value series collected from one station block.

use std::collections::HashMap;

/// Accumulates the unparsed value tokens of one station, keyed by parameter
/// symbol. Tokens stay strings here; interpretation happens during assembly.
#[derive(Debug, Default)]
pub struct ElementTable {
    series: HashMap<String, Vec<String>>,
}

impl ElementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append tokens to a symbol's series, preserving arrival order.
    ///
    /// A symbol repeated in the document extends its existing series.
    pub fn append(&mut self, symbol: impl Into<String>, tokens: impl IntoIterator<Item = String>) {
        self.series.entry(symbol.into()).or_default().extend(tokens);
    }

    /// The collected tokens for a symbol, or `None` if it never appeared.
    pub fn series(&self, symbol: &str) -> Option<&[String]> {
        self.series.get(symbol).map(Vec::as_slice)
    }

    /// Number of distinct symbols collected.
    pub fn symbol_count(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
