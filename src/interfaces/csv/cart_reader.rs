use crate::domain::cart::CartLine;
use crate::error::{CheckoutError, Result};
use std::io::Read;

/// Reads cart lines from a CSV source.
///
/// Wraps `csv::Reader` and provides an iterator over `Result<CartLine>`,
/// trimming whitespace and tolerating records of varying length. Expected
/// columns: `id,name,restaurant,price,quantity` (descriptive columns
/// optional).
pub struct CartReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CartReader<R> {
    /// Creates a new `CartReader` from any `Read` source (e.g. File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and deserializes cart lines.
    pub fn lines(self) -> impl Iterator<Item = Result<CartLine>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CheckoutError::from))
    }
}
