//! The destination contract shared by every output.

use health_model::MergedRecord;

use crate::error::Result;

/// A destination for merged rows.
///
/// Writing is two explicit steps: [`Sink::clear`] empties the destination and
/// [`Sink::append`] adds rows to it. Running both on the same rows always
/// leaves the same contents behind.
pub trait Sink {
    /// Short label used in logs and summaries.
    fn describe(&self) -> String;

    /// Removes any previous contents and prepares an empty destination.
    fn clear(&mut self) -> Result<()>;

    /// Adds rows after whatever is already present. Returns the count written.
    fn append(&mut self, records: &[MergedRecord]) -> Result<usize>;

    /// Clear followed by append.
    fn replace(&mut self, records: &[MergedRecord]) -> Result<usize> {
        self.clear()?;
        let written = self.append(records)?;
        tracing::info!(sink = %self.describe(), rows = written, "sink replaced");
        Ok(written)
    }
}
