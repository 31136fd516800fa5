use crate::{Driver, Query, Result, RowLabeled, stream::Stream};

/// The statement execution facility: runs SQL and produces rows.
///
/// The returned stream is a live cursor. It is pulled lazily, at most once, and
/// it must release the underlying statement when dropped, even before it is
/// exhausted. Failures (malformed SQL, argument count mismatch, I/O) are
/// yielded as `Err` items.
pub trait Executor: Send + Sized {
    type Driver: Driver;

    fn driver(&self) -> &Self::Driver;

    /// Execute the query and returns the rows.
    fn fetch(&mut self, query: Query) -> impl Stream<Item = Result<RowLabeled>> + Send;
}
