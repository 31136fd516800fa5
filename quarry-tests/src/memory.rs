use async_stream::try_stream;
use quarry::{
    Driver, Error, Executor, GenericSqlWriter, Query, Result, RowLabeled, RowNames, Value,
    stream::Stream,
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

#[derive(Default, Debug, Clone, Copy)]
pub struct MemoryDriver {}

impl Driver for MemoryDriver {
    type SqlWriter = GenericSqlWriter;

    const NAME: &'static str = "memory";

    fn sql_writer(&self) -> GenericSqlWriter {
        GenericSqlWriter::new()
    }
}

/// Counters shared with the cursors handed out by a [`MemoryExecutor`].
#[derive(Default, Debug)]
pub struct CursorStats {
    opened: AtomicUsize,
    pulled: AtomicUsize,
    released: AtomicUsize,
}

impl CursorStats {
    /// Cursors that started producing rows.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
    /// Rows handed out, over all the cursors.
    pub fn pulled(&self) -> usize {
        self.pulled.load(Ordering::SeqCst)
    }
    /// Cursors dropped, exhausted or not.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

struct Cursor(Arc<CursorStats>);

impl Cursor {
    fn open(stats: Arc<CursorStats>) -> Self {
        stats.opened.fetch_add(1, Ordering::SeqCst);
        Self(stats)
    }
    fn pull(&self, row: RowLabeled) -> RowLabeled {
        self.0.pulled.fetch_add(1, Ordering::SeqCst);
        row
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        self.0.released.fetch_add(1, Ordering::SeqCst);
    }
}

type Responder = Box<dyn FnMut(&Query) -> Result<Vec<RowLabeled>> + Send>;

/// Executor answering every query through a closure, recording what it receives.
///
/// Like a real driver it rejects queries whose `?` placeholders do not match the
/// arguments bound, and it produces rows lazily, one per poll.
pub struct MemoryExecutor<D: Driver = MemoryDriver> {
    driver: D,
    responder: Responder,
    /// Every query received, in order.
    pub queries: Vec<Query>,
    stats: Arc<CursorStats>,
}

impl MemoryExecutor<MemoryDriver> {
    pub fn new<F>(responder: F) -> Self
    where
        F: FnMut(&Query) -> Result<Vec<RowLabeled>> + Send + 'static,
    {
        Self {
            driver: MemoryDriver {},
            responder: Box::new(responder),
            queries: Vec::new(),
            stats: Default::default(),
        }
    }
    /// Answers every query with the same rows.
    pub fn with_rows(rows: Vec<RowLabeled>) -> Self {
        Self::new(move |_| Ok(rows.clone()))
    }
    /// Answers every query with `table` filtered by `columns`, each compared with
    /// the argument at the same position.
    pub fn with_table(table: MemoryTable, columns: &'static [&'static str]) -> Self {
        Self::new(move |query| {
            Ok(table.select(columns.iter().copied().zip(&query.arguments)))
        })
    }
}

impl<D: Driver> MemoryExecutor<D> {
    pub fn with_driver<Other: Driver>(self, driver: Other) -> MemoryExecutor<Other> {
        MemoryExecutor {
            driver,
            responder: self.responder,
            queries: self.queries,
            stats: self.stats,
        }
    }
    pub fn stats(&self) -> &CursorStats {
        &self.stats
    }
    /// SQL text of the queries received, in order.
    pub fn sql(&self) -> Vec<&str> {
        self.queries.iter().map(|q| q.sql.as_str()).collect()
    }
}

impl<D: Driver> Executor for MemoryExecutor<D> {
    type Driver = D;

    fn driver(&self) -> &Self::Driver {
        &self.driver
    }

    fn fetch(&mut self, query: Query) -> impl Stream<Item = Result<RowLabeled>> + Send {
        log::trace!("{}", query);
        let placeholders = query.sql.matches('?').count();
        let result = if placeholders != query.arguments.len() {
            Err(Error::msg(format!(
                "Query expects {} arguments but {} were bound",
                placeholders,
                query.arguments.len()
            )))
        } else {
            (self.responder)(&query)
        };
        self.queries.push(query);
        let stats = self.stats.clone();
        try_stream! {
            let cursor = Cursor::open(stats);
            for row in result? {
                yield cursor.pull(row);
            }
        }
    }
}

/// Rows sharing the same labels, a stand-in for a table.
#[derive(Debug, Clone)]
pub struct MemoryTable {
    pub labels: RowNames,
    pub rows: Vec<Box<[Value]>>,
}

impl MemoryTable {
    pub fn new<const N: usize>(
        labels: [&str; N],
        rows: impl IntoIterator<Item = [Value; N]>,
    ) -> Self {
        Self {
            labels: labels.iter().map(|v| v.to_string()).collect(),
            rows: rows.into_iter().map(|v| v.into()).collect(),
        }
    }
    pub fn rows(&self) -> Vec<RowLabeled> {
        self.rows
            .iter()
            .map(|v| RowLabeled::new(self.labels.clone(), v.clone()))
            .collect()
    }
    /// Rows where every column equals the paired value.
    pub fn select<'a>(
        &self,
        conditions: impl IntoIterator<Item = (&'a str, &'a Value)> + Clone,
    ) -> Vec<RowLabeled> {
        self.rows()
            .into_iter()
            .filter(|row| {
                conditions
                    .clone()
                    .into_iter()
                    .all(|(column, value)| row.get_column(column) == Some(value))
            })
            .collect()
    }
}
