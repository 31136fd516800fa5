use crate::{
    AsValue, Executor, Query, Result, RowLabeled,
    future::FutureExt,
    stream::{Stream, StreamExt, TryStreamExt},
};
use std::{future::Future, pin::pin};

/// Single column value that can be fetched from SQL.
///
/// Each row produces the value of its leftmost column. A row without columns and
/// a NULL cell both produce `None`: at this level the two cases are the same
/// result. Implemented for every [`AsValue`] type.
pub trait Scalar: AsValue + Send + Sized {
    /// Lazy, single pass stream of values, one per row pulled from the cursor.
    fn fetch<Exec: Executor>(
        executor: &mut Exec,
        query: impl Into<Query>,
    ) -> impl Stream<Item = Result<Option<Self>>> + Send {
        executor
            .fetch(query.into())
            .map(|row| row.and_then(scalar_from_row::<Self>))
    }

    /// All the values, in row order.
    fn fetch_all<Exec: Executor>(
        executor: &mut Exec,
        query: impl Into<Query>,
    ) -> impl Future<Output = Result<Vec<Option<Self>>>> + Send {
        Self::fetch(executor, query).try_collect()
    }

    /// The value of the first row, pulling at most one row. An empty result is `None`.
    fn fetch_one<Exec: Executor>(
        executor: &mut Exec,
        query: impl Into<Query>,
    ) -> impl Future<Output = Result<Option<Self>>> + Send {
        let stream = Self::fetch(executor, query);
        async move {
            pin!(stream)
                .into_future()
                .map(|(v, _)| v)
                .await
                .transpose()
                .map(Option::flatten)
        }
    }
}

impl<T: AsValue + Send> Scalar for T {}

fn scalar_from_row<T: AsValue>(row: RowLabeled) -> Result<Option<T>> {
    match row.into_first() {
        Some(value) => Option::<T>::try_from_value(value),
        None => Ok(None),
    }
}
