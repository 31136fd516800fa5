use crate::{
    AsValue, Driver, Error, Executor, Key, Query, Result, RowLabeled, SqlWriter, TableDef,
    future::FutureExt,
    stream::{Stream, StreamExt, TryStreamExt},
};
use std::{any, future::Future, pin::pin};

/// Row-backed domain type that can be fetched from SQL.
///
/// Implementors provide the row-construction contract ([`Entity::from_row`]) and,
/// optionally, their table metadata ([`Entity::table`]). All the fetch operations
/// come for free. Usually implemented through `#[derive(Entity)]`.
///
/// The identity lookups (`fetch_one_by_primary_key`, `fetch_one_by_key`,
/// `fetch_all_by_primary_keys`) panic when the type is misconfigured for the lookup
/// requested: no table metadata, no primary key, or a primary key made of more
/// than one column when a single value is supplied. A missing key instead is a
/// regular `Ok(None)`.
pub trait Entity: Send + Sized {
    /// Table metadata, `None` for types that are only built from arbitrary queries.
    fn table() -> Option<&'static TableDef> {
        None
    }

    fn from_row(row: RowLabeled) -> Result<Self>;

    /// Lazy, single pass stream of entities, one per row pulled from the cursor.
    ///
    /// Dropping the stream releases the cursor.
    fn fetch<Exec: Executor>(
        executor: &mut Exec,
        query: impl Into<Query>,
    ) -> impl Stream<Item = Result<Self>> + Send {
        executor
            .fetch(query.into())
            .map(|row| row.and_then(Self::from_row))
    }

    /// All the entities, in row order.
    fn fetch_all<Exec: Executor>(
        executor: &mut Exec,
        query: impl Into<Query>,
    ) -> impl Future<Output = Result<Vec<Self>>> + Send {
        Self::fetch(executor, query).try_collect()
    }

    /// The first entity, pulling at most one row.
    fn fetch_one<Exec: Executor>(
        executor: &mut Exec,
        query: impl Into<Query>,
    ) -> impl Future<Output = Result<Option<Self>>> + Send {
        let stream = Self::fetch(executor, query);
        async move { pin!(stream).into_future().map(|(v, _)| v).await.transpose() }
    }

    /// The entity whose primary key equals `primary_key`.
    ///
    /// A NULL key (`None`, `Value::Null`) returns `Ok(None)` without running any query.
    fn fetch_one_by_primary_key<Exec: Executor>(
        executor: &mut Exec,
        primary_key: impl AsValue,
    ) -> impl Future<Output = Result<Option<Self>>> + Send {
        let primary_key = primary_key.as_value();
        let query = (!primary_key.is_null()).then(|| {
            let table = table_metadata::<Self>();
            let column = single_key_column::<Self>(table);
            let mut sql = String::with_capacity(128);
            executor
                .driver()
                .sql_writer()
                .write_select_by_primary_key(&mut sql, table, column);
            Query::new(sql).bind(primary_key)
        });
        async move {
            let Some(query) = query else {
                return Ok(None);
            };
            log::debug!(
                "{}::fetch_one_by_primary_key: {}",
                any::type_name::<Self>(),
                query
            );
            Self::fetch_one(executor, query).await
        }
    }

    /// The first entity matching every column of `key`.
    ///
    /// `None` returns `Ok(None)` without running any query. A present but empty key
    /// is an error, it would not identify any row.
    fn fetch_one_by_key<Exec: Executor>(
        executor: &mut Exec,
        key: Option<Key>,
    ) -> impl Future<Output = Result<Option<Self>>> + Send {
        let query = key.map(|key| {
            let table = table_metadata::<Self>();
            if key.is_empty() {
                return Err(Error::msg(format!(
                    "Cannot fetch {} by an empty key, at least one column is required",
                    any::type_name::<Self>()
                )));
            }
            let mut sql = String::with_capacity(128);
            executor
                .driver()
                .sql_writer()
                .write_select_by_key(&mut sql, table, key.columns());
            Ok(Query::new(sql).bind_all(key.into_values()))
        });
        async move {
            let Some(query) = query.transpose()? else {
                return Ok(None);
            };
            log::debug!("{}::fetch_one_by_key: {}", any::type_name::<Self>(), query);
            Self::fetch_one(executor, query).await
        }
    }

    /// Every entity whose primary key is one of `primary_keys`, in row order.
    ///
    /// NULL keys are skipped, when no key is left the result is empty and no query runs.
    fn fetch_all_by_primary_keys<Exec: Executor, K: AsValue>(
        executor: &mut Exec,
        primary_keys: impl IntoIterator<Item = K>,
    ) -> impl Future<Output = Result<Vec<Self>>> + Send {
        let primary_keys: Vec<_> = primary_keys
            .into_iter()
            .map(AsValue::as_value)
            .filter(|v| !v.is_null())
            .collect();
        let query = (!primary_keys.is_empty()).then(|| {
            let table = table_metadata::<Self>();
            let column = single_key_column::<Self>(table);
            let mut sql = String::with_capacity(128 + primary_keys.len() * 2);
            executor.driver().sql_writer().write_select_by_primary_keys(
                &mut sql,
                table,
                column,
                primary_keys.len(),
            );
            Query::new(sql).bind_all(primary_keys)
        });
        async move {
            let Some(query) = query else {
                return Ok(Vec::new());
            };
            log::debug!(
                "{}::fetch_all_by_primary_keys: {}",
                any::type_name::<Self>(),
                query
            );
            Self::fetch_all(executor, query).await
        }
    }
}

fn table_metadata<E: Entity>() -> &'static TableDef {
    let Some(table) = E::table() else {
        let message = format!(
            "Entity {} has no table metadata, it cannot be fetched by key",
            any::type_name::<E>()
        );
        log::error!("{}", message);
        panic!("{}", message);
    };
    table
}

fn single_key_column<E: Entity>(table: &'static TableDef) -> &'static str {
    let message = match table.primary_key {
        Some(primary_key) => match primary_key.single_column() {
            Some(column) => return column,
            None => format!(
                "Entity {} has a primary key of {} columns ({}), it cannot be fetched by a single value",
                any::type_name::<E>(),
                primary_key.column_names().len(),
                primary_key.column_names().join(", "),
            ),
        },
        None => format!(
            "Entity {} (table {}) does not declare a primary key",
            any::type_name::<E>(),
            table.full_name(),
        ),
    };
    log::error!("{}", message);
    panic!("{}", message);
}
