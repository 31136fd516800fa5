use crate::SqlWriter;

/// Backend family of an [`Executor`](crate::Executor), decides the SQL dialect.
pub trait Driver: Send + Sync {
    type SqlWriter: SqlWriter;

    const NAME: &'static str;

    fn sql_writer(&self) -> Self::SqlWriter;
}
