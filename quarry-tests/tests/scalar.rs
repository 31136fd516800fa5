#[cfg(test)]
mod tests {
    use quarry::{AsValue, Query, RowLabeled, Scalar, Value, stream::TryStreamExt};
    use quarry_tests::{MemoryExecutor, MemoryTable, init_logs, players_table};
    use std::sync::Arc;

    fn counts() -> MemoryTable {
        MemoryTable::new(
            ["count"],
            [[3i64.as_value()], [Value::Int64(None)], [7i64.as_value()]],
        )
    }

    #[tokio::test]
    async fn leftmost_column_of_each_row() {
        init_logs();
        let mut executor = MemoryExecutor::with_rows(players_table().rows());
        let ids = i64::fetch_all(&mut executor, "SELECT id, name FROM players")
            .await
            .expect("Failed to fetch the ids");
        assert_eq!(ids, [Some(1), Some(2), Some(3), Some(4)]);
    }

    #[tokio::test]
    async fn null_cells_are_none() {
        init_logs();
        let mut executor = MemoryExecutor::with_rows(counts().rows());
        let values = i64::fetch_all(&mut executor, "SELECT count FROM totals")
            .await
            .expect("Failed to fetch the counts");
        assert_eq!(values, [Some(3), None, Some(7)]);

        let mut executor = MemoryExecutor::with_rows(players_table().rows());
        let teams = String::fetch_all(&mut executor, "SELECT team FROM players")
            .await;
        // The leftmost column of these rows is `id`, not a string.
        assert!(teams.is_err());
    }

    #[tokio::test]
    async fn fetch_all_matches_lazy_fetch() {
        init_logs();
        let mut executor = MemoryExecutor::with_rows(counts().rows());
        let eager = i64::fetch_all(&mut executor, "SELECT count FROM totals")
            .await
            .expect("Failed to fetch eagerly");
        let lazy: Vec<Option<i64>> = i64::fetch(&mut executor, "SELECT count FROM totals")
            .try_collect()
            .await
            .expect("Failed to fetch lazily");
        assert_eq!(eager, lazy);
    }

    #[tokio::test]
    async fn fetch_one_pulls_a_single_row() {
        init_logs();
        let mut executor = MemoryExecutor::with_rows(counts().rows());
        let value = i64::fetch_one(&mut executor, "SELECT count FROM totals")
            .await
            .expect("Failed to fetch one value");
        assert_eq!(value, Some(3));
        assert_eq!(executor.stats().pulled(), 1);
        assert_eq!(executor.stats().released(), 1);
    }

    #[tokio::test]
    async fn fetch_one_null_and_empty_are_none() {
        init_logs();
        let rows = MemoryTable::new(["count"], [[Value::Null]]);
        let mut executor = MemoryExecutor::with_rows(rows.rows());
        let value = i64::fetch_one(&mut executor, "SELECT NULL")
            .await
            .expect("A NULL cell is not an error");
        assert_eq!(value, None);

        let mut executor = MemoryExecutor::with_rows(vec![]);
        let value = i64::fetch_one(&mut executor, "SELECT count FROM totals WHERE 1 = 0")
            .await
            .expect("An empty result is not an error");
        assert_eq!(value, None);
        assert_eq!(executor.stats().opened(), 1);
        assert_eq!(executor.stats().pulled(), 0);
    }

    #[tokio::test]
    async fn row_without_columns_is_none() {
        init_logs();
        let row = RowLabeled::new(Arc::from([]), Box::from([]));
        let mut executor = MemoryExecutor::with_rows(vec![row.clone(), row]);
        let values = String::fetch_all(&mut executor, "SELECT")
            .await
            .expect("A row without columns is not an error");
        assert_eq!(values, [None, None]);
    }

    #[tokio::test]
    async fn integer_widths_convert_in_range() {
        init_logs();
        let rows = MemoryTable::new(
            ["value"],
            [[1i8.as_value()], [300i16.as_value()], [70_000u32.as_value()]],
        );
        let mut executor = MemoryExecutor::with_rows(rows.rows());
        let wide = i64::fetch_all(&mut executor, "SELECT value FROM numbers")
            .await
            .expect("Widening never fails");
        assert_eq!(wide, [Some(1), Some(300), Some(70_000)]);

        let narrow = u8::fetch_all(&mut executor, "SELECT value FROM numbers").await;
        let error = narrow.expect_err("300 does not fit u8");
        assert!(
            error.to_string().contains("out of range"),
            "Unexpected error: {error}"
        );
    }

    #[tokio::test]
    async fn conversion_errors_propagate() {
        init_logs();
        let rows = MemoryTable::new(["value"], [["not a number".as_value()]]);
        let mut executor = MemoryExecutor::with_rows(rows.rows());
        let result = i64::fetch_one(&mut executor, "SELECT 'not a number'").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn scalar_arguments_are_bound() {
        init_logs();
        let mut executor = MemoryExecutor::with_table(players_table(), &["team"]);
        let query = Query::new("SELECT id FROM players WHERE team = ?").bind("red");
        let ids = i64::fetch_all(&mut executor, query)
            .await
            .expect("Failed to fetch the ids");
        assert_eq!(ids, [Some(1), Some(4)]);
    }
}
