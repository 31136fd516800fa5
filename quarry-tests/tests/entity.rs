#[cfg(test)]
mod tests {
    use quarry::{
        AsValue, Entity, Error, Query,
        stream::{StreamExt, TryStreamExt},
    };
    use quarry_tests::{
        MemoryExecutor, MemoryTable, Player, TeamScore, init_logs, players, players_table,
    };
    use std::pin::pin;

    #[tokio::test]
    async fn fetch_all_preserves_row_order() {
        init_logs();
        let mut executor = MemoryExecutor::with_rows(players_table().rows());
        let result = Player::fetch_all(&mut executor, "SELECT * FROM players")
            .await
            .expect("Failed to fetch the players");
        assert_eq!(result, players());
        assert_eq!(executor.sql(), ["SELECT * FROM players"]);
        assert_eq!(executor.stats().pulled(), 4);
        assert_eq!(executor.stats().released(), 1);
    }

    #[tokio::test]
    async fn fetch_all_matches_lazy_fetch() {
        init_logs();
        let mut executor = MemoryExecutor::with_rows(players_table().rows());
        let eager = Player::fetch_all(&mut executor, "SELECT * FROM players")
            .await
            .expect("Failed to fetch the players eagerly");
        let lazy: Vec<Player> = Player::fetch(&mut executor, "SELECT * FROM players")
            .try_collect()
            .await
            .expect("Failed to fetch the players lazily");
        assert_eq!(eager, lazy);
        assert_eq!(executor.queries.len(), 2);
    }

    #[tokio::test]
    async fn fetch_is_lazy() {
        init_logs();
        let mut executor = MemoryExecutor::with_rows(players_table().rows());
        {
            let stream = Player::fetch(&mut executor, "SELECT * FROM players");
            let mut stream = pin!(stream);
            let first = stream
                .next()
                .await
                .expect("Expected a first player")
                .expect("Failed to decode the first player");
            assert_eq!(first.name, "Ada");
            let second = stream
                .next()
                .await
                .expect("Expected a second player")
                .expect("Failed to decode the second player");
            assert_eq!(second.name, "Grace");
        }
        assert_eq!(executor.stats().pulled(), 2);
        assert_eq!(executor.stats().released(), 1);
    }

    #[tokio::test]
    async fn fetch_one_pulls_a_single_row() {
        init_logs();
        let mut executor = MemoryExecutor::with_rows(players_table().rows());
        let player = Player::fetch_one(&mut executor, "SELECT * FROM players")
            .await
            .expect("Failed to fetch one player")
            .expect("Expected a player");
        assert_eq!(player, players()[0]);
        assert_eq!(executor.stats().opened(), 1);
        assert_eq!(executor.stats().pulled(), 1);
        assert_eq!(executor.stats().released(), 1);
    }

    #[tokio::test]
    async fn fetch_one_empty_result() {
        init_logs();
        let mut executor = MemoryExecutor::with_rows(vec![]);
        let player = Player::fetch_one(&mut executor, "SELECT * FROM players WHERE 1 = 0")
            .await
            .expect("An empty result is not an error");
        assert_eq!(player, None);
        let all = Player::fetch_all(&mut executor, "SELECT * FROM players WHERE 1 = 0")
            .await
            .expect("An empty result is not an error");
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn fetch_binds_arguments_in_order() {
        init_logs();
        let mut executor = MemoryExecutor::with_table(players_table(), &["team", "id"]);
        let query = Query::new("SELECT * FROM players WHERE team = ? AND id = ?")
            .bind("red")
            .bind(4i64);
        let result = Player::fetch_all(&mut executor, query)
            .await
            .expect("Failed to fetch the players");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Barbara");
        assert_eq!(
            executor.queries[0].arguments,
            ["red".as_value(), 4i64.as_value()]
        );
    }

    #[tokio::test]
    async fn entity_without_table() {
        init_logs();
        let rows = MemoryTable::new(
            ["team", "players"],
            [
                ["red".as_value(), 2i64.as_value()],
                ["blue".as_value(), 1i64.as_value()],
            ],
        );
        let mut executor = MemoryExecutor::with_rows(rows.rows());
        let scores = TeamScore::fetch_all(
            &mut executor,
            "SELECT team, COUNT(*) AS players FROM players GROUP BY team",
        )
        .await
        .expect("Failed to fetch the scores");
        assert_eq!(
            scores,
            [
                TeamScore {
                    team: "red".into(),
                    players: 2
                },
                TeamScore {
                    team: "blue".into(),
                    players: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn executor_errors_propagate() {
        init_logs();
        let mut executor =
            MemoryExecutor::new(|_| Err(Error::msg("near \"SELEC\": syntax error")));
        let error = Player::fetch_all(&mut executor, "SELEC * FROM players")
            .await
            .expect_err("The executor error should be returned");
        assert_eq!(error.to_string(), "near \"SELEC\": syntax error");
        let error = Player::fetch_one(&mut executor, "SELEC * FROM players")
            .await
            .expect_err("The executor error should be returned");
        assert_eq!(error.to_string(), "near \"SELEC\": syntax error");
    }

    #[tokio::test]
    async fn argument_count_mismatch_is_an_executor_error() {
        init_logs();
        let mut executor = MemoryExecutor::with_rows(players_table().rows());
        let result =
            Player::fetch_all(&mut executor, "SELECT * FROM players WHERE id = ?").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn row_construction_errors_propagate() {
        init_logs();
        let rows = MemoryTable::new(
            ["id", "name"],
            [[1i64.as_value(), "Ada".as_value()]],
        );
        let mut executor = MemoryExecutor::with_rows(rows.rows());
        let error = Player::fetch_one(&mut executor, "SELECT id, name FROM players")
            .await
            .expect_err("The row lacks the team and joined columns");
        assert!(
            error.to_string().contains("`team`"),
            "Unexpected error: {error}"
        );
    }
}
