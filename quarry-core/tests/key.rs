#[cfg(test)]
mod tests {
    use quarry_core::{AsValue, Key, Query, Value};

    #[test]
    fn insertion_order() {
        let key = Key::new()
            .with("member_id", 1i64)
            .with("club_id", 20i64)
            .with("role", None::<String>);
        let columns: Vec<_> = key.columns().collect();
        assert_eq!(columns, ["member_id", "club_id", "role"]);
        let pairs: Vec<_> = (&key)
            .into_iter()
            .map(|(c, v)| (c.as_ref(), v.clone()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("member_id", 1i64.as_value()),
                ("club_id", 20i64.as_value()),
                ("role", Value::Varchar(None)),
            ]
        );
        let query = Query::new("").bind_all(key.into_values());
        assert_eq!(
            query.arguments,
            [1i64.as_value(), 20i64.as_value(), Value::Varchar(None)]
        );
    }

    #[test]
    fn set_replaces_in_place() {
        let mut key = Key::from([("a", 1), ("b", 2)]);
        key.set("a", 3);
        key.set("c", 4);
        assert_eq!(key.get("a"), Some(&3.as_value()));
        assert_eq!(key.get("missing"), None);
        let entries: Vec<_> = key
            .into_iter()
            .map(|(c, v)| (c.into_owned(), v))
            .collect();
        assert_eq!(
            entries,
            [
                ("a".to_string(), 3.as_value()),
                ("b".to_string(), 2.as_value()),
                ("c".to_string(), 4.as_value()),
            ]
        );
    }

    #[test]
    fn collect_and_empty() {
        assert!(Key::new().is_empty());
        let key: Key = vec![(String::from("x"), "1"), (String::from("x"), "2")]
            .into_iter()
            .collect();
        assert!(!key.is_empty());
        assert_eq!(key.columns().count(), 1);
        assert_eq!(key.get("x"), Some(&"2".as_value()));
    }
}
