//! Shared SQL text helpers for SQLite repositories.

/// Quotes an identifier for SQLite, doubling embedded quotes.
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `"table"."column"`. Qualified names fail loudly on unknown columns
/// instead of degrading to string literals.
pub(crate) fn qualified_column(table: &str, column: &str) -> String {
    format!("{}.{}", quote_identifier(table), quote_identifier(column))
}

/// `SELECT "t"."id", "t"."a", ... FROM "t"`.
pub(crate) fn select_sql(table: &str, columns: &[&str]) -> String {
    let projection = std::iter::once("id")
        .chain(columns.iter().copied())
        .map(|column| format!("{} AS {}", qualified_column(table, column), quote_identifier(column)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("SELECT {projection} FROM {}", quote_identifier(table))
}

pub(crate) fn insert_sql(table: &str, columns: &[&str]) -> String {
    if columns.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES;", quote_identifier(table));
    }
    let names = columns
        .iter()
        .map(|column| quote_identifier(column))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=columns.len())
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({names}) VALUES ({placeholders});",
        quote_identifier(table)
    )
}

/// Binds columns as `?1..?n` and the id as `?{n+1}`.
pub(crate) fn update_sql(table: &str, columns: &[&str]) -> String {
    if columns.is_empty() {
        return format!(
            "UPDATE {} SET \"id\" = \"id\" WHERE \"id\" = ?1;",
            quote_identifier(table)
        );
    }
    let assignments = columns
        .iter()
        .enumerate()
        .map(|(index, column)| format!("{} = ?{}", quote_identifier(column), index + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {assignments} WHERE \"id\" = ?{};",
        quote_identifier(table),
        columns.len() + 1
    )
}

#[cfg(test)]
mod tests {
    use super::{insert_sql, qualified_column, quote_identifier, select_sql, update_sql};

    #[test]
    fn identifiers_are_quoted_and_escaped() {
        assert_eq!(quote_identifier("title"), "\"title\"");
        assert_eq!(quote_identifier("bad\"name"), "\"bad\"\"name\"");
        assert_eq!(qualified_column("articles", "title"), "\"articles\".\"title\"");
    }

    #[test]
    fn statements_bind_every_column() {
        assert_eq!(
            select_sql("articles", &["title"]),
            "SELECT \"articles\".\"id\" AS \"id\", \"articles\".\"title\" AS \"title\" FROM \"articles\""
        );
        assert_eq!(
            insert_sql("articles", &["title", "body"]),
            "INSERT INTO \"articles\" (\"title\", \"body\") VALUES (?1, ?2);"
        );
        assert_eq!(
            update_sql("articles", &["title", "body"]),
            "UPDATE \"articles\" SET \"title\" = ?1, \"body\" = ?2 WHERE \"id\" = ?3;"
        );
    }

    #[test]
    fn column_free_tables_still_produce_valid_statements() {
        assert_eq!(
            insert_sql("markers", &[]),
            "INSERT INTO \"markers\" DEFAULT VALUES;"
        );
        assert_eq!(
            update_sql("markers", &[]),
            "UPDATE \"markers\" SET \"id\" = \"id\" WHERE \"id\" = ?1;"
        );
    }
}
