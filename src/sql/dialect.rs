use crate::*;
use sqlparser::dialect::{
    AnsiDialect, BigQueryDialect, ClickHouseDialect, DatabricksDialect, Dialect, DuckDbDialect,
    GenericDialect, HiveDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect,
    RedshiftSqlDialect, SQLiteDialect, SnowflakeDialect,
};

pub type SharedDialect = Box<dyn Dialect + Send + Sync>;

/// Resolve a dialect by name, case-insensitively.
///
/// Accepts the names used by common SQL formatters (`sql`, `tsql`, `spark`, ...)
/// as aliases of the closest grammar `sqlparser` offers.
pub fn dialect_for(name: &str) -> Result<SharedDialect> {
    let dialect: SharedDialect = match name.trim().to_ascii_lowercase().as_str() {
        "generic" | "sql" => Box::new(GenericDialect {}),
        "ansi" => Box::new(AnsiDialect {}),
        "postgresql" | "postgres" => Box::new(PostgreSqlDialect {}),
        "mysql" | "mariadb" => Box::new(MySqlDialect {}),
        "sqlite" => Box::new(SQLiteDialect {}),
        "mssql" | "tsql" => Box::new(MsSqlDialect {}),
        "redshift" => Box::new(RedshiftSqlDialect {}),
        "snowflake" => Box::new(SnowflakeDialect {}),
        "bigquery" => Box::new(BigQueryDialect {}),
        "spark" | "databricks" => Box::new(DatabricksDialect {}),
        "hive" => Box::new(HiveDialect {}),
        "duckdb" => Box::new(DuckDbDialect {}),
        "clickhouse" => Box::new(ClickHouseDialect {}),
        _ => return Err(Error::UnknownDialect(name.to_string())),
    };
    Ok(dialect)
}
