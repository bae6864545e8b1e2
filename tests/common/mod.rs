use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use tcms::config::Config;

/// Fresh in-memory database with the schema applied. One connection so the
/// whole test sees the same memory database.
pub async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    pool
}

pub async fn seed_employee(pool: &SqlitePool, code: &str, base_salary: f64, status: &str) -> i64 {
    sqlx::query(
        r#"
        INSERT INTO employees
        (employee_code, first_name, last_name, email, base_salary, hire_date, status)
        VALUES (?, 'Test', ?, ?, ?, '2024-01-01', ?)
        "#,
    )
    .bind(code)
    .bind(code)
    .bind(format!("{}@center.test", code.to_lowercase()))
    .bind(base_salary)
    .bind(status)
    .execute(pool)
    .await
    .expect("seed employee")
    .last_insert_rowid()
}

#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_addr: "127.0.0.1:0".to_string(),
        rate_api_per_min: 10_000,
        rate_generate_per_min: 10_000,
        api_prefix: "/api".to_string(),
    }
}
