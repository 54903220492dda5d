//! Shared fixtures for the database-backed tests
//!
//! Each `TestDb` lives in its own PostgreSQL schema created from
//! `fixtures/schema.sql` and dropped on teardown.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use smi_backend::db::Database;
use sqlx::{postgres::PgPoolOptions, Executor, PgPool};

pub const SCHEMA: &str = include_str!("../fixtures/schema.sql");

pub const PRODUCTS: &str = "INSERT INTO Produto (cod_barras, nome, preco_venda, tipo_produto, estoque_minimo) VALUES
    ('1001', 'Arroz 5kg', 24.99, 'mercearia', 10),
    ('1002', 'Feijão 1kg', 8.50, 'mercearia', 3),
    ('1003', 'Sal 1kg', 2.10, 'mercearia', 0),
    ('1004', 'Leite 1L', 4.79, 'laticinio', 5)";

static SCHEMA_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub struct TestDb {
    pub db: Database,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    pub async fn new() -> Self {
        let url = std::env::var("SMI_TEST_DATABASE_URL")
            .expect("SMI_TEST_DATABASE_URL must point at a PostgreSQL server");
        let schema = format!(
            "smi_test_{}_{}",
            std::process::id(),
            SCHEMA_COUNTER.fetch_add(1, Ordering::SeqCst)
        );

        let admin = PgPool::connect(&url).await.unwrap();
        admin
            .execute(format!("CREATE SCHEMA {}", schema).as_str())
            .await
            .unwrap();

        let search_path = format!("SET search_path TO {}", schema);
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .after_connect(move |conn, _meta| {
                let sql = search_path.clone();
                Box::pin(async move {
                    conn.execute(sql.as_str()).await?;
                    Ok(())
                })
            })
            .connect(&url)
            .await
            .unwrap();

        let db = Database::from_pool(pool);
        db.execute_statement(SCHEMA).await.unwrap();

        Self { db, admin, schema }
    }

    pub async fn seed(&self, statements: &[&str]) {
        for statement in statements {
            self.db.execute_statement(statement).await.unwrap();
        }
    }

    pub async fn teardown(self) {
        self.db.pool().close().await;
        self.admin
            .execute(format!("DROP SCHEMA {} CASCADE", self.schema).as_str())
            .await
            .unwrap();
        self.admin.close().await;
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
