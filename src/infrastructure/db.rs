use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

// Every table carries the audit shape: id, created_at, updated_at, is_deleted
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS roles (
        id BLOB PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        description TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT,
        is_deleted BOOLEAN NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BLOB PRIMARY KEY NOT NULL,
        email TEXT NOT NULL,
        full_name TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        role_id BLOB REFERENCES roles(id),
        is_active BOOLEAN NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT,
        is_deleted BOOLEAN NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS courses (
        id BLOB PRIMARY KEY NOT NULL,
        title TEXT NOT NULL,
        slug TEXT NOT NULL,
        description TEXT,
        instructor_id BLOB NOT NULL REFERENCES users(id),
        price_vnd INTEGER NOT NULL DEFAULT 0,
        is_published BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT,
        is_deleted BOOLEAN NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id BLOB PRIMARY KEY NOT NULL,
        user_id BLOB NOT NULL REFERENCES users(id),
        course_id BLOB NOT NULL REFERENCES courses(id),
        amount_vnd INTEGER NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        payment_ref TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT,
        is_deleted BOOLEAN NOT NULL DEFAULT 0
    )
    "#,
    // Live-row lookups filter on is_deleted
    "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email, is_deleted)",
    "CREATE INDEX IF NOT EXISTS idx_courses_slug ON courses(slug, is_deleted)",
    "CREATE INDEX IF NOT EXISTS idx_orders_user ON orders(user_id, is_deleted)",
];

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    for sql in SCHEMA {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            sql.to_string(),
        ))
        .await?;
    }

    tracing::info!("Database schema ready");
    Ok(())
}
