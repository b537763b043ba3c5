use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::domain::services::token_service::TokenService;
use crate::infra::repositories::{
    postgres_member_repo::PostgresMemberRepo, postgres_trainer_repo::PostgresTrainerRepo,
    postgres_session_repo::PostgresSessionRepo, postgres_equipment_repo::PostgresEquipmentRepo,
    postgres_plan_repo::PostgresPlanRepo, postgres_payment_repo::PostgresPaymentRepo,
    postgres_attendance_repo::PostgresAttendanceRepo, postgres_verification_repo::PostgresVerificationRepo,
    sqlite_member_repo::SqliteMemberRepo, sqlite_trainer_repo::SqliteTrainerRepo,
    sqlite_session_repo::SqliteSessionRepo, sqlite_equipment_repo::SqliteEquipmentRepo,
    sqlite_plan_repo::SqlitePlanRepo, sqlite_payment_repo::SqlitePaymentRepo,
    sqlite_attendance_repo::SqliteAttendanceRepo, sqlite_verification_repo::SqliteVerificationRepo,
};

pub fn load_templates() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template("welcome.html", include_str!("../templates/welcome.html"))
        .expect("Failed to load welcome template");
    tera.add_raw_template("confirmation.html", include_str!("../templates/confirmation.html"))
        .expect("Failed to load confirmation template");
    tera.add_raw_template("payment.html", include_str!("../templates/payment.html"))
        .expect("Failed to load payment template");
    tera.add_raw_template("verification.html", include_str!("../templates/verification.html"))
        .expect("Failed to load verification template");
    tera
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));

    let token_service = Arc::new(TokenService::new(&config.jwt_secret));
    let templates = Arc::new(load_templates());

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            member_repo: Arc::new(PostgresMemberRepo::new(pool.clone())),
            trainer_repo: Arc::new(PostgresTrainerRepo::new(pool.clone())),
            session_repo: Arc::new(PostgresSessionRepo::new(pool.clone())),
            equipment_repo: Arc::new(PostgresEquipmentRepo::new(pool.clone())),
            plan_repo: Arc::new(PostgresPlanRepo::new(pool.clone())),
            payment_repo: Arc::new(PostgresPaymentRepo::new(pool.clone())),
            attendance_repo: Arc::new(PostgresAttendanceRepo::new(pool.clone())),
            verification_repo: Arc::new(PostgresVerificationRepo::new(pool.clone())),
            token_service,
            email_service,
            templates,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            member_repo: Arc::new(SqliteMemberRepo::new(pool.clone())),
            trainer_repo: Arc::new(SqliteTrainerRepo::new(pool.clone())),
            session_repo: Arc::new(SqliteSessionRepo::new(pool.clone())),
            equipment_repo: Arc::new(SqliteEquipmentRepo::new(pool.clone())),
            plan_repo: Arc::new(SqlitePlanRepo::new(pool.clone())),
            payment_repo: Arc::new(SqlitePaymentRepo::new(pool.clone())),
            attendance_repo: Arc::new(SqliteAttendanceRepo::new(pool.clone())),
            verification_repo: Arc::new(SqliteVerificationRepo::new(pool.clone())),
            token_service,
            email_service,
            templates,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
