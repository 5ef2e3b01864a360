use jnparts::auth::PasswordHasher;
use jnparts::bootstrap::ensure_default_admin;
use jnparts::configuration::get_configuration;
use jnparts::startup::run;
use jnparts::telemetry::init_telemetry;
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // 구조화된 로깅 초기화
    init_telemetry();

    tracing::info!("Starting application");

    // 설정 로드
    let configuration = match get_configuration() {
        Ok(config) => {
            tracing::info!(
                environment = %config.application.environment,
                "Configuration loaded successfully"
            );
            config
        }
        Err(e) => {
            tracing::error!("Failed to read configuration: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Configuration error",
            ));
        }
    };

    if configuration.jwt.secret == "change-me" {
        tracing::warn!("JWT secret is the built-in default; set APP_JWT__SECRET");
    }

    // 데이터베이스 연결 풀 생성
    tracing::info!("Attempting to connect to database");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&configuration.database.connection_string())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create connection pool: {}", e);
            std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "Database connection error",
            )
        })?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to run migrations: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, "Migration error")
        })?;
    tracing::info!("Database ready");

    let hasher = PasswordHasher::new(configuration.password.bcrypt_cost);
    match ensure_default_admin(&pool, &configuration.admin, &hasher).await {
        Ok(outcome) => tracing::info!(?outcome, "Admin bootstrap finished"),
        Err(e) => tracing::error!("Admin bootstrap failed: {}", e),
    }

    // 서버 주소 설정
    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Server listening on: {}", address);

    let server = run(listener, pool, configuration)?;
    server.await
}
