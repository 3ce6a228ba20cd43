use std::sync::Arc;
use study_room_booking::{
    adapters::memory::{
        BookingLedger as MemoryBookingLedger, RoomDirectory as MemoryRoomDirectory,
    },
    adapters::postgres::{PostgresBookingLedger, PostgresRoomDirectory},
    api::{handlers::AppState, router::create_router},
    application::booking::{AllocationLocks, ServiceDependencies},
    config::{AppConfig, StorageBackend},
    ports::{BookingLedger, RoomDirectory},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "study_room_booking=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        storage = ?config.storage,
        serialize_by_date = config.serialize_by_date,
        "configuration loaded"
    );

    // Initialize adapters
    let (room_directory, booking_ledger) = build_adapters(&config).await?;

    // Create service dependencies
    let service_deps = ServiceDependencies {
        room_directory,
        booking_ledger,
        allocation_locks: Arc::new(AllocationLocks::with_enabled(config.serialize_by_date)),
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!("Server listening on {}", config.bind_addr);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_adapters(
    config: &AppConfig,
) -> Result<(Arc<dyn RoomDirectory>, Arc<dyn BookingLedger>), BoxError> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; bookings are lost on restart");
            let room_directory: Arc<dyn RoomDirectory> =
                Arc::new(MemoryRoomDirectory::with_default_rooms());
            let booking_ledger: Arc<dyn BookingLedger> = Arc::new(MemoryBookingLedger::new());
            Ok((room_directory, booking_ledger))
        }
        StorageBackend::Postgres => {
            // Initialize database connection pool
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("database migrations applied");

            let room_directory: Arc<dyn RoomDirectory> =
                Arc::new(PostgresRoomDirectory::new(pool.clone()));
            let booking_ledger: Arc<dyn BookingLedger> = Arc::new(PostgresBookingLedger::new(pool));
            Ok((room_directory, booking_ledger))
        }
    }
}
