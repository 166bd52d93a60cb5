use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use car_parking_api::config::environment::EnvironmentConfig;
use car_parking_api::database::DatabaseConnection;
use car_parking_api::routes::create_api_router;
use car_parking_api::services::data_loader;
use car_parking_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🅿️  Car Parking API");
    info!("===================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = db_connection.run_migrations().await {
        error!("❌ Error aplicando migraciones: {}", e);
        return Err(e);
    }

    let pool = db_connection.pool().clone();

    // Datos de demostración (solo con SEED_DEMO_DATA=true y la base vacía)
    if config.seed_demo_data {
        data_loader::load_demo_data(&pool).await?;
    }

    let addr: SocketAddr = config.server_url().parse()?;

    // Crear router de la API
    let app = create_api_router(AppState::new(pool, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Auth:");
    info!("   POST /api/v1/auth/customer/register - Registrar cliente");
    info!("   POST /api/v1/auth/customer/authenticate - Login cliente");
    info!("   POST /api/v1/auth/admin/register - Registrar admin");
    info!("   POST /api/v1/auth/admin/authenticate - Login admin");
    info!("🚗 Coches y parkings (token requerido, listado de coches público):");
    info!("   GET  /api/v1/car - Listar coches");
    info!("   GET  /api/v1/car/:id - Obtener coche");
    info!("   GET  /api/v1/parking - Listar parkings");
    info!("   GET  /api/v1/parking/:id - Obtener parking");
    info!("   GET  /api/v1/parking/:id/cars - Coches de un parking");
    info!("   GET  /api/v1/parking/:id/cars/count - Ocupación de un parking");
    info!("👤 Área de cliente (rol customer):");
    info!("   GET  /api/v1/customer/:id/cars - Mis coches");
    info!("   POST /api/v1/customer/:id/cars - Añadir coche");
    info!("   POST /api/v1/customer/:id/cars/batch - Añadir varios coches");
    info!("   POST /api/v1/customer/:id/cars/:car/park/:parking - Aparcar");
    info!("   POST /api/v1/customer/:id/cars/:car/leave - Salir del parking");
    info!("🛠  Área de administración (rol admin):");
    info!("   GET  /api/v1/admin/customers - Listar clientes");
    info!("   PUT  /api/v1/admin/customers/:id - Editar campo de cliente");
    info!("   POST /api/v1/admin/parkings - Crear parking");
    info!("   GET  /api/v1/admin/actions - Auditoría");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
