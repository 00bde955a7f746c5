use crate::error::CliError;
use toolgate_backends::{StockService, StockServiceConfig, WeatherService, WeatherServiceConfig};
use toolgate_gateway::{Gateway, GatewayConfig, GatewayServer, default_registry};

pub async fn run_gateway(port: Option<u16>) -> Result<(), CliError> {
    let mut config = GatewayConfig::from_env()?;
    if let Some(port) = port {
        config = config.with_port(port);
    }

    let gateway = Gateway::new(default_registry(&config)?);
    GatewayServer::new(gateway)
        .serve(&config.bind_addr())
        .await?;
    Ok(())
}

pub async fn run_weather(host: &str, port: Option<u16>) -> Result<(), CliError> {
    let mut config = WeatherServiceConfig::from_env()?;
    if let Some(port) = port {
        config.port = port;
    }

    let addr = format!("{host}:{}", config.port);
    WeatherService::new(config)?.serve(&addr).await?;
    Ok(())
}

pub async fn run_stock(host: &str, port: Option<u16>) -> Result<(), CliError> {
    let mut config = StockServiceConfig::from_env()?;
    if let Some(port) = port {
        config.port = port;
    }

    StockService::new()
        .serve(&format!("{host}:{}", config.port))
        .await?;
    Ok(())
}
