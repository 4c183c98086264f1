use anyhow::Context;
use keel::domain::config::SettingsInner;
use keel::kernel::config::load_settings;
use keel_logger::{ConsoleFormat, Logger, parse_level};
use keel_server::Server;
use tracing::info;

#[cfg(feature = "profiling")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[keel_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    #[cfg(feature = "profiling")]
    let _profiler = dhat::Profiler::new_heap();

    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        return Err(err).context("Failed to read .env file");
    }

    let settings = load_settings(None::<&str>).context("Critical: Configuration is malformed")?;

    let _log = init_logging(&settings)?;
    info!(
        environment = %settings.environment,
        features = %settings.features(),
        "Settings loaded"
    );

    Server::builder().settings(settings).build().await?.run().await
}

fn init_logging(settings: &SettingsInner) -> anyhow::Result<Logger> {
    let format =
        if settings.is_production() { ConsoleFormat::Json } else { ConsoleFormat::Compact };

    let builder = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .level(parse_level(&settings.log_level)?)
        .console_format(format);

    let logger = match settings.log_dir.as_deref() {
        Some(dir) => builder.path(dir).json().init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
