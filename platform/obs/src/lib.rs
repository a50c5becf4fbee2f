use anyhow::{Result, anyhow};
use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: OnceCell<()> = OnceCell::new();

/// Configuration for tracing initialization.
#[derive(Clone, Debug)]
pub struct ObsConfig {
    pub service_name: &'static str,
    pub env_filter: Option<String>,
    /// Emit log lines with ANSI colors.
    pub ansi: bool,
}

impl Default for ObsConfig {
    fn default() -> Self {
        Self {
            service_name: "hrnet",
            env_filter: None,
            ansi: true,
        }
    }
}

impl ObsConfig {
    /// Filter directive used when neither the config nor `RUST_LOG` set one.
    pub const DEFAULT_FILTER: &'static str = "warn,products_hr=info";

    fn resolve_filter(&self) -> String {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| Self::DEFAULT_FILTER.to_string())
    }
}

/// Install the global tracing subscriber. Subsequent calls are no-ops.
///
/// Log output goes to stderr so command output on stdout stays clean.
pub fn init_tracing(config: ObsConfig) -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_new(config.resolve_filter())?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(config.ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    INIT.set(())
        .map_err(|_| anyhow!("tracing already initialized"))?;
    tracing::debug!(service = config.service_name, "tracing initialized");
    Ok(())
}
