use crate::utils::error::{HistogramError, Result};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Target of the per-entry echo from [`Diagnostics`](crate::core::diagnostics::Diagnostics).
pub const DIAGNOSTICS_TARGET: &str = "ip2temp::diagnostics";

/// `RUST_LOG` wins over the defaults, but diagnostics echo is always kept at
/// info so skipped addresses show up live.
fn build_filter(verbose: bool) -> Result<EnvFilter> {
    let default = if verbose { "ip2temp=debug,info" } else { "ip2temp=info" };
    let echo: Directive = format!("{}=info", DIAGNOSTICS_TARGET)
        .parse()
        .map_err(|e| HistogramError::Config {
            message: format!("invalid log directive: {}", e),
        })?;

    Ok(EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default))
        .add_directive(echo))
}

/// Compact human-readable output, or JSON lines with `json`.
pub fn init_logger(verbose: bool, json: bool) -> Result<()> {
    let filter = build_filter(verbose)?;
    fn fmt<S>() -> tracing_subscriber::fmt::Layer<S> {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
    }

    let (compact_layer, json_layer) = if json {
        (None, Some(fmt().json()))
    } else {
        (Some(fmt().compact()), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(compact_layer)
        .with(json_layer)
        .init();
    Ok(())
}
