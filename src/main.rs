//! Registers the node IPAM controller metrics and prints their shape along
//! with the current Prometheus exposition of the default registry.
//!
//! Series only appear in the exposition once observed, so the definitions
//! are listed first.

use std::process::ExitCode;

use nodeipam_metrics::config::{load_config, print_schema};
use nodeipam_metrics::metrics::{render_global, WORK_ITEM_DURATION, WORK_ITEM_ERROR};
use nodeipam_metrics::register_metrics;
use nodeipam_metrics::utils::logger::init_logging;
use tracing::error;

fn main() -> ExitCode {
    if std::env::args().skip(1).any(|arg| arg == "--schema") {
        print_schema();
        return ExitCode::SUCCESS;
    }

    let config = load_config();
    init_logging(&config.logging);

    register_metrics();

    println!(
        "# histogram {} labels={:?} buckets={:?}",
        WORK_ITEM_DURATION.name,
        WORK_ITEM_DURATION.labels,
        WORK_ITEM_DURATION.buckets.bounds()
    );
    println!("#   {}", WORK_ITEM_DURATION.exposed_help());
    println!(
        "# counter {} labels={:?}",
        WORK_ITEM_ERROR.name, WORK_ITEM_ERROR.labels
    );
    println!("#   {}", WORK_ITEM_ERROR.exposed_help());

    match render_global() {
        Ok(text) => {
            print!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "failed to render metrics");
            ExitCode::FAILURE
        }
    }
}
