pub mod args;
pub mod errors;
pub mod lifecycle;
pub mod ports;
pub mod report;
pub mod s3;
pub mod utils {
    pub mod log_utils;
    pub mod path_utils;
}

pub use args::Args;
pub use errors::{StoreError, WorkflowError};
pub use report::RunSummary;

use lifecycle::Lifecycle;
use ports::StoreConnector;
use s3::S3Connector;
use utils::log_utils::Logger;

/// Run the workflow described by `args` against the configured S3 service.
///
/// # Errors
///
/// Returns the `WorkflowError` of the step that failed.
pub fn run_app(args: &Args) -> Result<RunSummary, WorkflowError> {
    let logger = Logger::new(args.verbose);
    if args.verbose >= 2 {
        if let Ok(json) = serde_json::to_string(args) {
            logger.debug(&format!("Args: {json}"));
        }
    }

    let connector = S3Connector::new(args.storage_config(), args.verbose);
    run_with_connector(args, Box::new(connector), logger)
}

/// Run the workflow with an explicit connector and logger.
///
/// # Errors
///
/// Returns the `WorkflowError` of the step that failed, or `LocalIo` if the
/// summary file cannot be written.
pub fn run_with_connector(
    args: &Args,
    connector: Box<dyn StoreConnector>,
    logger: Logger,
) -> Result<RunSummary, WorkflowError> {
    let mut lifecycle = Lifecycle::new(connector, args.lifecycle_options(), logger);
    let mut summary = lifecycle.run(&args.bucket, &args.file_path)?;
    summary.region = Some(args.region.clone());

    if let Some(output) = &args.summary_json {
        report::write_summary_json(&summary, output)
            .map_err(|e| WorkflowError::local_io(output, e))?;
    }

    Ok(summary)
}
