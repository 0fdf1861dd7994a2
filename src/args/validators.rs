use super::types::Args;

/// Validate arguments before anything touches the file or the network
///
/// # Errors
///
/// Returns an error if the bucket name is blank, a numeric bound is zero,
/// or the endpoint URL has no http(s) scheme.
pub fn validate(args: &Args) -> Result<(), String> {
    if args.bucket.trim().is_empty() {
        return Err("bucket name must not be empty".to_string());
    }
    if args.region.trim().is_empty() {
        return Err("--region must not be empty".to_string());
    }
    if args.max_attempts == 0 {
        return Err("--max-attempts must be at least 1".to_string());
    }
    if args.wait_max_attempts == 0 {
        return Err("--wait-max-attempts must be at least 1".to_string());
    }
    if let Some(endpoint) = &args.endpoint_url {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(format!(
                "--endpoint-url '{endpoint}' must start with http:// or https://"
            ));
        }
    }
    Ok(())
}
