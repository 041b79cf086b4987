use tracing_subscriber::EnvFilter;

/// Install a stderr log subscriber for host applications.
///
/// `RUST_LOG` takes precedence over `default_filter`; an unparsable filter
/// falls back to `warn`. Returns false when a global subscriber was already
/// installed, in which case nothing changes.
pub fn init_logging(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_ignored() {
        // Another test may have installed a subscriber first
        let _ = init_logging("debug");
        assert!(!init_logging("info"));
    }
}
