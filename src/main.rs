//! Test launcher CLI entry point

fn main() {
    // Structured logging goes to stderr; stdout belongs to the test runner.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    testlaunch::cli::run();
}
