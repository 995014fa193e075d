use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// WARN and ERROR events go to `err`, everything else to `out`.
pub fn split_writer<E, O>(err: E, out: O) -> impl for<'a> MakeWriter<'a> + Send + Sync + 'static
where
    E: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    O: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    err.with_max_level(Level::WARN).or_else(out)
}

/// Install the global subscriber: `RUST_LOG` filter (default `info`),
/// progress on stdout, failures on stderr.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(split_writer(std::io::stderr, std::io::stdout))
        .init();
}
