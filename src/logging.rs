//! Logger setup for the binary.

use std::io::Write;

/// Installs an `env_logger` writing to stderr.
///
/// Defaults to `Info`; `RUST_LOG` overrides the filter. Calling it more
/// than once is harmless.
pub fn init() {
    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{:5} {:10} {}",
                record.level(),
                record.module_path().and_then(|p| p.rsplit("::").next()).unwrap_or("-"),
                record.args()
            )
        })
        .filter(None, log::LevelFilter::Info)
        .target(env_logger::Target::Stderr);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    let _ = builder.try_init();
}
