use {
    std::{io::IsTerminal, panic::PanicHookInfo, sync::Once},
    time::macros::format_description,
    tracing::level_filters::LevelFilter,
    tracing_subscriber::{
        EnvFilter,
        Layer,
        Registry,
        fmt::{
            time::UtcTime,
            writer::{BoxMakeWriter, MakeWriterExt as _},
        },
        prelude::*,
        util::SubscriberInitExt,
    },
};

/// Initializes tracing setup that is shared between the binaries.
/// `env_filter` has similar syntax to env_logger. It is documented at
/// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
///
/// Events at or above `stderr_threshold` are written to stderr, everything
/// else to stdout.
pub fn initialize(env_filter: &str, stderr_threshold: LevelFilter, use_json_format: bool) {
    set_tracing_subscriber(env_filter, split_writer(stderr_threshold), use_json_format);
    std::panic::set_hook(Box::new(tracing_panic_hook));
}

/// Like [`initialize`], but writes all events to stderr so that stdout only
/// carries the output of the program.
pub fn initialize_stderr(env_filter: &str, use_json_format: bool) {
    set_tracing_subscriber(
        env_filter,
        Output {
            writer: BoxMakeWriter::new(std::io::stderr),
            ansi: std::io::stderr().is_terminal(),
        },
        use_json_format,
    );
    std::panic::set_hook(Box::new(tracing_panic_hook));
}

/// Like [`initialize`], but can be called multiple times in a row. Later calls
/// are ignored.
///
/// Useful for tests.
pub fn initialize_reentrant(env_filter: &str) {
    // The tracing subscriber below is global object so initializing it again in the
    // same process by a different thread would fail.
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        set_tracing_subscriber(env_filter, split_writer(LevelFilter::ERROR), false);
        std::panic::set_hook(Box::new(tracing_panic_hook));
    });
}

struct Output {
    writer: BoxMakeWriter,
    ansi: bool,
}

fn split_writer(stderr_threshold: LevelFilter) -> Output {
    let writer = std::io::stdout
        .with_min_level(stderr_threshold.into_level().unwrap_or(tracing::Level::ERROR))
        .or_else(std::io::stderr);
    Output {
        writer: BoxMakeWriter::new(writer),
        ansi: std::io::stdout().is_terminal(),
    }
}

fn set_tracing_subscriber(env_filter: &str, output: Output, use_json_format: bool) {
    let Output { writer, ansi } = output;
    let timer = UtcTime::new(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if use_json_format {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_timer(timer)
            .with_filter(EnvFilter::new(env_filter))
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_timer(timer)
            .with_ansi(ansi)
            .with_filter(EnvFilter::new(env_filter))
            .boxed()
    };

    tracing_subscriber::registry().with(fmt_layer).init();
}

/// Panic hook that prints roughly the same message as the default panic hook
/// but uses tracing:error instead of stderr.
///
/// Useful when we want panic messages to have the proper log format for Kibana.
fn tracing_panic_hook(panic: &PanicHookInfo) {
    let thread = std::thread::current();
    let name = thread.name().unwrap_or("<unnamed>");
    let backtrace = std::backtrace::Backtrace::force_capture();
    tracing::error!("thread '{name}' {panic}\nstack backtrace:\n{backtrace}");
}
