//! Contains command line arguments and related helpers that are shared between
//! the binaries.

use std::fmt::{Display, Formatter};

#[macro_export]
macro_rules! logging_args_with_default_filter {
    ($struct_name:ident, $default_filter:literal) => {
        #[derive(clap::Parser)]
        pub struct $struct_name {
            #[clap(long, env, default_value = $default_filter)]
            pub log_filter: String,

            #[clap(long, env, default_value = "error")]
            pub log_stderr_threshold: ::tracing::level_filters::LevelFilter,

            /// Emit logs as JSON lines.
            #[clap(long, env, default_value = "false", action = clap::ArgAction::Set)]
            pub use_json_logs: bool,
        }

        impl ::std::fmt::Display for $struct_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let Self {
                    log_filter,
                    log_stderr_threshold,
                    use_json_logs,
                } = self;

                writeln!(f, "log_filter: {}", log_filter)?;
                writeln!(f, "log_stderr_threshold: {}", log_stderr_threshold)?;
                writeln!(f, "use_json_logs: {}", use_json_logs)?;
                Ok(())
            }
        }
    };
}

pub fn display_option(
    f: &mut Formatter<'_>,
    name: &str,
    option: &Option<impl Display>,
) -> std::fmt::Result {
    write!(f, "{name}: ")?;
    match option {
        Some(display) => writeln!(f, "{display}"),
        None => writeln!(f, "None"),
    }
}
