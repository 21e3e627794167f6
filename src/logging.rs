use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `verbose`. With `log_file`, a daily-rotated JSON log
/// is written next to the stderr output.
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    // RUST_LOG takes precedence over the verbose flag
    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gqlfield={}", level)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false) // no module path
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    // Stderr only unless a log file was requested
    let Some(log_path) = log_file else {
        subscriber.init();
        return;
    };

    let (dir, file_name) = split_log_path(&log_path);
    let _ = std::fs::create_dir_all(dir); // appender reports its own write errors

    // JSON lines, no ANSI colours
    let file_layer = fmt::layer()
        .with_writer(tracing_appender::rolling::daily(dir, file_name))
        .with_ansi(false)
        .json();

    subscriber.with(file_layer).init();
}

/// Directory and file name prefix for the rolling appender.
fn split_log_path(log_path: &Path) -> (&Path, &OsStr) {
    let dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .unwrap_or_else(|| OsStr::new("gqlfield.log"));
    (dir, file_name)
}

#[cfg(test)]
mod tests {
    use super::split_log_path;
    use crate::field::{
        ArgumentDef, Args, Field, FieldDefinition, FieldType, Resolve, ResolveCall, Services,
    };
    use serde_json::Value;
    use std::path::Path;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize logging once for all tests
    fn init_test_logging() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_test_writer()
                .with_max_level(tracing::Level::DEBUG)
                .try_init();
        });
    }

    struct Named;

    impl Field for Named {
        fn args(&self) -> Args {
            Args::from([(
                "name".to_string(),
                ArgumentDef::new(FieldType::named("String")).rules(["required"]),
            )])
        }
    }

    impl Resolve for Named {
        fn resolve(&self, _call: &ResolveCall) -> crate::error::Result<Value> {
            Ok(Value::Null)
        }
    }

    #[test]
    fn test_validation_failure_logs_under_subscriber() {
        init_test_logging();
        let field = FieldDefinition::resolvable(Named, Services::default());
        let result = field.resolver().unwrap().call(&ResolveCall::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("logs/gqlfield.log"));
        assert_eq!(dir, Path::new("logs"));
        assert_eq!(name, "gqlfield.log");

        let (dir, name) = split_log_path(Path::new("app.log"));
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "app.log");

        let (dir, name) = split_log_path(Path::new("logs/.."));
        assert_eq!(dir, Path::new("logs"));
        assert_eq!(name, "gqlfield.log");
    }
}
