//! Logging initialization utilities.

use env_logger::Env;
use log::{Level, Log, Metadata, Record};
use std::fmt;
use std::sync::Arc;

/// Log target used for request outcome messages.
pub const TARGET: &str = "rreq::request";

/// A logger that can be handed to request builders explicitly.
pub type SharedLogger = Arc<dyn Log>;

/// Initialize logging with a default filter level.
pub fn init() {
    let env = Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();
}

/// Build the default logger without installing it process-wide.
pub fn build() -> SharedLogger {
    let env = Env::default().default_filter_or("info");
    Arc::new(env_logger::Builder::from_env(env).build())
}

/// Where a request builder sends its messages.
#[derive(Clone)]
pub(crate) enum Sink {
    /// The `log` facade, i.e. whatever logger the process installed.
    Facade,
    Injected(SharedLogger),
}

impl Sink {
    pub(crate) fn new(logger: Option<SharedLogger>) -> Self {
        match logger {
            Some(logger) => Sink::Injected(logger),
            None => Sink::Facade,
        }
    }

    pub(crate) fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        match self {
            Sink::Facade => log::log!(target: TARGET, level, "{}", args),
            Sink::Injected(logger) => {
                let metadata = Metadata::builder().level(level).target(TARGET).build();
                if !logger.enabled(&metadata) {
                    return;
                }
                logger.log(
                    &Record::builder()
                        .metadata(metadata)
                        .args(args)
                        .module_path_static(Some(module_path!()))
                        .file_static(Some(file!()))
                        .build(),
                );
            }
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Facade => f.write_str("Facade"),
            Sink::Injected(_) => f.write_str("Injected"),
        }
    }
}
