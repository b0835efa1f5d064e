//! Logger composition from a `LogConfig`.

use super::{CoreBuilder, LevelFilter, Logger, LoggerBuilder};
use crate::config::LogConfig;
use crate::internal;
use crate::level::Level;
use crate::output::{Console, Sink};
use crate::path::Stream;
use crate::rotate::RotationPolicy;
use chrono::Local;
use std::sync::Arc;

impl Logger {
    /// Builds the simple or split layout described by `config`, with stdout as
    /// the console sink when `config.console` is set.
    ///
    /// Stream paths are fixed here: a process running past midnight keeps
    /// writing to the date directory it started in.
    #[must_use]
    pub fn from_config(config: &LogConfig) -> Self {
        let console: Option<Arc<dyn Sink>> = if config.console {
            Some(Arc::new(Console::new()))
        } else {
            None
        };
        Self::from_config_with_console(config, console)
    }

    /// Like [`Logger::from_config`], but with the caller's console sink.
    /// `None` disables console output regardless of `config.console`.
    #[must_use]
    pub fn from_config_with_console(config: &LogConfig, console: Option<Arc<dyn Sink>>) -> Self {
        internal::debug(
            "LOGGER",
            &format!(
                "Initializing logger for app={} mode={}",
                config.app_name,
                if config.simple { "simple" } else { "split" }
            ),
        );

        let policy = config.rotation_policy();
        internal::debug(
            "ROTATE",
            &format!(
                "max_size={}B max_backups={} max_age_days={} compress={}",
                policy.max_size, policy.max_backups, policy.max_age_days, policy.compress
            ),
        );

        let now = Local::now();
        let builder = LoggerBuilder::new().encoding(config.format);

        let builder = if config.simple {
            let debug_path = config.stream_path(Stream::Debug, &now);
            internal::debug("FILE", &format!("debug -> {}", debug_path.display()));
            Self::stream_core(
                builder.core(LevelFilter::AtLeast(Level::Debug)),
                debug_path,
                policy,
                console.as_ref(),
            )
            .done()
        } else {
            let debug_path = config.stream_path(Stream::Debug, &now);
            let err_path = config.stream_path(Stream::Err, &now);
            internal::debug("FILE", &format!("debug -> {}", debug_path.display()));
            internal::debug("FILE", &format!("err -> {}", err_path.display()));

            let builder = Self::stream_core(
                builder.core(LevelFilter::Between {
                    min: Level::Debug,
                    below: Level::Error,
                }),
                debug_path,
                policy,
                console.as_ref(),
            )
            .done();
            Self::stream_core(
                builder.core(LevelFilter::AtLeast(Level::Error)),
                err_path,
                policy,
                console.as_ref(),
            )
            .stacktrace(true)
            .done()
        };

        if !config.hooks.is_empty() {
            internal::debug("HOOK", &format!("Registered {} hooks", config.hooks.len()));
        }

        internal::debug("LOGGER", "Logger ready");
        builder.hooks(config.hooks.iter().cloned()).build()
    }

    fn stream_core(
        core: CoreBuilder,
        path: std::path::PathBuf,
        policy: RotationPolicy,
        console: Option<&Arc<dyn Sink>>,
    ) -> CoreBuilder {
        let core = core.file(path, policy);
        match console {
            Some(sink) => core.shared_sink(Arc::clone(sink)),
            None => core,
        }
    }
}
