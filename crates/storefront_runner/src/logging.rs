use anyhow::{anyhow, Context, Result};
use base::settings::Settings;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";
const MAX_LOG_FILE_SIZE: u64 = 10 * 1024 * 1024;
const NUMBER_OF_ARCHIVED_LOG_FILES: u32 = 5;

/// Logs to stderr, and also to a rotated file when `LOG_FILE` is set.
pub fn init_logger(settings: &Settings) -> Result<()> {
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let mut config =
        Config::builder().appender(Appender::builder().build("console", Box::new(console)));
    let mut root = Root::builder().appender("console");

    if let Some(log_file) = &settings.log_file {
        let archive_pattern = format!("{}.{{}}.gz", log_file.display());
        let roller = FixedWindowRoller::builder()
            .build(&archive_pattern, NUMBER_OF_ARCHIVED_LOG_FILES)
            .map_err(|e| anyhow!("invalid log archive pattern {}: {}", archive_pattern, e))?;

        let policy = CompoundPolicy::new(
            Box::new(SizeTrigger::new(MAX_LOG_FILE_SIZE)),
            Box::new(roller),
        );

        let file = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(log_file, Box::new(policy))
            .context(format!("an error occurred on opening the log file {:?}", log_file))?;

        config = config.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    let config = config
        .build(root.build(LevelFilter::Info))
        .context("an error occurred on building the logger config")?;

    log4rs::init_config(config).context("an error occurred on initializing the logger")?;

    Ok(())
}
