use log::LevelFilter;
use simplelog::{ConfigBuilder, SimpleLogger};
use std::str::FromStr;

pub fn setup_simple_logger(level: &str) -> anyhow::Result<()> {
    let logger_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("msg_inbox")
        .build();

    Ok(SimpleLogger::init(
        LevelFilter::from_str(level).unwrap_or(LevelFilter::Info),
        logger_config,
    )?)
}
