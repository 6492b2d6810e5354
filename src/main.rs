use std::io::Write;
use std::path::Path;

use log::{info, warn, LevelFilter};

use cnholiday::configuration::Configuration;
use cnholiday::holiday::holidayerror::HolidayError;
use cnholiday::time::calendar::chinaholidaycalendar::ChinaHolidayCalendar;
use cnholiday::time::calendar::holidaydelta::holiday_delta;

const DEFAULT_CONFIG_PATH: &str = "config.json";

fn main() -> Result<(), HolidayError> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_owned());
    let config = if Path::new(&config_path).exists() {
        Configuration::from_reader(&config_path).unwrap_or_else(|error| {
            warn!("cannot load {}: {}, use default configuration", config_path, error);
            Configuration::default()
        })
    } else {
        Configuration::default()
    };

    let calendar = ChinaHolidayCalendar::from_configuration(&config)?;
    let years = config.refresh_years();
    info!("refresh holidays of {}..={} into {}", years.start(), years.end(), config.cache_path().display());
    let store = calendar.refresh_years(years)?;
    info!("{} year(s) cached", store.len());

    println!("{}", holiday_delta(&store));
    Ok(())
}
