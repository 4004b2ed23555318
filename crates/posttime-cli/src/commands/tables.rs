//! Display of the configured hour tables.

use posttime_core::{Config, PeakTableMode};

fn join_hours(hours: &[u8]) -> String {
    hours
        .iter()
        .map(|h| format!("{h:02}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let engine = config.build_engine()?;
    let tables = engine.tables();

    println!("{}", tables.render_ascii_chart());
    println!("Weekday peaks:   {}", join_hours(tables.weekday_peak_hours()));
    println!("Weekend peaks:   {}", join_hours(tables.weekend_peak_hours()));
    println!("Low engagement:  {}", join_hours(tables.low_engagement_hours()));
    println!(
        "Ranking table:   {}",
        match engine.mode() {
            PeakTableMode::WeekdayOnly => "weekday peaks on every day",
            PeakTableMode::WeekendAware => "weekend peaks on weekends",
        }
    );

    Ok(())
}
