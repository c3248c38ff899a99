use chrono::{NaiveDate, Timelike};

use wfetch_core::{ForecastBundle, ForecastEntry, Unit, WeatherSnapshot};

const NOON_SECONDS: i64 = 12 * 60 * 60;

/// Fixed multi-line report for one current-weather snapshot.
pub fn render_current(snapshot: &WeatherSnapshot, unit: Unit) -> String {
    let sym = unit.symbol();

    format!(
        "Current Weather for {}:\n\
         Temperature: {:.2}{sym}\n\
         Maximum Temperature: {:.2}{sym}\n\
         Condition: {}\n\
         Humidity: {:.2}%\n\
         Feels like: {:.2}{sym}\n",
        snapshot.location,
        snapshot.temperature,
        snapshot.temp_max,
        snapshot.condition,
        snapshot.humidity,
        snapshot.feels_like,
    )
}

/// Forecast report: header plus one line per calendar day.
pub fn render_forecast(bundle: &ForecastBundle, unit: Unit) -> String {
    let sym = unit.symbol();
    let mut out = format!("5 day forecast for {}:\n", bundle.city);

    for entry in midday_entries(&bundle.entries) {
        out.push_str(&format!(
            "{}: Temp: {:.1}{sym}, Max Temp: {:.1}{sym}, Feels Like: {:.1}{sym}, \
             Humidity: {:.1}% Condition: {}\n",
            entry.timestamp.format("%Y-%m-%d"),
            entry.temperature,
            entry.temp_max,
            entry.feels_like,
            entry.humidity,
            entry.condition,
        ));
    }

    out
}

/// One representative entry per calendar day: the reading closest to noon.
/// Days keep their first-appearance order; ties go to the earlier reading.
fn midday_entries(entries: &[ForecastEntry]) -> Vec<&ForecastEntry> {
    let mut days: Vec<(NaiveDate, &ForecastEntry)> = Vec::new();

    for entry in entries {
        let date = entry.timestamp.date();
        if let Some((_, best)) = days.iter_mut().find(|(d, _)| *d == date) {
            if noon_distance(entry) < noon_distance(*best) {
                *best = entry;
            }
        } else {
            days.push((date, entry));
        }
    }

    days.into_iter().map(|(_, entry)| entry).collect()
}

fn noon_distance(entry: &ForecastEntry) -> i64 {
    (i64::from(entry.timestamp.num_seconds_from_midnight()) - NOON_SECONDS).abs()
}
