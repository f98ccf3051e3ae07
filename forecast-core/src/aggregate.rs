//! Reduction of 3-hour forecast samples into per-day summaries.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::model::{DailySummary, ForecastSample};

/// Maximum number of days shown in the forecast strip.
pub const MAX_DAYS: usize = 5;

/// Group samples by calendar date (in `offset`) and summarise each day.
///
/// Days come out in the order their first sample appears in `samples`, capped
/// at [`MAX_DAYS`]. Within a day the icon code is taken from the last sample
/// processed, not the most representative one.
pub fn daily_summaries(samples: &[ForecastSample], offset: FixedOffset) -> Vec<DailySummary> {
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut days: Vec<DailySummary> = Vec::with_capacity(MAX_DAYS);

    for sample in samples {
        // Timestamps are range-checked by the schema layer.
        let Some(local) =
            DateTime::<Utc>::from_timestamp(sample.timestamp, 0).map(|dt| dt.with_timezone(&offset))
        else {
            continue;
        };
        let date = local.date_naive();

        match index.get(&date) {
            Some(&pos) => {
                let day = &mut days[pos];
                day.min_temp = day.min_temp.min(sample.temperature);
                day.max_temp = day.max_temp.max(sample.temperature);
                day.icon_code.clone_from(&sample.condition_code);
            }
            // Dates past the cap would be truncated anyway.
            None if days.len() == MAX_DAYS => {}
            None => {
                index.insert(date, days.len());
                days.push(DailySummary {
                    date,
                    day_label: local.format("%a").to_string(),
                    min_temp: sample.temperature,
                    max_temp: sample.temperature,
                    icon_code: sample.condition_code.clone(),
                });
            }
        }
    }

    days
}
