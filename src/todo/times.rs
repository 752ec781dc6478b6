use chrono::{NaiveTime, TimeDelta, Timelike};

pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const STEP_MINUTES: u32 = 15;
pub const OPTION_COUNT: usize = (24 * 60 / STEP_MINUTES) as usize;

/// Candidate times of day for the time field, `00:00:00` through `23:45:00`.
pub fn time_options() -> impl Iterator<Item = String> {
    (0..OPTION_COUNT as i64).map(|i| {
        (NaiveTime::MIN + TimeDelta::minutes(i * STEP_MINUTES as i64))
            .format(TIME_FORMAT)
            .to_string()
    })
}

/// Index of the first option at or after `text`, wrapping to 0 past the
/// last slot. Unparseable text starts from the top.
pub fn nearest_option_index(text: &str) -> usize {
    let Ok(time) = NaiveTime::parse_from_str(text.trim(), TIME_FORMAT) else {
        return 0;
    };
    let minutes = time.hour() * 60 + time.minute();
    let exact = minutes % STEP_MINUTES == 0 && time.second() == 0;
    let slot = (minutes / STEP_MINUTES) as usize + usize::from(!exact);
    slot % OPTION_COUNT
}

/// The option `offset` slots away from `index`, wrapping in both directions.
pub fn option_at(index: usize, offset: isize) -> (usize, String) {
    let n = OPTION_COUNT as isize;
    let i = ((index as isize + offset) % n + n) % n;
    let minutes = i as i64 * STEP_MINUTES as i64;
    let text = (NaiveTime::MIN + TimeDelta::minutes(minutes))
        .format(TIME_FORMAT)
        .to_string();
    (i as usize, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ninety_six_quarter_hours() {
        let options: Vec<String> = time_options().collect();
        assert_eq!(options.len(), 96);
        assert_eq!(options.first().unwrap(), "00:00:00");
        assert_eq!(options.last().unwrap(), "23:45:00");
        assert_eq!(options[1], "00:15:00");
        assert_eq!(options[4], "01:00:00");

        let unique: HashSet<&String> = options.iter().collect();
        assert_eq!(unique.len(), 96);
    }

    #[test]
    fn strictly_increasing_by_fifteen_minutes() {
        let times: Vec<NaiveTime> = time_options()
            .map(|s| NaiveTime::parse_from_str(&s, TIME_FORMAT).unwrap())
            .collect();
        for pair in times.windows(2) {
            assert_eq!(pair[1] - pair[0], TimeDelta::minutes(15));
        }
    }

    #[test]
    fn restartable() {
        let first: Vec<String> = time_options().collect();
        let second: Vec<String> = time_options().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn nearest_index_rounds_up_to_next_slot() {
        assert_eq!(nearest_option_index("00:00:00"), 0);
        assert_eq!(nearest_option_index("10:00:00"), 40);
        assert_eq!(nearest_option_index("10:00:01"), 41);
        assert_eq!(nearest_option_index("10:07:30"), 41);
        assert_eq!(nearest_option_index("23:50:00"), 0);
        assert_eq!(nearest_option_index("garbage"), 0);
    }

    #[test]
    fn option_at_wraps() {
        assert_eq!(option_at(0, -1), (95, "23:45:00".to_string()));
        assert_eq!(option_at(95, 1), (0, "00:00:00".to_string()));
        assert_eq!(option_at(40, 2), (42, "10:30:00".to_string()));
    }
}
