//! Label Maps Module
//! Integer category codes from the datasets mapped to display names.

/// Year code used by the datasets: 0 = 2011, 1 = 2012.
pub fn year_label(code: i64) -> Option<&'static str> {
    match code {
        0 => Some("2011"),
        1 => Some("2012"),
        _ => None,
    }
}

/// Month 1-12 to three-letter name.
pub fn month_name(code: i64) -> Option<&'static str> {
    match code {
        1 => Some("Jan"),
        2 => Some("Feb"),
        3 => Some("Mar"),
        4 => Some("Apr"),
        5 => Some("May"),
        6 => Some("Jun"),
        7 => Some("Jul"),
        8 => Some("Aug"),
        9 => Some("Sep"),
        10 => Some("Oct"),
        11 => Some("Nov"),
        12 => Some("Dec"),
        _ => None,
    }
}

/// Season 1-4 to name.
pub fn season_name(code: i64) -> Option<&'static str> {
    match code {
        1 => Some("Spring"),
        2 => Some("Summer"),
        3 => Some("Fall"),
        4 => Some("Winter"),
        _ => None,
    }
}

/// Weather situation 1 (clearest) to 4 (most severe).
pub fn weather_condition(code: i64) -> Option<&'static str> {
    match code {
        1 => Some("Clear"),
        2 => Some("Mist/Cloudy"),
        3 => Some("Light Rain/Snow"),
        4 => Some("Heavy Rain/Snow"),
        _ => None,
    }
}

pub fn holiday_label(code: i64) -> Option<&'static str> {
    match code {
        0 => Some("Non-Holiday"),
        1 => Some("Holiday"),
        _ => None,
    }
}

pub fn workday_label(code: i64) -> Option<&'static str> {
    match code {
        0 => Some("Non-Workday"),
        1 => Some("Workday"),
        _ => None,
    }
}

/// Three-way day classification. A holiday wins over the workingday flag.
pub fn day_type(holiday: i64, workingday: i64) -> &'static str {
    if holiday == 1 {
        "Holiday"
    } else if workingday == 1 {
        "Working Day"
    } else {
        "Non-Working Day"
    }
}

/// Hour 0-23 as a clock label.
pub fn hour_label(code: i64) -> String {
    format!("{:02}:00", code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_map_is_total_over_valid_codes() {
        assert_eq!(year_label(0), Some("2011"));
        assert_eq!(year_label(1), Some("2012"));
        assert_eq!(year_label(2), None);
    }

    #[test]
    fn month_names_cover_full_year() {
        for m in 1..=12 {
            assert!(month_name(m).is_some());
        }
        assert_eq!(month_name(1), Some("Jan"));
        assert_eq!(month_name(12), Some("Dec"));
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn season_and_weather_codes() {
        assert_eq!(season_name(1), Some("Spring"));
        assert_eq!(season_name(4), Some("Winter"));
        assert_eq!(weather_condition(2), Some("Mist/Cloudy"));
        assert_eq!(weather_condition(5), None);
    }

    #[test]
    fn holiday_takes_precedence_over_workingday() {
        assert_eq!(day_type(1, 1), "Holiday");
        assert_eq!(day_type(0, 1), "Working Day");
        assert_eq!(day_type(0, 0), "Non-Working Day");
    }
}
