use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
const TIME_WITH_SECONDS_FORMAT: &str = "%H:%M:%S%.f";

pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .context(format!("error on parsing a date from {}", date_str))
}

/// Accepts both `14:00` and `14:00:00(.fff)`.
pub fn parse_time(time_str: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(time_str, TIME_WITH_SECONDS_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(time_str, TIME_FORMAT))
        .context(format!("error on parsing a time from {}", time_str))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Treats an explicit `null` the same as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub mod slot_time {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{format_time, parse_time};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let time_str = String::deserialize(deserializer)?;
        parse_time(&time_str).map_err(de::Error::custom)
    }
}

pub mod optional_slot_time {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{format_time, parse_time};

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_some(&format_time(*time)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|time_str| parse_time(&time_str).map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_times_with_and_without_seconds() {
        let expected = NaiveTime::from_hms_opt(14, 30, 0).unwrap();

        assert_eq!(parse_time("14:30").unwrap(), expected);
        assert_eq!(parse_time("14:30:00").unwrap(), expected);
        assert_eq!(parse_time("14:30:00.000").unwrap(), expected);
        assert!(parse_time("2pm").is_err());
    }

    #[test]
    fn should_format_dates_and_times_the_way_orders_expect_them() {
        let date = parse_date("2024-11-05").unwrap();

        assert_eq!(format_date(date), "2024-11-05");
        assert_eq!(
            format_time(NaiveTime::from_hms_opt(9, 5, 0).unwrap()),
            "09:05"
        );
    }
}
