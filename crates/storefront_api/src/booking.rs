use cart::NewCartItem;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::entities::{BookingSelection, Service, Slot};
use crate::errors::ValidationError;

pub const DEFAULT_BOOKING_HORIZON_DAYS: u32 = 30;

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.trim().to_ascii_uppercase().as_str() {
        "MONDAY" => Some(Weekday::Mon),
        "TUESDAY" => Some(Weekday::Tue),
        "WEDNESDAY" => Some(Weekday::Wed),
        "THURSDAY" => Some(Weekday::Thu),
        "FRIDAY" => Some(Weekday::Fri),
        "SATURDAY" => Some(Weekday::Sat),
        "SUNDAY" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Dates in `[today, today + horizon_days)` on which the service works.
pub fn available_dates(service: &Service, today: NaiveDate, horizon_days: u32) -> Vec<NaiveDate> {
    let working_days: Vec<Weekday> = service
        .available_days
        .iter()
        .filter_map(|day| weekday_from_name(day))
        .collect();

    (0..horizon_days)
        .map(|offset| today + Duration::days(i64::from(offset)))
        .filter(|date| working_days.contains(&date.weekday()))
        .collect()
}

/// Slots that still have free spots.
pub fn bookable_slots(slots: &[Slot]) -> Vec<&Slot> {
    slots.iter().filter(|slot| slot.is_available()).collect()
}

impl BookingSelection {
    pub fn new(date: Option<NaiveDate>, slot: Option<&Slot>) -> Result<Self, ValidationError> {
        match (date, slot) {
            (Some(_), Some(slot)) if !slot.is_available() => Err(ValidationError::SlotIsFull {
                start_time: slot.start_time,
            }),
            (Some(date), Some(slot)) => Ok(Self {
                date,
                time: slot.start_time,
            }),
            _ => Err(ValidationError::MissingBookingSelection),
        }
    }
}

impl Service {
    pub fn to_booked_cart_item(&self, selection: &BookingSelection) -> NewCartItem {
        self.to_cart_item()
            .with_booking(&selection.date_str(), &selection.time_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::parse_date;
    use chrono::NaiveTime;
    use rust_decimal_macros::dec;

    fn service(available_days: &[&str]) -> Service {
        Service {
            id: String::from("s1"),
            name: String::from("Yoga"),
            description: None,
            price: dec!(15),
            category: None,
            image_url: None,
            active: true,
            duration_minutes: Some(60),
            schedule_type: None,
            max_capacity: Some(5),
            requires_booking: true,
            available_days: available_days.iter().map(|d| d.to_string()).collect(),
        }
    }

    fn slot(hour: u32, available_spots: i32) -> Slot {
        Slot {
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0),
            date: None,
            available_spots,
            total_capacity: 5,
        }
    }

    #[test]
    #[allow(non_snake_case)]
    fn available_dates__mondays_and_fridays__should_return_matching_dates_only() {
        // 2024-11-11 is a Monday
        let today = parse_date("2024-11-11").unwrap();

        let dates = available_dates(&service(&["MONDAY", "FRIDAY"]), today, 14);

        assert_eq!(
            dates,
            vec![
                parse_date("2024-11-11").unwrap(),
                parse_date("2024-11-15").unwrap(),
                parse_date("2024-11-18").unwrap(),
                parse_date("2024-11-22").unwrap(),
            ]
        );
    }

    #[test]
    #[allow(non_snake_case)]
    fn available_dates__no_available_days__should_return_nothing() {
        let today = parse_date("2024-11-11").unwrap();

        assert!(available_dates(&service(&[]), today, DEFAULT_BOOKING_HORIZON_DAYS).is_empty());
        assert!(
            available_dates(&service(&["HOLIDAY"]), today, DEFAULT_BOOKING_HORIZON_DAYS).is_empty()
        );
    }

    #[test]
    #[allow(non_snake_case)]
    fn available_dates__every_day__should_cover_the_whole_horizon() {
        let every_day = [
            "MONDAY", "TUESDAY", "WEDNESDAY", "THURSDAY", "FRIDAY", "SATURDAY", "SUNDAY",
        ];
        let today = parse_date("2024-11-11").unwrap();

        let dates = available_dates(&service(&every_day), today, DEFAULT_BOOKING_HORIZON_DAYS);

        assert_eq!(dates.len(), 30);
        assert_eq!(dates.last(), Some(&parse_date("2024-12-10").unwrap()));
    }

    #[test]
    #[allow(non_snake_case)]
    fn bookable_slots__mixed_slots__should_skip_full_ones() {
        let slots = vec![slot(9, 2), slot(10, 0), slot(11, 1)];

        let bookable = bookable_slots(&slots);

        assert_eq!(bookable, vec![&slots[0], &slots[2]]);
    }

    #[test]
    #[allow(non_snake_case)]
    fn booking_selection__missing_date_or_slot__should_be_a_validation_error() {
        let date = parse_date("2024-11-15").unwrap();
        let free = slot(9, 1);

        assert_eq!(
            BookingSelection::new(None, Some(&free)),
            Err(ValidationError::MissingBookingSelection)
        );
        assert_eq!(
            BookingSelection::new(Some(date), None),
            Err(ValidationError::MissingBookingSelection)
        );
    }

    #[test]
    #[allow(non_snake_case)]
    fn booking_selection__full_slot__should_be_rejected() {
        let date = parse_date("2024-11-15").unwrap();
        let full = slot(10, 0);

        assert_eq!(
            BookingSelection::new(Some(date), Some(&full)),
            Err(ValidationError::SlotIsFull {
                start_time: full.start_time
            })
        );
    }

    #[test]
    #[allow(non_snake_case)]
    fn to_booked_cart_item__valid_selection__should_carry_booking_fields() {
        let date = parse_date("2024-11-15").unwrap();
        let selection = BookingSelection::new(Some(date), Some(&slot(14, 3))).unwrap();

        let item = service(&["FRIDAY"]).to_booked_cart_item(&selection);

        assert_eq!(item.booking_date.as_deref(), Some("2024-11-15"));
        assert_eq!(item.booking_time.as_deref(), Some("14:00"));
        assert_eq!(item.stock, None);
    }
}
