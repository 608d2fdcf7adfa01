//! Appointment time rules shared by bookings and piercings.

use chrono::NaiveDateTime;
use common::datetime;

use crate::errors::ServiceError;

pub const PAST_APPOINTMENT: &str = "Appointment date must be in the future";

/// Parse a client-supplied appointment time and require it to be strictly after `now`.
pub fn validate_appointment(raw: &str, now: NaiveDateTime) -> Result<NaiveDateTime, ServiceError> {
    let at = datetime::parse(raw).map_err(|_| {
        ServiceError::InvalidFormat(format!("Invalid date format. Use \"{}\".", datetime::DISPLAY_EXAMPLE))
    })?;
    if at <= now {
        return Err(ServiceError::InvalidSchedule(PAST_APPOINTMENT.into()));
    }
    Ok(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 4, 4).unwrap().and_hms_opt(17, 0, 0).unwrap()
    }

    #[test]
    fn future_time_is_accepted() {
        let at = validate_appointment("Thursday, April 4, 2030 5:01 PM", now()).unwrap();
        assert!(at > now());
    }

    #[test]
    fn same_instant_is_rejected() {
        let err = validate_appointment("Thursday, April 4, 2030 5:00 PM", now()).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidSchedule(_)));
    }

    #[test]
    fn past_time_is_rejected() {
        let err = validate_appointment("Monday, January 1, 2001 5:00 PM", now()).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidSchedule(ref m) if m == PAST_APPOINTMENT));
    }

    #[test]
    fn malformed_time_is_a_format_error() {
        let err = validate_appointment("2030-04-05 10:00", now()).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidFormat(ref m) if m.contains("Thursday, April 1, 2024 5:00 PM")));
    }
}
