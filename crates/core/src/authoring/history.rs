use crate::models::{FollowUp, Patient, RepeatSource};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// An entry of the "repeat a previous prescription" picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatOption {
    pub source: RepeatSource,
    pub label: String,
}

/// Parses the date formats visits are stored with: a plain `YYYY-MM-DD` or an RFC 3339
/// timestamp.
fn visit_moment(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0);
    }
    DateTime::parse_from_rfc3339(date)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Visits newest first.
///
/// Dates that cannot be parsed sort after every parseable one, by their text. Visits with
/// the same date keep their stored order.
pub fn visits_by_date_desc(follow_ups: &[FollowUp]) -> Vec<&FollowUp> {
    let mut visits: Vec<&FollowUp> = follow_ups.iter().collect();
    visits.sort_by(|a, b| {
        let key_a = (visit_moment(a.date.as_str()), a.date.as_str());
        let key_b = (visit_moment(b.date.as_str()), b.date.as_str());
        key_b.cmp(&key_a)
    });
    visits
}

/// The choices offered when repeating a prescription: a fresh one, the intake one, then
/// one per distinct visit date in stored order.
pub fn repeat_options(patient: &Patient) -> Vec<RepeatOption> {
    let mut options = vec![
        RepeatOption {
            source: RepeatSource::Fresh,
            label: "-- New Selection --".into(),
        },
        RepeatOption {
            source: RepeatSource::Initial,
            label: "Initial Consultation".into(),
        },
    ];

    for visit in &patient.follow_ups {
        let date = visit.date.as_str();
        let source = RepeatSource::Visit(date.to_string());
        if options.iter().any(|o| o.source == source) {
            continue;
        }
        let label = visit_moment(date)
            .map(|at| at.format("%d %b %Y").to_string())
            .unwrap_or_else(|| date.to_string());
        options.push(RepeatOption { source, label });
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_types::NonEmptyText;
    use clinic_uuid::RecordId;

    fn visit(date: &str) -> FollowUp {
        FollowUp {
            id: RecordId::new(),
            date: NonEmptyText::new(date).unwrap(),
            notes: None,
            past_history: None,
            visit_observation: None,
            previous_appointment: None,
            medicines: Vec::new(),
            overall_suggestion: None,
        }
    }

    fn dates<'a>(visits: &[&'a FollowUp]) -> Vec<&'a str> {
        visits.iter().map(|v| v.date.as_str()).collect()
    }

    #[test]
    fn sorts_newest_first_across_formats() {
        let stored = vec![
            visit("2024-01-05"),
            visit("2024-03-01T10:00:00.000Z"),
            visit("last spring"),
            visit("2023-12-31"),
        ];

        let sorted = visits_by_date_desc(&stored);

        assert_eq!(
            dates(&sorted),
            ["2024-03-01T10:00:00.000Z", "2024-01-05", "2023-12-31", "last spring"]
        );
    }

    #[test]
    fn repeat_options_list_each_date_once() {
        let patient_json = serde_json::json!({
            "_id": RecordId::new().to_string(),
            "name": "A", "age": 30, "gender": "F", "phoneNumber": "1",
            "pMainDate": "2024-01-01", "healthConcerns": {"main": "x"},
            "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"
        });
        let mut patient: Patient = serde_json::from_value(patient_json).unwrap();
        patient.follow_ups = vec![visit("2024-02-03"), visit("2024-02-03"), visit("soon")];

        let options = repeat_options(&patient);
        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();

        assert_eq!(
            labels,
            ["-- New Selection --", "Initial Consultation", "03 Feb 2024", "soon"]
        );
        assert_eq!(options[2].source, RepeatSource::Visit("2024-02-03".into()));
    }
}
