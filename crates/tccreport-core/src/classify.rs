//! Turn raw `access` rows into [`PermissionRecord`]s and flag the ones that
//! matter most in an assessment.

use rusqlite::types::Value;

use crate::models::{AuthState, PermissionRecord, RawRow};

/// TCC services that grant control over the machine or capture user data.
///
/// Matching is exact and case-sensitive.
pub const HIGH_IMPACT_SERVICES: &[&str] = &[
    "kTCCServiceAccessibility",
    "kTCCServiceScreenCapture",
    "kTCCServiceSystemPolicyAllFiles",
    // Automation of other apps, synthetic input and input monitoring.
    "kTCCServiceAppleEvents",
    "kTCCServicePostEvent",
    "kTCCServiceListenEvent",
    "kTCCServiceMicrophone",
    "kTCCServiceCamera",
    "kTCCServiceCalendar",
    "kTCCServiceReminders",
    "kTCCServiceAddressBook",
];

/// Read a cell as text. Numbers are printed, blobs decoded lossily, NULL is
/// empty.
fn text_cell(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Text(s) => s,
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Blob(b) => String::from_utf8_lossy(&b).into_owned(),
    }
}

/// Read a cell as an integer. Reals are truncated, numeric text is parsed,
/// anything else is zero.
fn int_cell(value: &Value) -> i64 {
    match value {
        Value::Integer(i) => *i,
        Value::Real(f) => *f as i64,
        Value::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0)
        }
        Value::Null | Value::Blob(_) => 0,
    }
}

/// Normalize one raw row. Never fails, whatever the cells hold.
///
/// Negative prompt counts are clamped to zero.
pub fn classify(row: RawRow) -> PermissionRecord {
    let prompt_count = int_cell(&row.prompt_count).clamp(0, i64::from(u32::MAX)) as u32;

    PermissionRecord {
        service: text_cell(row.service),
        client: text_cell(row.client),
        auth_state: AuthState::from_code(int_cell(&row.auth_value)),
        prompt_count,
        last_modified: int_cell(&row.last_modified),
        sandbox_id: text_cell(row.sandbox_id),
    }
}

/// Whether the record's service is in [`HIGH_IMPACT_SERVICES`].
pub fn is_high_impact(record: &PermissionRecord) -> bool {
    HIGH_IMPACT_SERVICES.contains(&record.service.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn row(service: &str, auth_value: i64) -> RawRow {
        RawRow {
            service: text(service),
            client: text("com.example.App"),
            auth_value: Value::Integer(auth_value),
            prompt_count: Value::Integer(1),
            last_modified: Value::Integer(1_700_000_000),
            sandbox_id: Value::Null,
        }
    }

    #[test]
    fn classify_maps_every_field() {
        let record = classify(RawRow {
            service: text("kTCCServiceCamera"),
            client: text("com.example.App"),
            auth_value: Value::Integer(1),
            prompt_count: Value::Integer(3),
            last_modified: Value::Integer(1_700_000_000),
            sandbox_id: text("sandbox-1"),
        });

        assert_eq!(
            record,
            PermissionRecord {
                service: "kTCCServiceCamera".to_string(),
                client: "com.example.App".to_string(),
                auth_state: AuthState::Allowed,
                prompt_count: 3,
                last_modified: 1_700_000_000,
                sandbox_id: "sandbox-1".to_string(),
            }
        );
    }

    #[test]
    fn unknown_auth_codes_become_other() {
        for code in [3, 4, 7, 99, -1] {
            let record = classify(row("kTCCServiceCamera", code));
            assert_eq!(record.auth_state, AuthState::Other(code));
        }
    }

    #[test]
    fn null_sandbox_becomes_empty_string() {
        let record = classify(row("kTCCServiceCamera", 1));
        assert_eq!(record.sandbox_id, "");
        assert_ne!(record.sandbox_id, "null");
    }

    #[test]
    fn null_fields_are_normalized() {
        let record = classify(RawRow::default());
        assert_eq!(record.service, "");
        assert_eq!(record.client, "");
        assert_eq!(record.auth_state, AuthState::Denied);
        assert_eq!(record.prompt_count, 0);
        assert_eq!(record.last_modified, 0);
        assert_eq!(record.sandbox_id, "");
    }

    #[test]
    fn prompt_count_is_clamped() {
        let mut negative = row("kTCCServiceCamera", 1);
        negative.prompt_count = Value::Integer(-5);
        assert_eq!(classify(negative).prompt_count, 0);

        let mut huge = row("kTCCServiceCamera", 1);
        huge.prompt_count = Value::Integer(i64::MAX);
        assert_eq!(classify(huge).prompt_count, u32::MAX);
    }

    #[test]
    fn mistyped_text_cells_are_converted() {
        let record = classify(RawRow {
            service: Value::Integer(42),
            client: Value::Blob(vec![b'a', 0xFF, b'b']),
            sandbox_id: Value::Real(1.5),
            ..row("", 1)
        });
        assert_eq!(record.service, "42");
        assert_eq!(record.client, "a\u{FFFD}b");
        assert_eq!(record.sandbox_id, "1.5");
    }

    #[test]
    fn mistyped_integer_cells_are_converted() {
        let record = classify(RawRow {
            auth_value: text(" 2 "),
            prompt_count: Value::Real(3.9),
            last_modified: text("1700000000.7"),
            ..row("svc", 0)
        });
        assert_eq!(record.auth_state, AuthState::Prompt);
        assert_eq!(record.prompt_count, 3);
        assert_eq!(record.last_modified, 1_700_000_000);

        let record = classify(RawRow {
            auth_value: text("yes"),
            prompt_count: Value::Blob(vec![1, 2]),
            last_modified: text(""),
            ..row("svc", 1)
        });
        assert_eq!(record.auth_state, AuthState::Denied);
        assert_eq!(record.prompt_count, 0);
        assert_eq!(record.last_modified, 0);
    }

    #[test]
    fn listed_services_are_high_impact_regardless_of_state() {
        for service in HIGH_IMPACT_SERVICES {
            for code in [0, 1, 2, 9] {
                let record = classify(row(service, code));
                assert!(is_high_impact(&record), "{service} with code {code}");
            }
        }
    }

    #[test]
    fn high_impact_requires_exact_match() {
        for service in [
            "kTCCServiceAccessibilityExtra",
            "kTCCServiceAccessibilit",
            "ktccservicecamera",
            "KTCCSERVICECAMERA",
            " kTCCServiceCamera",
            "kTCCServiceCamera ",
            "kTCCServicePhotos",
            "",
        ] {
            let record = classify(row(service, 1));
            assert!(!is_high_impact(&record), "{service:?} should not be flagged");
        }
    }
}
