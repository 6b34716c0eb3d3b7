// Ordered validation rules
// The order is a correctness requirement: each check short-circuits and
// decides which reason a token failing several rules at once reports

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::entities::{AttendanceToken, EventRecord};
use crate::services::geo;
use crate::utils::minutes_until;
use crate::value_objects::{LocationFix, RejectReason, StudentId, Verdict};
use crate::value_objects::verdict::Approval;

#[derive(Debug, Clone)]
pub struct ValidationRules {
    pub accuracy_threshold_meters: f64,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            accuracy_threshold_meters: geo::DEFAULT_ACCURACY_THRESHOLD_METERS,
        }
    }
}

impl ValidationRules {
    /// Evaluate the ordered checks against an already-loaded event (the
    /// caller handles existence). Geofence before accuracy: a wildly
    /// off-radius low-accuracy fix reports the mismatch, a borderline one
    /// reports the inaccuracy. A configured manual expiration replaces the
    /// token's own expiration entirely.
    pub fn evaluate(
        &self,
        event: &EventRecord,
        token: &AttendanceToken,
        fix: Option<&LocationFix>,
        student: &StudentId,
        now: DateTime<Utc>,
    ) -> Verdict {
        let mut distance_meters = None;
        let mut location_verified = false;

        if let Some(geofence) = &event.geofence {
            let Some(fix) = fix else {
                return Verdict::rejected(RejectReason::LocationUnavailable, Some(event.clone()));
            };
            // No verification possible from unusable coordinates; never let
            // the zero distance they produce pass as "inside the fence".
            if !geofence.center().is_usable() || !fix.coordinate().is_usable() {
                warn!(
                    event_id = %event.id.as_str(),
                    "geofence check skipped, unusable coordinates"
                );
                return Verdict::rejected(RejectReason::LocationUnavailable, Some(event.clone()));
            }

            let (within, distance) = geo::is_within_radius(fix, geofence);
            if !within {
                return Verdict::rejected(
                    RejectReason::LocationMismatch {
                        distance_meters: distance,
                        allowed_radius_meters: geofence.radius,
                    },
                    Some(event.clone()),
                );
            }
            if !geo::is_accurate(fix, self.accuracy_threshold_meters) {
                return Verdict::rejected(
                    RejectReason::LocationInaccurate {
                        accuracy_meters: fix.accuracy_meters,
                        threshold_meters: self.accuracy_threshold_meters,
                    },
                    Some(event.clone()),
                );
            }
            distance_meters = Some(distance);
            location_verified = true;
        }

        if let Some(manual_expiration) = event.qr_manual_expiration {
            if now > manual_expiration {
                return Verdict::rejected(
                    RejectReason::QrCodeExpired {
                        expired_at: manual_expiration,
                    },
                    Some(event.clone()),
                );
            }
        } else if let Some(expires_at) = token.expires_at {
            if now > expires_at {
                return Verdict::rejected(
                    RejectReason::QrCodeExpired {
                        expired_at: expires_at,
                    },
                    Some(event.clone()),
                );
            }
        }

        if let Some(deadline) = event.attendance_deadline {
            if now > deadline {
                return Verdict::rejected(
                    RejectReason::AttendanceDeadlinePassed { deadline },
                    Some(event.clone()),
                );
            }
        }

        if let Some(start_time) = event.start_time {
            if now < start_time {
                return Verdict::rejected(
                    RejectReason::EventNotStarted {
                        minutes_until_start: minutes_until(now, start_time),
                    },
                    Some(event.clone()),
                );
            }
        }

        if event.has_attendee(student) {
            return Verdict::rejected(RejectReason::AlreadyAttended, Some(event.clone()));
        }

        Verdict::Approved(Approval {
            event: event.clone(),
            distance_meters,
            location_verified,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::entities::AttendanceRecord;
    use crate::value_objects::{EventId, Geofence};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 10, 0, 0).unwrap()
    }

    fn event() -> EventRecord {
        EventRecord {
            id: EventId("evt-1".to_string()),
            title: "Seminar".to_string(),
            start_time: Some(now() - Duration::hours(1)),
            geofence: None,
            qr_manual_expiration: None,
            attendance_deadline: None,
            attendees: Vec::new(),
            version: 0,
        }
    }

    fn geofenced_event(radius: f64) -> EventRecord {
        EventRecord {
            geofence: Some(Geofence {
                latitude: 14.5995,
                longitude: 120.9842,
                radius,
                address: None,
            }),
            ..event()
        }
    }

    fn token() -> AttendanceToken {
        AttendanceToken {
            event_id: EventId("evt-1".to_string()),
            event_title: "Seminar".to_string(),
            issued_at: Some(now() - Duration::minutes(5)),
            expires_at: Some(now() + Duration::hours(23)),
            uses_manual_expiration: false,
            geofence_snapshot: None,
        }
    }

    fn fix_at(latitude: f64, longitude: f64, accuracy_meters: f64) -> LocationFix {
        LocationFix {
            latitude,
            longitude,
            accuracy_meters,
            captured_at: now(),
        }
    }

    fn student() -> StudentId {
        StudentId("2023-00123".to_string())
    }

    fn attendee(student_id: &str) -> AttendanceRecord {
        AttendanceRecord {
            student_id: StudentId(student_id.to_string()),
            student_name: "Recorded Earlier".to_string(),
            course: "BSIT".to_string(),
            year_level: "3".to_string(),
            block: "B".to_string(),
            gender: "F".to_string(),
            scanned_at: now() - Duration::minutes(30),
            qr_issued_at: None,
            qr_expires_at: None,
            uses_manual_expiration: false,
            location: None,
        }
    }

    fn rules() -> ValidationRules {
        ValidationRules::default()
    }

    #[test]
    fn approves_ungeofenced_event_without_fix() {
        let verdict = rules().evaluate(&event(), &token(), None, &student(), now());
        match verdict {
            Verdict::Approved(approval) => {
                assert!(!approval.location_verified);
                assert!(approval.distance_meters.is_none());
            }
            Verdict::Rejected(rejection) => panic!("unexpected rejection: {:?}", rejection.reason),
        }
    }

    #[test]
    fn approves_inside_geofence_with_distance() {
        let verdict = rules().evaluate(
            &geofenced_event(100.0),
            &token(),
            Some(&fix_at(14.5996, 120.9842, 10.0)),
            &student(),
            now(),
        );
        match verdict {
            Verdict::Approved(approval) => {
                assert!(approval.location_verified);
                let distance = approval.distance_meters.expect("distance computed");
                assert!(distance < 100.0);
            }
            Verdict::Rejected(rejection) => panic!("unexpected rejection: {:?}", rejection.reason),
        }
    }

    #[test]
    fn geofence_mismatch_wins_over_expired_manual_qr() {
        // Failing both rules at once must report the geofence first.
        let stale = EventRecord {
            qr_manual_expiration: Some(now() - Duration::hours(1)),
            ..geofenced_event(50.0)
        };
        // ~220 m north of center.
        let verdict = rules().evaluate(
            &stale,
            &token(),
            Some(&fix_at(14.6015, 120.9842, 10.0)),
            &student(),
            now(),
        );
        match verdict.reject_reason() {
            Some(RejectReason::LocationMismatch {
                distance_meters,
                allowed_radius_meters,
            }) => {
                assert!(*distance_meters > 50.0);
                assert_eq!(*allowed_radius_meters, 50.0);
            }
            other => panic!("expected LocationMismatch, got {other:?}"),
        }
    }

    #[test]
    fn off_radius_inaccurate_fix_reports_mismatch_not_inaccuracy() {
        let verdict = rules().evaluate(
            &geofenced_event(50.0),
            &token(),
            Some(&fix_at(14.6015, 120.9842, 500.0)),
            &student(),
            now(),
        );
        assert!(matches!(
            verdict.reject_reason(),
            Some(RejectReason::LocationMismatch { .. })
        ));
    }

    #[test]
    fn borderline_inaccurate_fix_reports_inaccuracy() {
        let verdict = rules().evaluate(
            &geofenced_event(100.0),
            &token(),
            Some(&fix_at(14.5996, 120.9842, 80.0)),
            &student(),
            now(),
        );
        match verdict.reject_reason() {
            Some(RejectReason::LocationInaccurate {
                accuracy_meters, ..
            }) => assert_eq!(*accuracy_meters, 80.0),
            other => panic!("expected LocationInaccurate, got {other:?}"),
        }
    }

    #[test]
    fn geofenced_event_without_fix_is_unavailable_not_bypassed() {
        let verdict = rules().evaluate(&geofenced_event(50.0), &token(), None, &student(), now());
        assert!(matches!(
            verdict.reject_reason(),
            Some(RejectReason::LocationUnavailable)
        ));
    }

    #[test]
    fn null_island_fix_cannot_pass_a_geofence() {
        let verdict = rules().evaluate(
            &geofenced_event(50.0),
            &token(),
            Some(&fix_at(0.0, 0.0, 5.0)),
            &student(),
            now(),
        );
        assert!(matches!(
            verdict.reject_reason(),
            Some(RejectReason::LocationUnavailable)
        ));
    }

    #[test]
    fn manual_expiration_in_past_rejects() {
        let expired = EventRecord {
            qr_manual_expiration: Some(now() - Duration::minutes(10)),
            ..event()
        };
        match rules()
            .evaluate(&expired, &token(), None, &student(), now())
            .reject_reason()
        {
            Some(RejectReason::QrCodeExpired { expired_at }) => {
                assert_eq!(*expired_at, now() - Duration::minutes(10));
            }
            other => panic!("expected QrCodeExpired, got {other:?}"),
        }
    }

    #[test]
    fn token_expiration_rejects_with_token_timestamp() {
        let stale_token = AttendanceToken {
            expires_at: Some(now() - Duration::hours(1)),
            ..token()
        };
        match rules()
            .evaluate(&event(), &stale_token, None, &student(), now())
            .reject_reason()
        {
            Some(RejectReason::QrCodeExpired { expired_at }) => {
                assert_eq!(*expired_at, now() - Duration::hours(1));
            }
            other => panic!("expected QrCodeExpired, got {other:?}"),
        }
    }

    #[test]
    fn live_manual_expiration_overrides_stale_token_expiration() {
        // Admin extended the window after this QR was printed; the token's
        // own lapsed expiresAt must not be consulted.
        let extended = EventRecord {
            qr_manual_expiration: Some(now() + Duration::hours(1)),
            ..event()
        };
        let stale_token = AttendanceToken {
            expires_at: Some(now() - Duration::hours(1)),
            uses_manual_expiration: true,
            ..token()
        };
        let verdict = rules().evaluate(&extended, &stale_token, None, &student(), now());
        assert!(verdict.is_approved());
    }

    #[test]
    fn attendance_deadline_rejects_after_deadline() {
        let closed = EventRecord {
            attendance_deadline: Some(now() - Duration::minutes(1)),
            ..event()
        };
        assert!(matches!(
            rules()
                .evaluate(&closed, &token(), None, &student(), now())
                .reject_reason(),
            Some(RejectReason::AttendanceDeadlinePassed { .. })
        ));
    }

    #[test]
    fn not_started_event_reports_minutes_until_start() {
        let upcoming = EventRecord {
            start_time: Some(now() + Duration::minutes(30)),
            ..event()
        };
        match rules()
            .evaluate(&upcoming, &token(), None, &student(), now())
            .reject_reason()
        {
            Some(RejectReason::EventNotStarted { minutes_until_start }) => {
                assert_eq!(*minutes_until_start, 30);
            }
            other => panic!("expected EventNotStarted, got {other:?}"),
        }
    }

    #[test]
    fn already_attended_rejects_and_leaves_attendees_untouched() {
        let mut attended = event();
        attended.attendees.push(attendee("2023-00123"));

        let verdict = rules().evaluate(&attended, &token(), None, &student(), now());
        assert!(matches!(
            verdict.reject_reason(),
            Some(RejectReason::AlreadyAttended)
        ));
        assert_eq!(attended.attendee_count(), 1);
    }

    #[test]
    fn other_students_record_does_not_block() {
        let mut attended = event();
        attended.attendees.push(attendee("2023-99999"));
        assert!(rules()
            .evaluate(&attended, &token(), None, &student(), now())
            .is_approved());
    }
}
