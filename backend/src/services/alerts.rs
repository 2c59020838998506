//! Alert decision service
//!
//! Wraps the pure decision rule with configuration defaults, email syntax
//! checking, and the context values a dispatch collaborator embeds. The
//! service holds no state: the caller owns the history and advances it
//! only after a successful send.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use shared::alerting::{cooldown_remaining_hours, should_send_alert};
use shared::cache::Clock;
use shared::models::{AlertContext, AlertState};
use shared::scoring::{minimum_kp_for_latitude, score_label};
use shared::validation::{validate_cooldown_hours, validate_email, validate_kp_threshold};

use crate::config::{AlertsConfig, SmtpConfig};
use crate::error::{AppError, AppResult};

/// Input for one alert decision
#[derive(Debug, Clone, Deserialize)]
pub struct AlertDecisionInput {
    /// Current Kp reading; absent means the feed was down
    pub kp: Option<f64>,
    /// Override of the configured threshold
    pub threshold: Option<f64>,
    /// Override of the configured cooldown
    pub cooldown_hours: Option<f64>,
    /// Caller-held history (`last_alert`, `sent_count`)
    #[serde(flatten)]
    pub state: AlertState,
    /// Recipient address to check, when the caller intends to email
    pub email: Option<String>,
    /// Context for the dispatch collaborator
    pub score: Option<f64>,
    pub cloud_pct: Option<f64>,
    #[serde(default)]
    pub is_dark: bool,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
}

/// Outcome of one alert decision
#[derive(Debug, Clone, Serialize)]
pub struct AlertDecision {
    pub should_send: bool,
    /// Threshold that was applied, after defaulting
    pub threshold: f64,
    /// Cooldown that was applied, after defaulting
    pub cooldown_hours: f64,
    /// Hours left before the next alert may fire; `None` before the first
    pub cooldown_remaining_hours: Option<f64>,
    /// Syntax verdict for the supplied recipient address
    pub email_valid: Option<bool>,
    /// The session counter as it would read after a successful send
    pub next_sent_count: u32,
    /// Values for the dispatch collaborator, present when sending
    pub context: Option<AlertContext>,
}

/// Dispatch collaborator readiness, credential withheld
#[derive(Debug, Clone, Serialize)]
pub struct DispatchStatus {
    pub email_configured: bool,
    pub sender: Option<String>,
}

/// Alert decision making
#[derive(Clone)]
pub struct AlertService {
    defaults: AlertsConfig,
    smtp: SmtpConfig,
    clock: Arc<dyn Clock>,
}

impl AlertService {
    pub fn new(defaults: AlertsConfig, smtp: SmtpConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            defaults,
            smtp,
            clock,
        }
    }

    /// Decide whether an alert should go out now
    pub fn decide(&self, input: AlertDecisionInput) -> AppResult<AlertDecision> {
        let threshold = input.threshold.unwrap_or(self.defaults.kp_threshold);
        validate_kp_threshold(threshold).map_err(|e| AppError::Validation(e.to_string()))?;

        let cooldown = input.cooldown_hours.unwrap_or(self.defaults.cooldown_hours);
        validate_cooldown_hours(cooldown).map_err(|e| AppError::Validation(e.to_string()))?;

        let email_valid = input.email.as_deref().map(validate_email);

        let now = self.clock.now();
        let should_send = should_send_alert(input.kp, threshold, input.state.last_alert, cooldown, now);
        let remaining = cooldown_remaining_hours(input.state.last_alert, cooldown, now);

        let context = if should_send {
            input.kp.map(|kp| {
                let score = input.score.unwrap_or(0.0);
                AlertContext {
                    kp,
                    score,
                    label: score_label(score),
                    cloud_pct: input.cloud_pct,
                    is_dark: input.is_dark,
                    location_name: input.location_name.clone().unwrap_or_default(),
                    minimum_kp: input.latitude.and_then(minimum_kp_for_latitude),
                }
            })
        } else {
            None
        };

        Ok(AlertDecision {
            should_send,
            threshold,
            cooldown_hours: cooldown,
            cooldown_remaining_hours: remaining,
            email_valid,
            next_sent_count: input.state.sent_count.saturating_add(1),
            context,
        })
    }

    /// Whether the email dispatch bundle is fully configured
    pub fn dispatch_status(&self) -> DispatchStatus {
        DispatchStatus {
            email_configured: self.smtp.is_configured(),
            sender: if self.smtp.sender.is_empty() {
                None
            } else {
                Some(self.smtp.sender.clone())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn service() -> AlertService {
        AlertService::new(
            AlertsConfig {
                kp_threshold: 5.0,
                cooldown_hours: 1.0,
            },
            SmtpConfig {
                host: String::new(),
                port: 587,
                sender: String::new(),
                password: String::new(),
            },
            Arc::new(FixedClock(
                Utc.with_ymd_and_hms(2024, 11, 5, 22, 0, 0).unwrap(),
            )),
        )
    }

    fn input(kp: Option<f64>) -> AlertDecisionInput {
        AlertDecisionInput {
            kp,
            threshold: None,
            cooldown_hours: None,
            state: AlertState::default(),
            email: None,
            score: None,
            cloud_pct: None,
            is_dark: false,
            location_name: None,
            latitude: None,
        }
    }

    #[test]
    fn test_first_alert_fires_with_context() {
        let mut request = input(Some(6.0));
        request.score = Some(0.72);
        request.cloud_pct = Some(20.0);
        request.is_dark = true;
        request.location_name = Some("Tromsø".to_string());
        request.latitude = Some(69.6492);

        let decision = service().decide(request).unwrap();
        assert!(decision.should_send);
        assert_eq!(decision.next_sent_count, 1);

        let context = decision.context.unwrap();
        assert_eq!(context.kp, 6.0);
        assert_eq!(context.location_name, "Tromsø");
        assert_eq!(context.minimum_kp, Some(0));
        assert!(context.is_dark);
    }

    #[test]
    fn test_recent_alert_suppresses_and_reports_remaining() {
        let mut request = input(Some(6.0));
        request.state.last_alert = Some(Utc.with_ymd_and_hms(2024, 11, 5, 21, 30, 0).unwrap());
        request.state.sent_count = 3;

        let decision = service().decide(request).unwrap();
        assert!(!decision.should_send);
        assert!(decision.context.is_none());
        assert_eq!(decision.next_sent_count, 4);
        let remaining = decision.cooldown_remaining_hours.unwrap();
        assert!((remaining - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_kp_never_sends() {
        let decision = service().decide(input(None)).unwrap();
        assert!(!decision.should_send);
        assert!(decision.context.is_none());
    }

    #[test]
    fn test_threshold_override_applies() {
        let mut request = input(Some(4.0));
        request.threshold = Some(3.5);

        let decision = service().decide(request).unwrap();
        assert!(decision.should_send);
        assert_eq!(decision.threshold, 3.5);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let mut request = input(Some(6.0));
        request.threshold = Some(12.0);

        assert!(matches!(
            service().decide(request),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_email_verdict_piggybacks_on_decision() {
        let mut request = input(Some(6.0));
        request.email = Some("watcher@example.com".to_string());
        let decision = service().decide(request).unwrap();
        assert_eq!(decision.email_valid, Some(true));

        let mut request = input(Some(6.0));
        request.email = Some("not-an-email".to_string());
        let decision = service().decide(request).unwrap();
        assert_eq!(decision.email_valid, Some(false));

        let decision = service().decide(input(Some(6.0))).unwrap();
        assert_eq!(decision.email_valid, None);
    }

    #[test]
    fn test_dispatch_status_without_credentials() {
        let status = service().dispatch_status();
        assert!(!status.email_configured);
        assert!(status.sender.is_none());
    }
}
