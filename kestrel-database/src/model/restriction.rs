use serde::{Deserialize, Serialize};

/// What a restriction does to command access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestrictionKind {
    /// Unconditional block until lifted by staff or a successful appeal.
    Ban,
    /// Block until the stored expiry passes.
    Mute,
}

impl RestrictionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RestrictionKind::Ban => "ban",
            RestrictionKind::Mute => "mute",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ban" => Some(RestrictionKind::Ban),
            "mute" => Some(RestrictionKind::Mute),
            _ => None,
        }
    }
}

/// One row of `command_restrictions`.
///
/// A global record (`is_global`) takes precedence over a guild-scoped one for
/// the same user.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RestrictionRecord {
    pub guild_id: u64,
    pub user_id: u64,
    pub kind: RestrictionKind,
    pub reason: String,
    pub expires_at: Option<u64>,
    pub moderator_id: u64,
    pub is_global: bool,
    pub created_at: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RestrictionDecision {
    /// The record has lapsed and should be deleted.
    Expired,
    /// Commands stay blocked.
    Blocked {
        kind: RestrictionKind,
        reason: String,
        is_global: bool,
        /// Seconds left on a mute; `None` for indefinite restrictions.
        remaining: Option<u64>,
    },
}

/// Decide what a stored restriction means right now.
///
/// Expiry applies to any kind carrying a timestamp, so a ban with an expiry
/// set lapses like a mute would.
pub fn evaluate(record: &RestrictionRecord, now: u64) -> RestrictionDecision {
    if let Some(expires_at) = record.expires_at
        && expires_at <= now
    {
        return RestrictionDecision::Expired;
    }

    RestrictionDecision::Blocked {
        kind: record.kind,
        reason: record.reason.clone(),
        is_global: record.is_global,
        remaining: record.expires_at.map(|expires_at| expires_at - now),
    }
}

#[cfg(test)]
mod tests {
    use super::{RestrictionDecision, RestrictionKind, RestrictionRecord, evaluate};

    fn record(kind: RestrictionKind, expires_at: Option<u64>) -> RestrictionRecord {
        RestrictionRecord {
            guild_id: 10,
            user_id: 20,
            kind,
            reason: "testing".to_owned(),
            expires_at,
            moderator_id: 30,
            is_global: false,
            created_at: 1_000,
        }
    }

    #[test]
    fn bans_block_indefinitely() {
        let decision = evaluate(&record(RestrictionKind::Ban, None), 5_000);
        assert_eq!(
            decision,
            RestrictionDecision::Blocked {
                kind: RestrictionKind::Ban,
                reason: "testing".to_owned(),
                is_global: false,
                remaining: None,
            }
        );
    }

    #[test]
    fn active_mutes_report_remaining_seconds() {
        let decision = evaluate(&record(RestrictionKind::Mute, Some(2_000)), 1_500);
        match decision {
            RestrictionDecision::Blocked { remaining, .. } => assert_eq!(remaining, Some(500)),
            other => panic!("expected blocked, got {other:?}"),
        }
    }

    #[test]
    fn mutes_expire_at_the_boundary() {
        let decision = evaluate(&record(RestrictionKind::Mute, Some(2_000)), 2_000);
        assert_eq!(decision, RestrictionDecision::Expired);
    }

    #[test]
    fn mutes_without_expiry_block_indefinitely() {
        let decision = evaluate(&record(RestrictionKind::Mute, None), u64::MAX);
        match decision {
            RestrictionDecision::Blocked { remaining, .. } => assert_eq!(remaining, None),
            other => panic!("expected blocked, got {other:?}"),
        }
    }

    #[test]
    fn expiring_bans_lapse_too() {
        let decision = evaluate(&record(RestrictionKind::Ban, Some(100)), 101);
        assert_eq!(decision, RestrictionDecision::Expired);
    }

    #[test]
    fn kind_round_trips_through_strings() {
        assert_eq!(
            RestrictionKind::parse(RestrictionKind::Ban.as_str()),
            Some(RestrictionKind::Ban)
        );
        assert_eq!(
            RestrictionKind::parse(RestrictionKind::Mute.as_str()),
            Some(RestrictionKind::Mute)
        );
        assert_eq!(RestrictionKind::parse("timeout"), None);
    }
}
