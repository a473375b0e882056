use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
    pub allowed: &'static [&'static str],
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {}: '{}' (expected one of: {})",
            self.expected,
            self.got,
            self.allowed.join(", ")
        )
    }
}

impl std::error::Error for ParseEnumError {}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase().replace('_', "-")
}

/// Declares a kebab-case string enum with `as_str`, `ALL`, `Display` and
/// `FromStr`. The serde representation matches `as_str`.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $expected:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            const NAMES: &'static [&'static str] = &[$($text),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = normalize(s);
                match normalized.as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(ParseEnumError {
                        expected: $expected,
                        got: s.to_string(),
                        allowed: Self::NAMES,
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// How urgently a job target should be worked.
    Priority, "priority" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Priority {
    /// Sort rank: high sorts above medium above low.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

string_enum! {
    /// The nine fixed hunting columns, in board order.
    ColumnId, "column" {
        TargetsIdentified => "targets-identified",
        IntelGathering => "intel-gathering",
        WarmUpPhase => "warm-up-phase",
        OutreachInitiated => "outreach-initiated",
        FollowUpRequired => "follow-up-required",
        ConversationStarted => "conversation-started",
        InterviewPipeline => "interview-pipeline",
        StalledCold => "stalled-cold",
        OfferSuccess => "offer-success",
    }
}

impl Default for ColumnId {
    fn default() -> Self {
        Self::TargetsIdentified
    }
}

string_enum! {
    /// Channel used for an outreach attempt.
    OutreachType, "outreach type" {
        Dm => "dm",
        Email => "email",
        ReferralRequest => "referral-request",
        RecruiterContact => "recruiter-contact",
        ApplicationSubmitted => "application-submitted",
        ColdCall => "cold-call",
        NetworkingEvent => "networking-event",
    }
}

string_enum! {
    /// Relationship-building action taken before outreach.
    WarmUpActionType, "warm-up action type" {
        FollowLinkedin => "follow-linkedin",
        EngagePost => "engage-post",
        Comment => "comment",
        JoinCommunity => "join-community",
        AttendEvent => "attend-event",
        ReadContent => "read-content",
        ShareContent => "share-content",
    }
}

string_enum! {
    /// Why a target stalled or closed.
    StateReason, "state reason" {
        HiredElsewhere => "hired-elsewhere",
        RoleFrozen => "role-frozen",
        NoResponse => "no-response",
        NotInterested => "not-interested",
        OfferAccepted => "offer-accepted",
        OfferDeclined => "offer-declined",
        CompanyNotFit => "company-not-fit",
        TimelineMismatch => "timeline-mismatch",
    }
}

string_enum! {
    InterviewStage, "interview stage" {
        Screening => "screening",
        Technical => "technical",
        TeamInterview => "team-interview",
        HiringManager => "hiring-manager",
        FinalRound => "final-round",
        OfferPending => "offer-pending",
    }
}

string_enum! {
    /// Passive interest signal observed from the company side.
    SignalType, "signal type" {
        ProfileView => "profile-view",
        PostLike => "post-like",
        ConnectionAccept => "connection-accept",
        Message => "message",
        Other => "other",
    }
}

string_enum! {
    AttachmentType, "attachment type" {
        Image => "image",
        Pdf => "pdf",
        Url => "url",
    }
}

string_enum! {
    SortBy, "sort key" {
        Created => "created",
        Updated => "updated",
        Priority => "priority",
        Company => "company",
    }
}

impl Default for SortBy {
    fn default() -> Self {
        Self::Updated
    }
}

string_enum! {
    SortDirection, "sort direction" {
        Asc => "asc",
        Desc => "desc",
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        Self::Desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_json_uses_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ColumnId::WarmUpPhase).unwrap(),
            "\"warm-up-phase\""
        );
        assert_eq!(
            serde_json::to_string(&OutreachType::ReferralRequest).unwrap(),
            "\"referral-request\""
        );
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");

        assert_eq!(
            serde_json::from_str::<ColumnId>("\"offer-success\"").unwrap(),
            ColumnId::OfferSuccess
        );
        assert_eq!(
            serde_json::from_str::<InterviewStage>("\"final-round\"").unwrap(),
            InterviewStage::FinalRound
        );
    }

    #[test]
    fn display_parse_roundtrips() {
        for value in ColumnId::ALL {
            assert_eq!(ColumnId::from_str(&value.to_string()).unwrap(), *value);
        }
        for value in OutreachType::ALL {
            assert_eq!(OutreachType::from_str(value.as_str()).unwrap(), *value);
        }
        for value in WarmUpActionType::ALL {
            assert_eq!(WarmUpActionType::from_str(value.as_str()).unwrap(), *value);
        }
        for value in StateReason::ALL {
            assert_eq!(StateReason::from_str(value.as_str()).unwrap(), *value);
        }
    }

    #[test]
    fn parse_is_lenient_about_case_and_underscores() {
        assert_eq!(
            ColumnId::from_str("  Intel_Gathering ").unwrap(),
            ColumnId::IntelGathering
        );
        assert_eq!(Priority::from_str("HIGH").unwrap(), Priority::High);
    }

    #[test]
    fn parse_rejects_unknown_values() {
        let err = Priority::from_str("urgent").unwrap_err();
        assert_eq!(err.expected, "priority");
        assert!(err.to_string().contains("low, medium, high"));
        assert!(ColumnId::from_str("backlog").is_err());
        assert!(serde_json::from_str::<ColumnId>("\"backlog\"").is_err());
    }

    #[test]
    fn there_are_nine_columns() {
        assert_eq!(ColumnId::ALL.len(), 9);
        assert_eq!(ColumnId::default(), ColumnId::TargetsIdentified);
    }

    #[test]
    fn priority_rank_orders_high_first() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
        assert_eq!(Priority::default(), Priority::Medium);
    }
}
