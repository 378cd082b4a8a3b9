//! Enumerated filter values.
//!
//! Saved filters written by older clients store these values as display
//! labels (`"Partner - Financial"`) or lowercase keywords (`"no_value"`).
//! The typed filter set always carries the canonical GraphQL identifiers
//! (`PARTNER_FINANCIAL`, `NO_VALUE`).
//!
//! Label lookup here is exact. Lenient matching lives in the normalization
//! crate, which falls back to [`StatusFilter::DEFAULT`] and
//! [`NewsletterFilter::DEFAULT`] for tokens nothing recognizes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Contact status filter value.
///
/// Covers the pipeline statuses plus the three pseudo statuses the contact
/// list understands (`ACTIVE`, `HIDDEN`, `NULL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    /// Any status considered active.
    Active,
    /// Any status considered hidden.
    Hidden,
    /// No status set. Also the fallback for unrecognized labels.
    Null,
    NeverContacted,
    AskInFuture,
    CultivateRelationship,
    ContactForAppointment,
    AppointmentScheduled,
    CallForDecision,
    PartnerFinancial,
    PartnerSpecial,
    PartnerPray,
    NotInterested,
    Unresponsive,
    NeverAsk,
    ResearchAbandoned,
    ExpiredReferral,
    ResearchContactInfo,
}

impl StatusFilter {
    /// Value used for labels that match no known status.
    pub const DEFAULT: StatusFilter = StatusFilter::Null;

    pub fn all() -> &'static [StatusFilter] {
        &[
            Self::Active,
            Self::Hidden,
            Self::Null,
            Self::NeverContacted,
            Self::AskInFuture,
            Self::CultivateRelationship,
            Self::ContactForAppointment,
            Self::AppointmentScheduled,
            Self::CallForDecision,
            Self::PartnerFinancial,
            Self::PartnerSpecial,
            Self::PartnerPray,
            Self::NotInterested,
            Self::Unresponsive,
            Self::NeverAsk,
            Self::ResearchAbandoned,
            Self::ExpiredReferral,
            Self::ResearchContactInfo,
        ]
    }

    /// Returns the canonical GraphQL identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Hidden => "HIDDEN",
            Self::Null => "NULL",
            Self::NeverContacted => "NEVER_CONTACTED",
            Self::AskInFuture => "ASK_IN_FUTURE",
            Self::CultivateRelationship => "CULTIVATE_RELATIONSHIP",
            Self::ContactForAppointment => "CONTACT_FOR_APPOINTMENT",
            Self::AppointmentScheduled => "APPOINTMENT_SCHEDULED",
            Self::CallForDecision => "CALL_FOR_DECISION",
            Self::PartnerFinancial => "PARTNER_FINANCIAL",
            Self::PartnerSpecial => "PARTNER_SPECIAL",
            Self::PartnerPray => "PARTNER_PRAY",
            Self::NotInterested => "NOT_INTERESTED",
            Self::Unresponsive => "UNRESPONSIVE",
            Self::NeverAsk => "NEVER_ASK",
            Self::ResearchAbandoned => "RESEARCH_ABANDONED",
            Self::ExpiredReferral => "EXPIRED_REFERRAL",
            Self::ResearchContactInfo => "RESEARCH_CONTACT_INFO",
        }
    }

    /// Returns the label stored by legacy saved filters.
    pub fn legacy_label(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Hidden => "hidden",
            Self::Null => "null",
            Self::NeverContacted => "Never Contacted",
            Self::AskInFuture => "Ask in Future",
            Self::CultivateRelationship => "Cultivate Relationship",
            Self::ContactForAppointment => "Contact for Appointment",
            Self::AppointmentScheduled => "Appointment Scheduled",
            Self::CallForDecision => "Call for Decision",
            Self::PartnerFinancial => "Partner - Financial",
            Self::PartnerSpecial => "Partner - Special",
            Self::PartnerPray => "Partner - Pray",
            Self::NotInterested => "Not Interested",
            Self::Unresponsive => "Unresponsive",
            Self::NeverAsk => "Never Ask",
            Self::ResearchAbandoned => "Research Abandoned",
            Self::ExpiredReferral => "Expired Referral",
            Self::ResearchContactInfo => "Research Contact Info",
        }
    }

    /// Exact lookup by legacy label or canonical identifier.
    ///
    /// The identifier comparison ignores ASCII case so `partner_financial`
    /// resolves; legacy labels must match exactly.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::all().iter().copied().find(|status| {
            status.legacy_label() == label || status.as_str().eq_ignore_ascii_case(label)
        })
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("Unknown contact status: {s}"))
    }
}

/// Newsletter preference filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewsletterFilter {
    All,
    Both,
    Email,
    None,
    /// No preference recorded. Also the fallback for unrecognized labels.
    NoValue,
    Physical,
}

impl NewsletterFilter {
    /// Value used for labels that match no known preference.
    pub const DEFAULT: NewsletterFilter = NewsletterFilter::NoValue;

    pub fn all() -> &'static [NewsletterFilter] {
        &[
            Self::All,
            Self::Both,
            Self::Email,
            Self::None,
            Self::NoValue,
            Self::Physical,
        ]
    }

    /// Returns the canonical GraphQL identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Both => "BOTH",
            Self::Email => "EMAIL",
            Self::None => "NONE",
            Self::NoValue => "NO_VALUE",
            Self::Physical => "PHYSICAL",
        }
    }

    /// Labels stored by legacy saved filters. Physical mail was saved as
    /// either `address` or `physical` depending on the client version.
    pub fn legacy_labels(&self) -> &'static [&'static str] {
        match self {
            Self::All => &["all"],
            Self::Both => &["both"],
            Self::Email => &["email"],
            Self::None => &["none"],
            Self::NoValue => &["no_value"],
            Self::Physical => &["address", "physical"],
        }
    }

    /// Exact lookup by legacy label or canonical identifier.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::all().iter().copied().find(|newsletter| {
            newsletter.legacy_labels().contains(&label)
                || newsletter.as_str().eq_ignore_ascii_case(label)
        })
    }
}

impl fmt::Display for NewsletterFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NewsletterFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("Unknown newsletter preference: {s}"))
    }
}
