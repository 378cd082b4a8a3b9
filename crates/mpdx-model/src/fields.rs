//! Static filter field tables.
//!
//! Each list page has a fixed table mapping the canonical camelCase field key
//! to the kind of value the field holds. Coercion dispatches on
//! [`FieldKind`] instead of on the key string, and a [`FieldKey`] can only be
//! obtained from a table, so a typed filter set never holds unknown keys.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

use crate::page::PageKind;

/// Which enum an [`FieldKind::EnumSet`] field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
    Status,
    Newsletter,
}

/// Value shape of a filter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `"true"` or anything else.
    Boolean,
    /// `"<min>..<max>"` date bounds.
    DateRange,
    /// Comma-joined legacy labels resolved through a lookup table.
    EnumSet(EnumKind),
    /// Comma-joined strings kept verbatim.
    StringArray,
    /// Single string kept verbatim.
    ScalarString,
    /// `"<min>..<max>"` numeric bounds.
    NumericRange,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Boolean => "boolean",
            FieldKind::DateRange => "date range",
            FieldKind::EnumSet(EnumKind::Status) => "status set",
            FieldKind::EnumSet(EnumKind::Newsletter) => "newsletter set",
            FieldKind::StringArray => "string array",
            FieldKind::ScalarString => "string",
            FieldKind::NumericRange => "numeric range",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named, typed filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub kind: FieldKind,
}

impl FilterField {
    const fn new(key: &'static str, kind: FieldKind) -> Self {
        Self { key, kind }
    }
}

/// Key of a field known to a [`FieldTable`].
///
/// Compares, orders, and serializes as the camelCase key string.
#[derive(Clone, Copy)]
pub struct FieldKey(&'static FilterField);

impl FieldKey {
    pub fn as_str(&self) -> &'static str {
        self.0.key
    }

    pub fn kind(&self) -> FieldKind {
        self.0.kind
    }

    pub fn field(&self) -> &'static FilterField {
        self.0
    }
}

impl fmt::Debug for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldKey({})", self.0.key)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.key)
    }
}

impl PartialEq for FieldKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.key == other.0.key
    }
}

impl Eq for FieldKey {}

impl PartialOrd for FieldKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.key.cmp(other.0.key)
    }
}

impl Hash for FieldKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.key.hash(state);
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.key)
    }
}

/// The known fields of one list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTable {
    page: PageKind,
    fields: &'static [FilterField],
}

impl FieldTable {
    pub fn contacts() -> Self {
        Self {
            page: PageKind::Contacts,
            fields: CONTACT_FIELDS,
        }
    }

    pub fn tasks() -> Self {
        Self {
            page: PageKind::Tasks,
            fields: TASK_FIELDS,
        }
    }

    pub fn for_page(page: PageKind) -> Self {
        match page {
            PageKind::Contacts => Self::contacts(),
            PageKind::Tasks => Self::tasks(),
        }
    }

    pub fn page(&self) -> PageKind {
        self.page
    }

    pub fn fields(&self) -> &'static [FilterField] {
        self.fields
    }

    /// Looks up a field by its camelCase key.
    pub fn get(&self, key: &str) -> Option<&'static FilterField> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn key(&self, key: &str) -> Option<FieldKey> {
        self.get(key).map(FieldKey)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldTable {
    fn default() -> Self {
        Self::contacts()
    }
}

const fn boolean(key: &'static str) -> FilterField {
    FilterField::new(key, FieldKind::Boolean)
}

const fn date_range(key: &'static str) -> FilterField {
    FilterField::new(key, FieldKind::DateRange)
}

const fn strings(key: &'static str) -> FilterField {
    FilterField::new(key, FieldKind::StringArray)
}

const fn scalar(key: &'static str) -> FilterField {
    FilterField::new(key, FieldKind::ScalarString)
}

const fn numeric_range(key: &'static str) -> FilterField {
    FilterField::new(key, FieldKind::NumericRange)
}

const fn status_set(key: &'static str) -> FilterField {
    FilterField::new(key, FieldKind::EnumSet(EnumKind::Status))
}

const fn newsletter_set(key: &'static str) -> FilterField {
    FilterField::new(key, FieldKind::EnumSet(EnumKind::Newsletter))
}

static CONTACT_FIELDS: &[FilterField] = &[
    // Flags
    boolean("addressHistoric"),
    boolean("addressValid"),
    boolean("anyTags"),
    boolean("noAppeals"),
    boolean("pledgeReceived"),
    boolean("starred"),
    boolean("statusValid"),
    // Negations of list filters
    boolean("reverseAlmaMater"),
    boolean("reverseAppeal"),
    boolean("reverseChurch"),
    boolean("reverseCity"),
    boolean("reverseContactType"),
    boolean("reverseCountry"),
    boolean("reverseDesignationAccountId"),
    boolean("reverseDonation"),
    boolean("reverseDonationAmount"),
    boolean("reverseIds"),
    boolean("reverseLikely"),
    boolean("reverseLocale"),
    boolean("reverseMetroArea"),
    boolean("reverseNewsletter"),
    boolean("reverseOrganizationId"),
    boolean("reversePledgeCurrency"),
    boolean("reversePledgeFrequency"),
    boolean("reverseReferrer"),
    boolean("reverseRegion"),
    boolean("reverseRelatedTaskAction"),
    boolean("reverseSource"),
    boolean("reverseState"),
    boolean("reverseStatus"),
    boolean("reverseTimezone"),
    boolean("reverseUserIds"),
    // Dates
    date_range("anniversary"),
    date_range("birthday"),
    date_range("createdAt"),
    date_range("donationDate"),
    date_range("gaveMoreThanPledgedRange"),
    date_range("nextAsk"),
    date_range("pledgeAmountIncreasedRange"),
    date_range("startedGivingRange"),
    date_range("stoppedGivingRange"),
    date_range("taskDueDate"),
    date_range("updatedAt"),
    // Enums
    status_set("status"),
    newsletter_set("newsletter"),
    // Lists
    strings("almaMater"),
    strings("appeal"),
    strings("church"),
    strings("city"),
    strings("contactType"),
    strings("country"),
    strings("designationAccountId"),
    strings("donation"),
    strings("donationAmount"),
    strings("excludeTags"),
    strings("ids"),
    strings("likely"),
    strings("locale"),
    strings("metroArea"),
    strings("organizationId"),
    strings("pledge"),
    strings("pledgeAmount"),
    strings("pledgeCurrency"),
    strings("pledgeFrequency"),
    strings("referrer"),
    strings("region"),
    strings("relatedTaskAction"),
    strings("source"),
    strings("state"),
    strings("tags"),
    strings("timezone"),
    strings("userIds"),
    // Free text
    scalar("addressLatLng"),
    scalar("notes"),
    scalar("pledgeLateBy"),
    scalar("wildcardSearch"),
    // Amounts
    numeric_range("donationAmountRange"),
    numeric_range("donationPeriodAverage"),
    numeric_range("donationPeriodCount"),
    numeric_range("donationPeriodPercentRank"),
    numeric_range("donationPeriodSum"),
];

static TASK_FIELDS: &[FilterField] = &[
    boolean("anyTags"),
    boolean("completed"),
    boolean("starred"),
    boolean("reverseActivityType"),
    boolean("reverseContactAppeal"),
    boolean("reverseContactChurch"),
    boolean("reverseContactCity"),
    boolean("reverseContactCountry"),
    boolean("reverseContactIds"),
    boolean("reverseContactLikely"),
    boolean("reverseContactMetroArea"),
    boolean("reverseContactNewsletter"),
    boolean("reverseContactPledgeFrequency"),
    boolean("reverseContactReferrer"),
    boolean("reverseContactRegion"),
    boolean("reverseContactState"),
    boolean("reverseContactStatus"),
    boolean("reverseContactTimezone"),
    boolean("reverseContactType"),
    boolean("reverseUserIds"),
    date_range("completedAt"),
    date_range("startAt"),
    date_range("updatedAt"),
    status_set("contactStatus"),
    newsletter_set("contactNewsletter"),
    strings("activityType"),
    strings("contactAppeal"),
    strings("contactChurch"),
    strings("contactCity"),
    strings("contactCountry"),
    strings("contactDesignationAccountId"),
    strings("contactIds"),
    strings("contactLikely"),
    strings("contactMetroArea"),
    strings("contactPledgeFrequency"),
    strings("contactReferrer"),
    strings("contactRegion"),
    strings("contactState"),
    strings("contactTimezone"),
    strings("contactType"),
    strings("excludeTags"),
    strings("ids"),
    strings("nextAction"),
    strings("result"),
    strings("tags"),
    strings("userIds"),
    scalar("wildcardSearch"),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_lookup_by_key() {
        let table = FieldTable::contacts();
        assert_eq!(table.get("starred").map(|f| f.kind), Some(FieldKind::Boolean));
        assert_eq!(
            table.get("status").map(|f| f.kind),
            Some(FieldKind::EnumSet(EnumKind::Status))
        );
        assert_eq!(
            table.get("donationDate").map(|f| f.kind),
            Some(FieldKind::DateRange)
        );
        assert!(table.get("donation_date").is_none());
        assert!(table.get("accountListId").is_none());
    }

    #[test]
    fn test_every_reverse_field_is_boolean() {
        for table in [FieldTable::contacts(), FieldTable::tasks()] {
            for field in table.fields() {
                if field.key.starts_with("reverse") {
                    assert_eq!(field.kind, FieldKind::Boolean, "{}", field.key);
                }
            }
        }
    }

    #[test]
    fn test_keys_are_unique_camel_case() {
        for table in [FieldTable::contacts(), FieldTable::tasks()] {
            let mut seen = HashSet::new();
            for field in table.fields() {
                assert!(seen.insert(field.key), "duplicate key {}", field.key);
                assert!(!field.key.contains('_'), "{}", field.key);
            }
        }
    }

    #[test]
    fn test_task_table_is_scoped() {
        let tasks = FieldTable::for_page(PageKind::Tasks);
        assert_eq!(tasks.page(), PageKind::Tasks);
        assert!(tasks.contains("activityType"));
        assert!(!tasks.contains("donationDate"));
        assert_eq!(
            tasks.get("contactStatus").map(|f| f.kind),
            Some(FieldKind::EnumSet(EnumKind::Status))
        );
    }

    #[test]
    fn test_field_key_orders_by_name() {
        let table = FieldTable::contacts();
        let starred = table.key("starred").unwrap();
        let appeal = table.key("appeal").unwrap();
        assert!(appeal < starred);
        assert_eq!(starred.as_str(), "starred");
        assert_eq!(serde_json::to_string(&starred).unwrap(), "\"starred\"");
    }
}
