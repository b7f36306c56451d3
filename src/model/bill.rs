use crate::model::Amount;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The percentage used when the form's pct field is left empty.
pub const DEFAULT_PCT: u32 = 20;

/// The expense categories offered by the new-bill form, in display order. The first one is the
/// default selection.
pub const EXPENSE_TYPES: &[&str] = &[
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// Where a bill is in its review.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

serde_plain::derive_display_from_serialize!(BillStatus);
serde_plain::derive_fromstr_from_deserialize!(BillStatus);

impl BillStatus {
    /// The French label shown in the bills list.
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
        }
    }
}

/// One expense-report record submitted by an employee.
///
/// The `id` is `None` until the store creates the record; after that it does not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type", default)]
    pub expense_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: Amount,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub vat: String,
    #[serde(default = "default_pct", deserialize_with = "deserialize_pct")]
    pub pct: u32,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub status: BillStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

impl Default for Bill {
    fn default() -> Self {
        Self {
            id: None,
            email: String::new(),
            expense_type: String::new(),
            name: String::new(),
            amount: Amount::default(),
            date: String::new(),
            vat: String::new(),
            pct: DEFAULT_PCT,
            commentary: String::new(),
            file_url: String::new(),
            file_name: String::new(),
            status: BillStatus::Pending,
            comment_admin: None,
        }
    }
}

impl Bill {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

fn default_pct() -> u32 {
    DEFAULT_PCT
}

/// Parses the pct field the way the form always has: anything that is not a positive integer
/// means the default.
pub fn parse_pct(s: &str) -> u32 {
    s.trim()
        .parse::<u32>()
        .ok()
        .filter(|pct| *pct > 0)
        .unwrap_or(DEFAULT_PCT)
}

fn deserialize_pct<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(PctVisitor)
}

/// Records written by other clients may carry the pct as text, as a fractional number or as
/// null. Fractions are truncated and anything that is not a positive percentage means the
/// default, so one odd record does not prevent listing the others.
struct PctVisitor;

impl<'de> Visitor<'de> for PctVisitor {
    type Value = u32;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a percentage as a number or a string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(u32::try_from(v)
            .ok()
            .filter(|pct| *pct > 0)
            .unwrap_or(DEFAULT_PCT))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        match u64::try_from(v) {
            Ok(v) => self.visit_u64(v),
            Err(_) => Ok(DEFAULT_PCT),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.is_finite() && v >= 1.0 && v <= f64::from(u32::MAX) {
            Ok(v.trunc() as u32)
        } else {
            Ok(DEFAULT_PCT)
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match v.trim().parse::<f64>() {
            Ok(pct) => self.visit_f64(pct),
            Err(_) => Ok(DEFAULT_PCT),
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(DEFAULT_PCT)
    }
}
