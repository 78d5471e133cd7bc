use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Customer segmentation tag selecting one of a stock item's price tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriceClass {
    A,
    B,
    C,
    D,
    S,
    Hra,
    Hrb,
    Hrc,
    Hrd,
    Z,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown price class `{0}`")]
pub struct UnknownPriceClass(pub String);

impl PriceClass {
    pub const ALL: [PriceClass; 10] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::S,
        Self::Hra,
        Self::Hrb,
        Self::Hrc,
        Self::Hrd,
        Self::Z,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::S => "S",
            Self::Hra => "HRA",
            Self::Hrb => "HRB",
            Self::Hrc => "HRC",
            Self::Hrd => "HRD",
            Self::Z => "Z",
        }
    }

    /// Name of the `stock` column carrying this tier's price.
    pub fn column(self) -> &'static str {
        match self {
            Self::A => "stock_price_a",
            Self::B => "stock_price_b",
            Self::C => "stock_price_c",
            Self::D => "stock_price_d",
            Self::S => "stock_price_s",
            Self::Hra => "stock_price_hra",
            Self::Hrb => "stock_price_hrb",
            Self::Hrc => "stock_price_hrc",
            Self::Hrd => "stock_price_hrd",
            Self::Z => "stock_price_z",
        }
    }
}

/// Reads a stored `customer_price_class` label. A blank label is no class; an
/// unknown label is also no class and is handed back in the second slot.
pub fn classify_label(label: Option<&str>) -> (Option<PriceClass>, Option<String>) {
    let Some(label) = label.map(str::trim).filter(|label| !label.is_empty()) else {
        return (None, None);
    };

    match label.parse::<PriceClass>() {
        Ok(class) => (Some(class), None),
        Err(_) => (None, Some(label.to_string())),
    }
}

impl fmt::Display for PriceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriceClass {
    type Err = UnknownPriceClass;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|class| class.label() == normalized)
            .ok_or_else(|| UnknownPriceClass(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_label, PriceClass, UnknownPriceClass};

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("hra".parse::<PriceClass>(), Ok(PriceClass::Hra));
        assert_eq!(" Z ".parse::<PriceClass>(), Ok(PriceClass::Z));
        assert_eq!("b".parse::<PriceClass>(), Ok(PriceClass::B));
    }

    #[test]
    fn rejects_unknown_labels() {
        assert_eq!("E".parse::<PriceClass>(), Err(UnknownPriceClass("E".to_string())));
        assert!("".parse::<PriceClass>().is_err());
    }

    #[test]
    fn classify_label_tolerates_case_and_unknown_labels() {
        assert_eq!(classify_label(Some(" hrb ")), (Some(PriceClass::Hrb), None));
        assert_eq!(classify_label(Some("VIP")), (None, Some("VIP".to_string())));
        assert_eq!(classify_label(Some("   ")), (None, None));
        assert_eq!(classify_label(None), (None, None));
    }

    #[test]
    fn serializes_as_upper_case_label() {
        let json = serde_json::to_string(&PriceClass::Hrd).expect("serialize");
        assert_eq!(json, "\"HRD\"");

        let parsed: PriceClass = serde_json::from_str("\"HRB\"").expect("deserialize");
        assert_eq!(parsed, PriceClass::Hrb);
    }

    #[test]
    fn every_class_maps_to_its_own_column() {
        for class in PriceClass::ALL {
            assert_eq!(class.column(), format!("stock_price_{}", class.label().to_lowercase()));
        }
    }
}
