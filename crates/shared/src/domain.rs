use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Blank identifiers count as "nothing selected".
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(LabId);
id_newtype!(DoctorId);
id_newtype!(CategoryId);
id_newtype!(SubcategoryId);
id_newtype!(ProductId);
id_newtype!(StageId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    Upper,
    Lower,
    Both,
}

impl Arch {
    pub fn contains(self, tooth: ToothNumber) -> bool {
        match self {
            Self::Upper => tooth.is_upper(),
            Self::Lower => !tooth.is_upper(),
            Self::Both => true,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Both => "both",
        };
        f.write_str(label)
    }
}

/// A permanent tooth in Universal numbering: 1-16 upper, 17-32 lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ToothNumber(u8);

impl ToothNumber {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 32;
    const LAST_UPPER: u8 = 16;

    pub fn new(number: u8) -> Result<Self, DomainError> {
        if (Self::FIRST..=Self::LAST).contains(&number) {
            Ok(Self(number))
        } else {
            Err(DomainError::InvalidToothNumber(number))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_upper(self) -> bool {
        self.0 <= Self::LAST_UPPER
    }
}

impl TryFrom<u8> for ToothNumber {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ToothNumber> for u8 {
    fn from(value: ToothNumber) -> Self {
        value.0
    }
}

impl fmt::Display for ToothNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabSummary {
    pub lab_id: LabId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub doctor_id: DoctorId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_id: Option<LabId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_id: ProductId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcategorySummary {
    pub subcategory_id: SubcategoryId,
    pub name: String,
    #[serde(default)]
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category_id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<SubcategorySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSummary {
    pub stage_id: StageId,
    pub name: String,
}
