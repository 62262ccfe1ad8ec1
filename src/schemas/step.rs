//! Step schema - The stages of an inspection session

use serde::{Deserialize, Serialize};

/// One stage of the inspection workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Step {
    /// Initial state - waiting for a worker to log in
    #[default]
    #[serde(rename = "login")]
    Login,
    /// Worker picks city and store
    #[serde(rename = "store-selection")]
    StoreSelection,
    /// Cold chamber section
    #[serde(rename = "validation-1")]
    Validation1,
    /// Conventional refrigerator section
    #[serde(rename = "validation-2")]
    Validation2,
    /// Shelf gondola section
    #[serde(rename = "validation-3")]
    Validation3,
    /// Review and submit
    #[serde(rename = "checkout")]
    Checkout,
    /// Submitted, waiting for the reset
    #[serde(rename = "completed")]
    Completed,
}

impl Step {
    /// Wire name of the step
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Login => "login",
            Step::StoreSelection => "store-selection",
            Step::Validation1 => "validation-1",
            Step::Validation2 => "validation-2",
            Step::Validation3 => "validation-3",
            Step::Checkout => "checkout",
            Step::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Step::Login),
            "store-selection" => Ok(Step::StoreSelection),
            "validation-1" => Ok(Step::Validation1),
            "validation-2" => Ok(Step::Validation2),
            "validation-3" => Ok(Step::Validation3),
            "checkout" => Ok(Step::Checkout),
            "completed" => Ok(Step::Completed),
            _ => Err(format!("Unknown step: {}", s)),
        }
    }
}
