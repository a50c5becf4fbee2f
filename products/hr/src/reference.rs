//! Static lookup lists backing the state and department selects.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UsState {
    pub name: String,
    pub abbreviation: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReferenceData {
    pub states: Vec<UsState>,
    pub departments: Vec<String>,
}

const STATES: &[(&str, &str)] = &[
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("American Samoa", "AS"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("District Of Columbia", "DC"),
    ("Federated States Of Micronesia", "FM"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Guam", "GU"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Marshall Islands", "MH"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Northern Mariana Islands", "MP"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Palau", "PW"),
    ("Pennsylvania", "PA"),
    ("Puerto Rico", "PR"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virgin Islands", "VI"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

const DEPARTMENTS: &[&str] = &["Sales", "Marketing", "Engineering", "Human Resources", "Legal"];

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            states: STATES
                .iter()
                .map(|(name, abbreviation)| UsState {
                    name: (*name).to_string(),
                    abbreviation: (*abbreviation).to_string(),
                })
                .collect(),
            departments: DEPARTMENTS.iter().map(|d| (*d).to_string()).collect(),
        }
    }
}

impl ReferenceData {
    /// Load replacement lists from a JSON document shaped like this type.
    pub fn from_json_file(path: impl AsRef<Path>) -> HrResult<Self> {
        let path = path.as_ref();
        let wrap = |source: Box<dyn std::error::Error + Send + Sync>| HrError::ReferenceData {
            path: path.to_path_buf(),
            source,
        };
        let raw = std::fs::read_to_string(path).map_err(|err| wrap(err.into()))?;
        serde_json::from_str(&raw).map_err(|err| wrap(err.into()))
    }

    pub fn has_state(&self, code: &str) -> bool {
        self.states.iter().any(|state| state.abbreviation == code)
    }

    pub fn has_department(&self, name: &str) -> bool {
        self.departments.iter().any(|dept| dept == name)
    }

    pub fn state_name(&self, code: &str) -> Option<&str> {
        self.states
            .iter()
            .find(|state| state.abbreviation == code)
            .map(|state| state.name.as_str())
    }
}
