use log::warn;
use serde::{Deserialize, Serialize};

const STATIC_LNF_JSON: &str = include_str!("../data/lnf.json");

/// One of the 32 top-tier clubs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LnfClubEntity {
    pub name: String,
    pub conference: String,
    pub division: String,
    pub rating: u8,
}

pub struct LnfLoader;

impl LnfLoader {
    pub fn load() -> Vec<LnfClubEntity> {
        serde_json::from_str(STATIC_LNF_JSON).unwrap_or_else(|err| {
            warn!("embedded top-tier roster is unreadable: {}", err);
            Vec::new()
        })
    }
}
