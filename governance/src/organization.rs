//! The organization root: its charter and its treasury.

use crate::treasury::Treasury;
use quorum_types::{AccountAddress, AssetId};
use serde::{Deserialize, Serialize};

/// The mutable charter of the organization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charter {
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// The asset whose balances weigh votes and gate proposals.
    pub governance_token: AssetId,
}

/// A partial charter replacement carried by a `charter-update` proposal.
///
/// Absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharterUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub governance_token: Option<AssetId>,
}

impl CharterUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.governance_token.is_none()
    }
}

impl Charter {
    /// Overwrite every field present in `update`.
    pub fn apply(&mut self, update: &CharterUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(image_url) = &update.image_url {
            self.image_url = image_url.clone();
        }
        if let Some(token) = &update.governance_token {
            self.governance_token = token.clone();
        }
    }
}

/// The singleton governance entity. Created once, never destroyed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub creator: AccountAddress,
    pub charter: Charter,
    pub treasury: Treasury,
}

impl Organization {
    pub fn governance_token(&self) -> &AssetId {
        &self.charter.governance_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charter() -> Charter {
        Charter {
            name: "Guild".into(),
            description: "a guild".into(),
            image_url: "https://example.org/guild.png".into(),
            governance_token: AssetId::new("gov"),
        }
    }

    #[test]
    fn partial_update_leaves_absent_fields() {
        let mut c = charter();
        c.apply(&CharterUpdate {
            description: Some("a better guild".into()),
            ..CharterUpdate::default()
        });
        assert_eq!(c.name, "Guild");
        assert_eq!(c.description, "a better guild");
        assert_eq!(c.governance_token, AssetId::new("gov"));
    }

    #[test]
    fn full_update_replaces_everything() {
        let mut c = charter();
        let update = CharterUpdate {
            name: Some("Union".into()),
            description: Some("d".into()),
            image_url: Some("i".into()),
            governance_token: Some(AssetId::new("gov2")),
        };
        assert!(!update.is_empty());
        c.apply(&update);
        assert_eq!(c.name, "Union");
        assert_eq!(c.image_url, "i");
        assert_eq!(c.governance_token, AssetId::new("gov2"));
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let mut c = charter();
        let update = CharterUpdate::default();
        assert!(update.is_empty());
        c.apply(&update);
        assert_eq!(c, charter());
    }
}
