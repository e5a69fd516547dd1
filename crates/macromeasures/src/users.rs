//! Conversion from the raw lookup envelope into flat per-user records, and
//! ID-based lookups over the interest hierarchy.

use crate::error::MacromeasuresError;
use crate::types::{Interest, InterestEntry, Interests, MacroUser, User, UserResponse};

impl UserResponse {
    /// `true` once server-side inference has finished for every label.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Looks up the result for one queried username or ID.
    #[must_use]
    pub fn user(&self, queried: &str) -> Option<&User> {
        self.labels.get(queried)
    }

    /// Flattens the labels into one [`MacroUser`] per queried value, ordered
    /// by the queried value.
    ///
    /// # Errors
    ///
    /// - [`MacromeasuresError::Provider`] if the API flagged an error.
    /// - [`MacromeasuresError::EmptyResult`] if no labels were returned.
    pub fn to_users(&self) -> Result<Vec<MacroUser>, MacromeasuresError> {
        if self.error {
            return Err(MacromeasuresError::Provider(self.error_message.clone()));
        }
        if self.labels.is_empty() {
            return Err(MacromeasuresError::EmptyResult);
        }
        Ok(self
            .labels
            .iter()
            .map(|(id, user)| user.to_macro_user(id))
            .collect())
    }
}

impl User {
    /// Builds the flat domain record for this user under `id`.
    #[must_use]
    pub fn to_macro_user(&self, id: &str) -> MacroUser {
        MacroUser {
            id: id.to_owned(),
            valid: self.valid,
            gender: self.gender.clone(),
            interests: self.interest_list(),
            language: self.language.clone(),
            location: self.location.clone(),
            platform: self.platform.clone(),
            account_type: self.account_type.clone(),
        }
    }

    /// Every interest as a flat list; empty when the API sent none.
    #[must_use]
    pub fn interest_list(&self) -> Vec<InterestEntry> {
        self.interests
            .as_ref()
            .map(Interests::flatten)
            .unwrap_or_default()
    }
}

impl Interests {
    #[must_use]
    pub fn len(&self) -> usize {
        self.all.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Interest> {
        self.all.get(id)
    }

    /// All nodes tagged with their IDs, ordered by ID.
    #[must_use]
    pub fn flatten(&self) -> Vec<InterestEntry> {
        self.all
            .iter()
            .map(|(id, interest)| InterestEntry {
                id: id.clone(),
                interest: interest.clone(),
            })
            .collect()
    }

    /// Parents of `id` that are present in this hierarchy. A parent ID with no
    /// matching node is skipped.
    pub fn parents_of<'a>(&'a self, id: &str) -> impl Iterator<Item = (&'a str, &'a Interest)> {
        self.all
            .get(id)
            .map(|node| node.parents.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|parent| {
                self.all
                    .get_key_value(parent)
                    .map(|(k, v)| (k.as_str(), v))
            })
    }

    /// Nodes that list `id` among their parents.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = (&'a str, &'a Interest)> {
        self.all
            .iter()
            .filter(move |(_, node)| node.parents.iter().any(|p| p == id))
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Nodes without parents.
    pub fn roots(&self) -> impl Iterator<Item = (&str, &Interest)> {
        self.all
            .iter()
            .filter(|(_, node)| node.parents.is_empty())
            .map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
