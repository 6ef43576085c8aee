//! Saved extensions.
//!
//! Contacts are read-only data shown next to the dialpad.  Selecting one
//! replaces the dialed number with its extension and replays each digit to the
//! bridge (see the kiosk's dialer view).

use serde::{Deserialize, Serialize};

use crate::domain::dial_key::DialKey;

/// A saved contact with a short dial code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name, e.g. `"SPCA Niagara"`.
    pub name: String,
    /// Second line under the name.
    pub subtitle: String,
    /// Third, smaller line (office, desk).
    pub details: String,
    /// The extension dialed when the contact is selected.
    pub extension: String,
    /// Optional picture reference; the UI falls back to the name's initial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Contact {
    fn new(
        name: &str,
        subtitle: &str,
        details: &str,
        extension: &str,
        image: Option<&str>,
    ) -> Self {
        Self {
            name: name.to_string(),
            subtitle: subtitle.to_string(),
            details: details.to_string(),
            extension: extension.to_string(),
            image: image.map(str::to_string),
        }
    }

    /// The extension as dial keys, left to right.
    pub fn dial_keys(&self) -> Vec<DialKey> {
        DialKey::parse_all(&self.extension)
    }

    /// Uppercased first letter of the name, used when there is no image.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// The list of saved contacts shown on the BeaverPhone screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDirectory {
    contacts: Vec<Contact>,
}

impl ContactDirectory {
    /// Creates a directory from an explicit list.
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    /// The extensions installed on every kiosk.
    pub fn builtin() -> Self {
        Self::new(vec![
            Contact::new(
                "Ontario Provincial Police",
                "Internal line",
                "Office 101",
                "1201",
                Some("/contact/police.svg"),
            ),
            Contact::new(
                "SPCA Niagara",
                "Paws Law",
                "Office 3434",
                "3434",
                Some("/contact/spca.svg"),
            ),
            Contact::new("Mom", "Mom", "Complaints Office", "22", None),
            Contact::new(
                "Services Ontario",
                "Government of Ontario",
                "Desktop *1345",
                "1345",
                Some("/contact/ontario.svg"),
            ),
        ])
    }

    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    /// Returns the contact at `index` (zero-based).
    pub fn get(&self, index: usize) -> Option<&Contact> {
        self.contacts.get(index)
    }

    /// Looks up a contact by its extension.
    pub fn find_by_extension(&self, extension: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.extension == extension)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

impl Default for ContactDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_directory_has_four_contacts() {
        let dir = ContactDirectory::builtin();
        assert_eq!(dir.len(), 4);
        assert_eq!(dir.get(1).unwrap().name, "SPCA Niagara");
    }

    #[test]
    fn test_find_by_extension() {
        let dir = ContactDirectory::builtin();
        let mom = dir.find_by_extension("22").unwrap();
        assert_eq!(mom.name, "Mom");
        assert!(mom.image.is_none());
        assert!(dir.find_by_extension("9999").is_none());
    }

    #[test]
    fn test_dial_keys_follow_extension_order() {
        let dir = ContactDirectory::builtin();
        let spca = dir.find_by_extension("3434").unwrap();
        let chars: String = spca.dial_keys().into_iter().map(DialKey::as_char).collect();
        assert_eq!(chars, "3434");
    }

    #[test]
    fn test_initial_is_uppercase_first_letter() {
        let c = Contact::new("mom", "", "", "22", None);
        assert_eq!(c.initial(), "M");
    }

    #[test]
    fn test_contact_without_image_omits_field_in_json() {
        let dir = ContactDirectory::builtin();
        let json = serde_json::to_string(dir.find_by_extension("22").unwrap()).unwrap();
        assert!(!json.contains("image"));
    }
}
