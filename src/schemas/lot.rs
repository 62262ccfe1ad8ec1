//! Lot schema - One inspected product batch within a section

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A product lot. Every field except `id` may be filled in incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Lot {
    /// Caller-assigned identifier, unique within its section
    pub id: String,

    /// Photo reference
    #[serde(default)]
    pub photo: Option<String>,

    /// Counted quantity, kept as entered
    #[serde(default)]
    pub quantity: Option<String>,

    /// Expiry date, as entered or extracted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,

    /// Lot code, as entered or extracted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_code: Option<String>,

    /// Set when a person overrode an extracted value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_manually: Option<bool>,
}

fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

impl Lot {
    /// Create a lot carrying only its identifier
    pub fn new(id: impl Into<String>) -> Self {
        Lot {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Seed used when a single-lot update references an unknown id
    pub fn placeholder(id: impl Into<String>) -> Self {
        Lot {
            id: id.into(),
            photo: None,
            quantity: Some(String::new()),
            ..Default::default()
        }
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    pub fn with_expiry_date(mut self, expiry_date: impl Into<String>) -> Self {
        self.expiry_date = Some(expiry_date.into());
        self
    }

    pub fn with_lot_code(mut self, lot_code: impl Into<String>) -> Self {
        self.lot_code = Some(lot_code.into());
        self
    }

    pub fn with_edited_manually(mut self, edited: bool) -> Self {
        self.edited_manually = Some(edited);
        self
    }

    /// Whether any field other than `id` carries a value.
    ///
    /// Empty strings and `false` count as absent.
    pub fn has_meaningful_fields(&self) -> bool {
        is_filled(&self.photo)
            || is_filled(&self.quantity)
            || is_filled(&self.expiry_date)
            || is_filled(&self.lot_code)
            || self.edited_manually == Some(true)
    }

    /// Overlay the filled fields of `incoming` onto this lot.
    ///
    /// Empty strings in `incoming` never erase stored values.
    pub fn overlay(mut self, incoming: &Lot) -> Self {
        fn take(slot: &mut Option<String>, value: &Option<String>) {
            if is_filled(value) {
                slot.clone_from(value);
            }
        }
        take(&mut self.photo, &incoming.photo);
        take(&mut self.quantity, &incoming.quantity);
        take(&mut self.expiry_date, &incoming.expiry_date);
        take(&mut self.lot_code, &incoming.lot_code);
        if incoming.edited_manually.is_some() {
            self.edited_manually = incoming.edited_manually;
        }
        self
    }

    /// Shallow-merge a patch. Present keys overwrite, explicit nulls included.
    pub fn apply_patch(mut self, patch: &LotPatch) -> Self {
        if let Some(photo) = &patch.photo {
            self.photo.clone_from(photo);
        }
        if let Some(quantity) = &patch.quantity {
            self.quantity.clone_from(quantity);
        }
        if let Some(expiry_date) = &patch.expiry_date {
            self.expiry_date.clone_from(expiry_date);
        }
        if let Some(lot_code) = &patch.lot_code {
            self.lot_code.clone_from(lot_code);
        }
        if let Some(edited) = patch.edited_manually {
            self.edited_manually = edited;
        }
        self
    }
}

/// Distinguish a missing key (`None`) from an explicit `null` (`Some(None)`).
fn explicit<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial update for one lot.
///
/// The outer `Option` says whether the key was supplied; the inner one
/// carries the value or an explicit null.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LotPatch {
    #[serde(default, deserialize_with = "explicit", skip_serializing_if = "Option::is_none")]
    pub photo: Option<Option<String>>,

    #[serde(default, deserialize_with = "explicit", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Option<String>>,

    #[serde(default, deserialize_with = "explicit", skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<Option<String>>,

    #[serde(default, deserialize_with = "explicit", skip_serializing_if = "Option::is_none")]
    pub lot_code: Option<Option<String>>,

    #[serde(default, deserialize_with = "explicit", skip_serializing_if = "Option::is_none")]
    pub edited_manually: Option<Option<bool>>,
}

impl LotPatch {
    pub fn photo(mut self, photo: Option<&str>) -> Self {
        self.photo = Some(photo.map(str::to_string));
        self
    }

    pub fn quantity(mut self, quantity: Option<&str>) -> Self {
        self.quantity = Some(quantity.map(str::to_string));
        self
    }

    pub fn expiry_date(mut self, expiry_date: Option<&str>) -> Self {
        self.expiry_date = Some(expiry_date.map(str::to_string));
        self
    }

    pub fn lot_code(mut self, lot_code: Option<&str>) -> Self {
        self.lot_code = Some(lot_code.map(str::to_string));
        self
    }

    pub fn edited_manually(mut self, edited: Option<bool>) -> Self {
        self.edited_manually = Some(edited);
        self
    }
}

/// Lots of one section, in stable order and unique by id.
///
/// Serialized as a plain array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Lot>", into = "Vec<Lot>")]
pub struct LotList {
    lots: Vec<Lot>,
    index: HashMap<String, usize>,
}

impl LotList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Lot> {
        self.index.get(id).map(|&pos| &self.lots[pos])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lot> {
        self.lots.iter()
    }

    pub fn as_slice(&self) -> &[Lot] {
        &self.lots
    }

    pub fn ids(&self) -> Vec<&str> {
        self.lots.iter().map(|l| l.id.as_str()).collect()
    }

    /// Replace the lot with the same id in place, or append it.
    pub fn upsert(&mut self, lot: Lot) {
        match self.index.get(&lot.id) {
            Some(&pos) => self.lots[pos] = lot,
            None => {
                self.index.insert(lot.id.clone(), self.lots.len());
                self.lots.push(lot);
            }
        }
    }

    /// Remove the lot with `id`, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<Lot> {
        let pos = self.index.remove(id)?;
        let removed = self.lots.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Some(removed)
    }
}

impl PartialEq for LotList {
    fn eq(&self, other: &Self) -> bool {
        self.lots == other.lots
    }
}

impl Eq for LotList {}

impl From<Vec<Lot>> for LotList {
    fn from(lots: Vec<Lot>) -> Self {
        lots.into_iter().collect()
    }
}

impl From<LotList> for Vec<Lot> {
    fn from(list: LotList) -> Self {
        list.lots
    }
}

impl FromIterator<Lot> for LotList {
    fn from_iter<I: IntoIterator<Item = Lot>>(iter: I) -> Self {
        let mut list = LotList::new();
        for lot in iter {
            list.upsert(lot);
        }
        list
    }
}

impl<'a> IntoIterator for &'a LotList {
    type Item = &'a Lot;
    type IntoIter = std::slice::Iter<'a, Lot>;

    fn into_iter(self) -> Self::IntoIter {
        self.lots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_meaningful_fields() {
        assert!(!Lot::new("A").has_meaningful_fields());
        assert!(!Lot::placeholder("A").has_meaningful_fields());
        assert!(!Lot::new("A").with_quantity("").has_meaningful_fields());
        assert!(!Lot::new("A").with_edited_manually(false).has_meaningful_fields());
        assert!(Lot::new("A").with_quantity("3").has_meaningful_fields());
        assert!(Lot::new("A").with_edited_manually(true).has_meaningful_fields());
    }

    #[test]
    fn test_overlay_keeps_stored_values() {
        let stored = Lot::new("A").with_quantity("10");
        let incoming = Lot::new("A").with_photo("p.jpg").with_quantity("");

        let merged = stored.overlay(&incoming);
        assert_eq!(merged, Lot::new("A").with_quantity("10").with_photo("p.jpg"));
    }

    #[test]
    fn test_apply_patch_writes_explicit_null() {
        let lot = Lot::new("A").with_photo("p.jpg").with_quantity("2");
        let patched = lot.apply_patch(&LotPatch::default().photo(None));

        assert_eq!(patched.photo, None);
        assert_eq!(patched.quantity.as_deref(), Some("2"));
    }

    #[test]
    fn test_lot_patch_distinguishes_null_from_missing() {
        let patch: LotPatch = serde_json::from_str(r#"{"photo": null, "quantity": "4"}"#).unwrap();
        assert_eq!(patch.photo, Some(None));
        assert_eq!(patch.quantity, Some(Some("4".to_string())));
        assert_eq!(patch.lot_code, None);
    }

    #[test]
    fn test_lot_json_omits_unset_optional_fields() {
        let json = serde_json::to_string(&Lot::new("A").with_quantity("3")).unwrap();
        assert!(json.contains("\"quantity\":\"3\""));
        assert!(!json.contains("lot_code"));
        assert!(!json.contains("edited_manually"));
    }

    #[test]
    fn test_lot_list_keeps_positions() {
        let mut list: LotList = vec![Lot::new("B"), Lot::new("A")].into();
        list.upsert(Lot::new("A").with_quantity("5"));
        list.upsert(Lot::new("C"));

        assert_eq!(list.ids(), vec!["B", "A", "C"]);
        assert_eq!(list.get("A").unwrap().quantity.as_deref(), Some("5"));
    }

    #[test]
    fn test_lot_list_remove_reindexes() {
        let mut list: LotList = vec![Lot::new("A"), Lot::new("B"), Lot::new("C")].into();
        assert!(list.remove("A").is_some());
        assert!(list.remove("missing").is_none());

        assert_eq!(list.ids(), vec!["B", "C"]);
        assert_eq!(list.position("C"), Some(1));
        list.upsert(Lot::new("C").with_photo("c.jpg"));
        assert_eq!(list.as_slice()[1].photo.as_deref(), Some("c.jpg"));
    }

    #[test]
    fn test_lot_list_deduplicates_on_deserialize() {
        let list: LotList =
            serde_json::from_str(r#"[{"id":"A","quantity":"1"},{"id":"B"},{"id":"A","quantity":"2"}]"#)
                .unwrap();
        assert_eq!(list.ids(), vec!["A", "B"]);
        assert_eq!(list.get("A").unwrap().quantity.as_deref(), Some("2"));
    }
}
