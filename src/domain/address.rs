// src/domain/address.rs
//
// Three-level dependent address selection (city -> district -> ward),
// driven by a static tree loaded once at startup. The derived display
// address is `"ward, district, city"` with empty segments omitted,
// which is also the format the backend persists.
use crate::errors::ServerError;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct RegionNode {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Districts", alias = "Wards", default)]
    pub children: Vec<RegionNode>,
}

#[derive(Debug, Clone)]
pub struct AddressTree {
    cities: Vec<RegionNode>,
}

impl AddressTree {
    pub fn from_json_str(json: &str) -> Result<Self, ServerError> {
        let cities: Vec<RegionNode> = serde_json::from_str(json)
            .map_err(|e| ServerError::BadRequest(format!("address tree parse failed: {e}")))?;
        Ok(Self { cities })
    }

    pub fn from_json_file(path: &str) -> Result<Self, ServerError> {
        let json = fs::read_to_string(path)
            .map_err(|e| ServerError::BadRequest(format!("read address tree failed: {e}")))?;
        Self::from_json_str(&json)
    }

    pub fn cities(&self) -> &[RegionNode] {
        &self.cities
    }
}

fn find_by_name<'a>(nodes: &'a [RegionNode], name: &str) -> Option<usize> {
    nodes.iter().position(|n| n.name == name)
}

/// Selection state over an [`AddressTree`]. The derived address string is
/// recomputed synchronously on every change, so it is never stale
/// relative to the three selections.
pub struct AddressSelector<'t> {
    tree: &'t AddressTree,
    city: Option<usize>,
    district: Option<usize>,
    ward: Option<usize>,
    address: String,
}

impl<'t> AddressSelector<'t> {
    pub fn new(tree: &'t AddressTree) -> Self {
        Self {
            tree,
            city: None,
            district: None,
            ward: None,
            address: String::new(),
        }
    }

    /// Reconstruct a selection from a persisted `"ward, district, city"`
    /// string by exact name matching. Any miss truncates the cascade at
    /// that level instead of failing.
    pub fn from_seed(tree: &'t AddressTree, seed: &str) -> Self {
        let mut sel = Self::new(tree);

        let parts: Vec<&str> = seed.split(',').map(str::trim).collect();
        let ward_name = parts.first().copied().unwrap_or("");
        let district_name = parts.get(1).copied().unwrap_or("");
        let city_name = parts.get(2).copied().unwrap_or("");

        sel.select_city(city_name);
        if sel.city.is_some() {
            sel.select_district(district_name);
        }
        if sel.district.is_some() {
            sel.select_ward(ward_name);
        }
        sel
    }

    pub fn tree_cities(&self) -> &[RegionNode] {
        self.tree.cities()
    }

    pub fn city(&self) -> Option<&RegionNode> {
        self.city.map(|i| &self.tree.cities()[i])
    }

    pub fn district(&self) -> Option<&RegionNode> {
        let city = self.city()?;
        self.district.map(|i| &city.children[i])
    }

    pub fn ward(&self) -> Option<&RegionNode> {
        let district = self.district()?;
        self.ward.map(|i| &district.children[i])
    }

    /// District options for the currently selected city, empty until a
    /// city was chosen.
    pub fn district_options(&self) -> &[RegionNode] {
        self.city().map(|c| c.children.as_slice()).unwrap_or(&[])
    }

    pub fn ward_options(&self) -> &[RegionNode] {
        self.district()
            .map(|d| d.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Changing the city always clears district and ward, regardless of
    /// prior state. An unknown or empty name clears all three levels.
    pub fn select_city(&mut self, name: &str) {
        self.city = find_by_name(self.tree.cities(), name);
        self.district = None;
        self.ward = None;
        self.recompute_address();
    }

    pub fn select_district(&mut self, name: &str) {
        self.district = self
            .city()
            .and_then(|city| find_by_name(&city.children, name));
        self.ward = None;
        self.recompute_address();
    }

    pub fn select_ward(&mut self, name: &str) {
        self.ward = self
            .district()
            .and_then(|district| find_by_name(&district.children, name));
        self.recompute_address();
    }

    fn recompute_address(&mut self) {
        let segments = [
            self.ward().map(|n| n.name.clone()),
            self.district().map(|n| n.name.clone()),
            self.city().map(|n| n.name.clone()),
        ];
        self.address = segments
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
    }

    /// Submit-time requirement check: one error per missing level,
    /// keyed by the form field name. Surfaced inline, never thrown.
    pub fn submit_errors(&self) -> Vec<(&'static str, String)> {
        let mut errors = Vec::new();
        if self.city.is_none() {
            errors.push(("city", "City must not be empty".to_string()));
        }
        if self.district.is_none() {
            errors.push(("district", "District must not be empty".to_string()));
        }
        if self.ward.is_none() {
            errors.push(("ward", "Ward must not be empty".to_string()));
        }
        errors
    }
}
