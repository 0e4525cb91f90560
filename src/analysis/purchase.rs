//! Purchase list resolution against a store element catalog
//!
//! Parts that cannot be tied to an orderable element are not dropped: they
//! are returned in a separate partition for manual lookup.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::analysis::parts::PartsEntry;
use crate::color::Color;

/// Smaller part standing in for a brick/color combination the store lacks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstitutePart {
    /// Part name of the substitute, e.g. `PLATE 1X2`
    pub brick_type: String,
    /// Orderable element id of the substitute
    pub element_id: String,
    /// Substitute pieces needed per original piece
    pub quantity: usize,
}

/// Store data for one brick type in one color
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElementListing {
    /// Orderable element id, absent for substitute-only listings
    pub element_id: Option<String>,
    /// Unit price in store currency
    pub price: Option<f64>,
    /// Substitute parts, used when there is no direct element
    pub substitutes: Vec<SubstitutePart>,
}

/// Store listings keyed by part name and color name
#[derive(Debug, Clone, Default)]
pub struct ElementCatalog {
    listings: HashMap<(String, String), ElementListing>,
}

fn listing_key(brick_type: &str, color_name: &str) -> (String, String) {
    (brick_type.to_ascii_uppercase(), color_name.to_ascii_lowercase())
}

impl ElementCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a listing
    pub fn insert(&mut self, brick_type: &str, color_name: &str, listing: ElementListing) {
        self.listings
            .insert(listing_key(brick_type, color_name), listing);
    }

    /// Listing for a part name and color name, ignoring case
    pub fn get(&self, brick_type: &str, color_name: &str) -> Option<&ElementListing> {
        self.listings.get(&listing_key(brick_type, color_name))
    }

    /// Number of listings
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Test if no listings are present
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

/// Orderable line of the purchase list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseItem {
    /// Store element id
    pub element_id: String,
    /// Part name
    pub brick_type: String,
    /// Part color
    pub color: Color,
    /// Pieces to order
    pub quantity: usize,
    /// Unit price
    pub unit_price: f64,
    /// Part name this line substitutes for, if any
    pub substitute_for: Option<String>,
}

impl PurchaseItem {
    /// Quantity times unit price
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// Why a part could not be resolved to an orderable element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// No listing for the part in this color
    NotListed,
    /// Listing exists but has neither an element id nor substitutes
    MissingElementId,
    /// Element id known but no price
    MissingPrice,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotListed => "not listed",
            Self::MissingElementId => "missing element id",
            Self::MissingPrice => "missing price",
        })
    }
}

/// Part needing manual lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnresolvedItem {
    /// Part name
    pub brick_type: String,
    /// Part color
    pub color: Color,
    /// Pieces needed
    pub quantity: usize,
    /// Element id, when known
    pub element_id: Option<String>,
    /// Reason the part is unresolved
    pub reason: UnresolvedReason,
}

/// Purchase list split into orderable and manual-lookup partitions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PurchaseList {
    /// Lines with an element id and a price, one per element id
    pub resolved: Vec<PurchaseItem>,
    /// Lines that need manual lookup
    pub unresolved: Vec<UnresolvedItem>,
}

impl PurchaseList {
    /// Sum of resolved line totals
    pub fn total_price(&self) -> f64 {
        self.resolved.iter().map(PurchaseItem::line_total).sum()
    }

    /// Pieces across resolved lines
    pub fn resolved_pieces(&self) -> usize {
        self.resolved.iter().map(|item| item.quantity).sum()
    }

    /// Pieces across unresolved lines
    pub fn unresolved_pieces(&self) -> usize {
        self.unresolved.iter().map(|item| item.quantity).sum()
    }

    fn add_resolved(&mut self, item: PurchaseItem) {
        match self
            .resolved
            .iter_mut()
            .find(|existing| existing.element_id == item.element_id)
        {
            Some(existing) => existing.quantity += item.quantity,
            None => self.resolved.push(item),
        }
    }

    fn add_unresolved(&mut self, item: UnresolvedItem) {
        match self.unresolved.iter_mut().find(|existing| {
            existing.brick_type == item.brick_type
                && existing.color.id() == item.color.id()
                && existing.reason == item.reason
        }) {
            Some(existing) => existing.quantity += item.quantity,
            None => self.unresolved.push(item),
        }
    }
}

/// Map a parts list onto orderable store elements
///
/// Rotated variants share their part name, so they merge into the same
/// element line. A listing without an element id but with substitutes is
/// expanded into its substitute parts, each priced from its own listing.
pub fn resolve_purchase_list(parts: &[PartsEntry], catalog: &ElementCatalog) -> PurchaseList {
    let mut list = PurchaseList::default();

    for entry in parts {
        let name = entry.brick_type.name.as_str();
        let Some(listing) = catalog.get(name, entry.color.name()) else {
            list.add_unresolved(UnresolvedItem {
                brick_type: name.to_string(),
                color: entry.color.clone(),
                quantity: entry.count,
                element_id: None,
                reason: UnresolvedReason::NotListed,
            });
            continue;
        };

        match (&listing.element_id, listing.price) {
            (Some(element_id), Some(price)) => list.add_resolved(PurchaseItem {
                element_id: element_id.clone(),
                brick_type: name.to_string(),
                color: entry.color.clone(),
                quantity: entry.count,
                unit_price: price,
                substitute_for: None,
            }),
            (Some(element_id), None) => list.add_unresolved(UnresolvedItem {
                brick_type: name.to_string(),
                color: entry.color.clone(),
                quantity: entry.count,
                element_id: Some(element_id.clone()),
                reason: UnresolvedReason::MissingPrice,
            }),
            (None, _) if !listing.substitutes.is_empty() => {
                resolve_substitutes(&mut list, entry, listing, catalog);
            }
            (None, _) => list.add_unresolved(UnresolvedItem {
                brick_type: name.to_string(),
                color: entry.color.clone(),
                quantity: entry.count,
                element_id: None,
                reason: UnresolvedReason::MissingElementId,
            }),
        }
    }

    log::debug!(
        "purchase list: {} resolved lines, {} unresolved lines",
        list.resolved.len(),
        list.unresolved.len()
    );

    list
}

fn resolve_substitutes(
    list: &mut PurchaseList,
    entry: &PartsEntry,
    listing: &ElementListing,
    catalog: &ElementCatalog,
) {
    for substitute in &listing.substitutes {
        let quantity = substitute.quantity * entry.count;
        let price = catalog
            .get(&substitute.brick_type, entry.color.name())
            .and_then(|sub_listing| sub_listing.price);

        match price {
            Some(unit_price) => list.add_resolved(PurchaseItem {
                element_id: substitute.element_id.clone(),
                brick_type: substitute.brick_type.clone(),
                color: entry.color.clone(),
                quantity,
                unit_price,
                substitute_for: Some(entry.brick_type.name.clone()),
            }),
            None => list.add_unresolved(UnresolvedItem {
                brick_type: substitute.brick_type.clone(),
                color: entry.color.clone(),
                quantity,
                element_id: Some(substitute.element_id.clone()),
                reason: UnresolvedReason::MissingPrice,
            }),
        }
    }
}
