//! Loader for store inventory JSON
//!
//! The document is an array of parts, each listing the colors it is sold in:
//!
//! ```json
//! [{"element_id": "3020", "brick_type": "PLATE 2X4", "num_colors": 1,
//!   "colors": [{"color_name": "Red", "element_id": "302021",
//!               "rgb": "#b40000", "price": 0.21}]}]
//! ```
//!
//! Colors may be marked `is_substitute` with a `substitutes` list of smaller
//! parts that fill the same footprint.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use crate::algorithm::availability::AvailabilityMap;
use crate::algorithm::catalog::{BrickCatalog, BrickKind, BrickType, BrickTypeId};
use crate::analysis::purchase::{ElementCatalog, ElementListing, SubstitutePart};
use crate::color::{Color, ColorId, Palette, Rgb};
use crate::io::error::{Result, WithPath, invalid_catalog};

/// Part names whose direct colors define the universal palette
const UNIVERSAL_REFERENCE_PARTS: [&str; 2] = ["BRICK 1X1", "PLATE 1X1"];

#[derive(Debug, Clone, Deserialize)]
struct SubstituteRecord {
    brick_type: String,
    #[serde(default)]
    element_id: Option<String>,
    quantity: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct ColorRecord {
    color_name: String,
    #[serde(default)]
    element_id: Option<String>,
    #[serde(default)]
    rgb: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    is_substitute: bool,
    #[serde(default)]
    substitutes: Vec<SubstituteRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct PieceRecord {
    brick_type: String,
    #[serde(default)]
    colors: Vec<ColorRecord>,
}

impl ColorRecord {
    const fn is_direct(&self) -> bool {
        !self.is_substitute
    }
}

/// Parsed store inventory
#[derive(Debug, Clone)]
pub struct Inventory {
    pieces: Vec<PieceRecord>,
}

/// How an inventory is narrowed into a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotOptions {
    /// Keep only colors sold as both `BRICK 1X1` and `PLATE 1X1`
    pub universal_only: bool,
    /// Treat colors listed with substitute parts as placeable
    pub allow_substitutes: bool,
}

/// A color sold for smaller parts of the same kind but not for this part
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingColor {
    /// Part lacking the color
    pub brick_type: String,
    /// Missing color name
    pub color_name: String,
    /// Smaller parts sold directly in the color, smallest first
    pub available_in: Vec<String>,
}

/// Piece index, missing color, and indices of smaller pieces sold in it
type ColorGap = (usize, String, Vec<usize>);

/// Catalog, palette and constraints derived from an inventory for one kind
#[derive(Debug, Clone)]
pub struct InventorySnapshot {
    /// Parts of the selected kind, largest first
    pub catalog: BrickCatalog,
    /// Colors with a known RGB value
    pub palette: Palette,
    /// Part/color pairs not sold directly
    pub availability: AvailabilityMap,
    /// Element ids and prices for purchase lists
    pub elements: ElementCatalog,
}

impl Inventory {
    /// Parse an inventory document
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid inventory array
    pub fn from_json_str(json: &str) -> Result<Self> {
        let pieces: Vec<PieceRecord> = serde_json::from_str(json)?;
        Ok(Self { pieces })
    }

    /// Read and parse an inventory file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).with_path(path, "read inventory")?;
        Self::from_json_str(&json).with_path(path, "parse inventory")
    }

    /// Number of parts listed
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Colors sold directly as both `BRICK 1X1` and `PLATE 1X1`
    ///
    /// Restricting to these keeps colors interchangeable between bricks and
    /// plates. Empty if either reference part is missing.
    pub fn universal_color_names(&self) -> BTreeSet<String> {
        let direct_colors = |part: &str| -> Option<BTreeSet<String>> {
            let piece = self
                .pieces
                .iter()
                .find(|piece| piece.brick_type.eq_ignore_ascii_case(part))?;
            Some(
                piece
                    .colors
                    .iter()
                    .filter(|color| color.is_direct())
                    .map(|color| color.color_name.clone())
                    .collect(),
            )
        };

        let [brick_part, plate_part] = UNIVERSAL_REFERENCE_PARTS;
        match (direct_colors(brick_part), direct_colors(plate_part)) {
            (Some(bricks), Some(plates)) => bricks.intersection(&plates).cloned().collect(),
            _ => BTreeSet::new(),
        }
    }

    /// Colors each part lacks although a smaller part of its kind is sold in them
    ///
    /// Parts are reported in inventory order, colors by name.
    ///
    /// # Errors
    ///
    /// Returns an error if a part name cannot be parsed
    pub fn missing_colors(&self) -> Result<Vec<MissingColor>> {
        let types = self.parsed_types()?;
        Ok(self
            .color_gaps(&types)
            .into_iter()
            .filter_map(|(index, color_name, sources)| {
                let piece = self.pieces.get(index)?;
                Some(MissingColor {
                    brick_type: piece.brick_type.clone(),
                    color_name,
                    available_in: sources
                        .iter()
                        .filter_map(|&source| self.pieces.get(source))
                        .map(|source| source.brick_type.clone())
                        .collect(),
                })
            })
            .collect())
    }

    /// List missing colors as substitute combinations of smaller parts
    ///
    /// Smaller parts that fit inside the footprint are taken largest first
    /// and counted by area. A color is only added when the area is filled
    /// exactly. The new listing has no element id, the summed price of its
    /// parts, and the RGB value of the smallest part sold in the color.
    /// Returns the number of listings added.
    ///
    /// # Errors
    ///
    /// Returns an error if a part name cannot be parsed
    pub fn add_substitutes(&mut self) -> Result<usize> {
        let types = self.parsed_types()?;
        let additions: Vec<(usize, ColorRecord)> = self
            .color_gaps(&types)
            .into_iter()
            .filter_map(|(index, color_name, sources)| {
                let target = types.get(index)?;
                let record = self.fill_by_area(&types, target, &color_name, &sources)?;
                Some((index, record))
            })
            .collect();

        let added = additions.len();
        for (index, record) in additions {
            if let Some(piece) = self.pieces.get_mut(index) {
                piece.colors.push(record);
            }
        }
        log::info!("inventory: added {added} substitute color listings");
        Ok(added)
    }

    fn parsed_types(&self) -> Result<Vec<BrickType>> {
        self.pieces
            .iter()
            .enumerate()
            .map(|(index, piece)| BrickType::parse(index as BrickTypeId + 1, &piece.brick_type))
            .collect()
    }

    fn color_gaps(&self, types: &[BrickType]) -> Vec<ColorGap> {
        let mut gaps = Vec::new();
        for (index, (piece, target)) in self.pieces.iter().zip(types).enumerate() {
            let listed: HashSet<&str> = piece
                .colors
                .iter()
                .map(|color| color.color_name.as_str())
                .collect();

            let mut smaller: Vec<usize> = types
                .iter()
                .enumerate()
                .filter(|(_, other)| other.kind == target.kind && other.area() < target.area())
                .map(|(other_index, _)| other_index)
                .collect();
            smaller.sort_by_key(|&other_index| types.get(other_index).map_or(0, BrickType::area));

            let mut sources: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
            for &other_index in &smaller {
                let Some(other) = self.pieces.get(other_index) else {
                    continue;
                };
                for color in other.colors.iter().filter(|color| color.is_direct()) {
                    if !listed.contains(color.color_name.as_str()) {
                        sources
                            .entry(color.color_name.as_str())
                            .or_default()
                            .push(other_index);
                    }
                }
            }

            gaps.extend(
                sources
                    .into_iter()
                    .map(|(name, parts)| (index, name.to_string(), parts)),
            );
        }
        gaps
    }

    fn fill_by_area(
        &self,
        types: &[BrickType],
        target: &BrickType,
        color_name: &str,
        sources: &[usize],
    ) -> Option<ColorRecord> {
        let direct_listing = |index: usize| {
            self.pieces.get(index)?.colors.iter().find(|color| {
                color.is_direct() && color.color_name == color_name && color.element_id.is_some()
            })
        };

        let mut largest_first = sources.to_vec();
        largest_first.sort_by_key(|&index| Reverse(types.get(index).map_or(0, BrickType::area)));

        let mut remaining = target.area();
        let mut price = 0.0;
        let mut substitutes = Vec::new();
        for index in largest_first {
            let (Some(part), Some(piece), Some(listing)) = (
                types.get(index),
                self.pieces.get(index),
                direct_listing(index),
            ) else {
                continue;
            };
            if part.width > target.width || part.height > target.height {
                continue;
            }
            let quantity = remaining / part.area();
            if quantity == 0 {
                continue;
            }
            remaining -= quantity * part.area();
            price += listing.price.unwrap_or(0.0) * quantity as f64;
            substitutes.push(SubstituteRecord {
                brick_type: piece.brick_type.clone(),
                element_id: listing.element_id.clone(),
                quantity,
            });
            if remaining == 0 {
                break;
            }
        }
        if remaining != 0 {
            return None;
        }

        let rgb = sources
            .iter()
            .filter_map(|&index| direct_listing(index))
            .find_map(|listing| listing.rgb.clone());

        Some(ColorRecord {
            color_name: color_name.to_string(),
            element_id: None,
            rgb,
            price: Some((price * 100.0).round() / 100.0),
            is_substitute: true,
            substitutes,
        })
    }

    /// Derive catalog, palette, availability and listings for one kind
    ///
    /// Brick type ids follow inventory order; color ids follow sorted color
    /// names. With `universal_only`, the palette keeps only
    /// [`universal_color_names`](Self::universal_color_names). Colors listed
    /// only through substitutes stay unavailable unless `allow_substitutes`
    /// is set.
    ///
    /// # Errors
    ///
    /// Returns an error if a part name cannot be parsed, the kind has no 1x1
    /// part, or no color of the kind has an RGB value
    pub fn snapshot(&self, kind: BrickKind, options: SnapshotOptions) -> Result<InventorySnapshot> {
        let mut types: Vec<(BrickType, &PieceRecord)> = Vec::new();
        for (index, piece) in self.pieces.iter().enumerate() {
            let brick_type = BrickType::parse(index as BrickTypeId + 1, &piece.brick_type)?;
            if brick_type.kind == kind {
                types.push((brick_type, piece));
            }
        }
        if types.is_empty() {
            return Err(invalid_catalog(&format!("inventory lists no {kind} parts")));
        }

        let universal = options
            .universal_only
            .then(|| self.universal_color_names());

        let mut rgb_by_name: BTreeMap<String, Rgb> = BTreeMap::new();
        for color in types.iter().flat_map(|(_, piece)| &piece.colors) {
            let allowed = universal
                .as_ref()
                .is_none_or(|names| names.contains(&color.color_name));
            if let (true, Some(hex)) = (allowed, &color.rgb) {
                if !rgb_by_name.contains_key(&color.color_name) {
                    rgb_by_name.insert(color.color_name.clone(), Rgb::from_hex(hex)?);
                }
            }
        }

        let colors: Vec<Color> = rgb_by_name
            .into_iter()
            .enumerate()
            .map(|(index, (name, rgb))| Color::new(index as ColorId + 1, name, rgb))
            .collect();
        let palette = Palette::new(colors)?;

        let mut availability = AvailabilityMap::new();
        let mut elements = ElementCatalog::new();
        for (brick_type, piece) in &types {
            let direct: HashSet<&str> = piece
                .colors
                .iter()
                .filter(|color| {
                    color.is_direct()
                        || (options.allow_substitutes && !color.substitutes.is_empty())
                })
                .map(|color| color.color_name.as_str())
                .collect();

            for color in palette.colors() {
                if !direct.contains(color.name()) {
                    availability.mark_unavailable(brick_type, color);
                }
            }

            for record in &piece.colors {
                elements.insert(&piece.brick_type, &record.color_name, listing_from(record));
            }
        }

        let catalog = BrickCatalog::new(types.into_iter().map(|(brick_type, _)| brick_type).collect())?;

        log::info!(
            "inventory: {} {kind} types, {} colors, {} unavailable combinations",
            catalog.len(),
            palette.len(),
            availability.unavailable_count()
        );

        Ok(InventorySnapshot {
            catalog,
            palette,
            availability,
            elements,
        })
    }
}

fn listing_from(record: &ColorRecord) -> ElementListing {
    ElementListing {
        element_id: record.element_id.clone().filter(|id| !id.trim().is_empty()),
        price: record.price,
        substitutes: record
            .substitutes
            .iter()
            .filter_map(|sub| {
                Some(SubstitutePart {
                    brick_type: sub.brick_type.clone(),
                    element_id: sub.element_id.clone()?,
                    quantity: sub.quantity,
                })
            })
            .collect(),
    }
}
