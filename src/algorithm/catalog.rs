//! Brick type catalog ordered for greedy selection

use serde::Serialize;
use std::fmt;

use crate::io::error::{Result, invalid_catalog};

/// Identifier of a brick type within a catalog
pub type BrickTypeId = u32;

/// Physical family of a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BrickKind {
    /// Full-height brick
    Brick,
    /// One-third-height plate
    Plate,
}

impl BrickKind {
    /// Uppercase name as used in part names (`BRICK`, `PLATE`)
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brick => "BRICK",
            Self::Plate => "PLATE",
        }
    }

    /// Parse `BRICK` or `PLATE`, ignoring ASCII case
    pub fn parse(text: &str) -> Option<Self> {
        if text.eq_ignore_ascii_case("brick") {
            Some(Self::Brick)
        } else if text.eq_ignore_ascii_case("plate") {
            Some(Self::Plate)
        } else {
            None
        }
    }
}

impl fmt::Display for BrickKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rectangular brick footprint in studs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BrickType {
    /// Catalog id
    pub id: BrickTypeId,
    /// Display name, e.g. `PLATE 2X4`
    pub name: String,
    /// Footprint width (columns)
    pub width: usize,
    /// Footprint height (rows)
    pub height: usize,
    /// Brick or plate
    pub kind: BrickKind,
    /// Id of the physical part; differs from `id` only for rotated variants
    pub canonical_id: BrickTypeId,
}

impl BrickType {
    /// Create an unrotated brick type named `KIND WxH`
    pub fn new(id: BrickTypeId, kind: BrickKind, width: usize, height: usize) -> Self {
        Self {
            id,
            name: format!("{kind} {width}X{height}"),
            width,
            height,
            kind,
            canonical_id: id,
        }
    }

    /// Parse a part name such as `BRICK 2X4` or `plate 1x2`
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not `KIND WxH` with positive dimensions
    pub fn parse(id: BrickTypeId, name: &str) -> Result<Self> {
        let mut parts = name.split_whitespace();
        let kind = parts.next().and_then(BrickKind::parse);
        let dimensions = parts.next().and_then(|dims| {
            let (w, h) = dims.split_once(['x', 'X'])?;
            Some((w.parse::<usize>().ok()?, h.parse::<usize>().ok()?))
        });

        match (kind, dimensions, parts.next()) {
            (Some(kind), Some((width, height)), None) if width > 0 && height > 0 => {
                Ok(Self::new(id, kind, width, height))
            }
            _ => Err(invalid_catalog(&format!(
                "cannot parse brick type '{name}', expected e.g. 'PLATE 2X4'"
            ))),
        }
    }

    /// Footprint area in studs
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Check for the 1x1 fallback footprint
    pub const fn is_unit(&self) -> bool {
        self.width == 1 && self.height == 1
    }

    /// Check whether this entry is a rotated copy of another part
    pub const fn is_rotated(&self) -> bool {
        self.id != self.canonical_id
    }
}

impl fmt::Display for BrickType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Ordered brick catalog, largest area first
///
/// Always contains a 1x1 entry so that any cell can be covered on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrickCatalog {
    types: Vec<BrickType>,
}

impl BrickCatalog {
    /// Build a catalog, stably sorting entries by descending area
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, lacks a 1x1 entry, contains a
    /// zero-sized footprint, or repeats an id
    pub fn new(mut types: Vec<BrickType>) -> Result<Self> {
        if types.is_empty() {
            return Err(invalid_catalog(&"catalog has no brick types"));
        }
        if let Some(empty) = types.iter().find(|t| t.area() == 0) {
            return Err(invalid_catalog(&format!(
                "brick type '{}' has a zero-sized footprint",
                empty.name
            )));
        }
        if !types.iter().any(BrickType::is_unit) {
            return Err(invalid_catalog(&"catalog must contain a 1x1 fallback"));
        }

        let mut ids: Vec<BrickTypeId> = types.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|pair| pair.first() == pair.get(1)) {
            return Err(invalid_catalog(&"brick type ids must be unique"));
        }

        types.sort_by_key(|t| std::cmp::Reverse(t.area()));
        Ok(Self { types })
    }

    /// Parse a catalog from part names, assigning ids in input order from 1
    ///
    /// # Errors
    ///
    /// Returns an error if a name fails to parse or the result is invalid
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let types = names
            .iter()
            .enumerate()
            .map(|(index, name)| BrickType::parse(index as BrickTypeId + 1, name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(types)
    }

    /// Standard plate catalog: 2x4, 2x2, 1x4, 1x2, 1x1
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in list is malformed
    pub fn standard(kind: BrickKind) -> Result<Self> {
        Self::new(vec![
            BrickType::new(1, kind, 2, 4),
            BrickType::new(2, kind, 2, 2),
            BrickType::new(3, kind, 1, 4),
            BrickType::new(4, kind, 1, 2),
            BrickType::new(5, kind, 1, 1),
        ])
    }

    /// Add the 90-degree rotation of every non-square entry
    ///
    /// Rotated variants get fresh ids above the current maximum, keep the
    /// part name, and sort directly after their source since the sort is
    /// stable and areas match.
    #[must_use]
    pub fn with_rotations(&self) -> Self {
        let mut next_id = self.types.iter().map(|t| t.id).max().unwrap_or(0);
        let mut types = Vec::with_capacity(self.types.len() * 2);

        for brick_type in &self.types {
            types.push(brick_type.clone());
            let already_present = self.types.iter().any(|other| {
                other.canonical_id == brick_type.canonical_id
                    && other.width == brick_type.height
                    && other.height == brick_type.width
            });
            if brick_type.width != brick_type.height && !already_present {
                next_id += 1;
                types.push(BrickType {
                    id: next_id,
                    name: brick_type.name.clone(),
                    width: brick_type.height,
                    height: brick_type.width,
                    kind: brick_type.kind,
                    canonical_id: brick_type.canonical_id,
                });
            }
        }

        types.sort_by_key(|t| std::cmp::Reverse(t.area()));
        Self { types }
    }

    /// Entries in greedy preference order
    pub fn types(&self) -> &[BrickType] {
        &self.types
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false for a validated catalog
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Position of a type in preference order
    pub fn rank(&self, id: BrickTypeId) -> Option<usize> {
        self.types.iter().position(|t| t.id == id)
    }

    /// Look up a type by id
    pub fn get(&self, id: BrickTypeId) -> Option<&BrickType> {
        self.types.iter().find(|t| t.id == id)
    }

    /// Look up a type by display name, returning the unrotated entry
    pub fn by_name(&self, name: &str) -> Option<&BrickType> {
        self.types
            .iter()
            .find(|t| !t.is_rotated() && t.name.eq_ignore_ascii_case(name))
    }
}
