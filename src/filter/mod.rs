//! The filter catalog.
//!
//! Filters are declarative: an id, a display name, a category, a typed
//! parameter schema, and a pure transform composed from the palette,
//! dithering, and analysis primitives. The catalog is an immutable
//! collection built once with [`FilterRegistry::builtin`] and passed
//! explicitly into [`apply`](FilterRegistry::apply).

mod cartoon;
mod content;
mod popart;
mod remap;
mod texture;
mod tiling;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::{BrixError, Result};
use crate::types::{resolve, ParamSpec, PixelBuffer, ResolvedParams, UserParams};

/// Transform signature shared by every filter: pure, allocating a fresh
/// output buffer of the same dimensions, never mutating its input.
pub type Transform = fn(&PixelBuffer, &ResolvedParams) -> Result<PixelBuffer>;

/// Filter grouping shown by host UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterCategory {
    PaletteRemap,
    Texture,
    Tiling,
    Cartoon,
    PopArt,
    ContentAware,
}

impl FilterCategory {
    /// Get the short name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            FilterCategory::PaletteRemap => "palette-remap",
            FilterCategory::Texture => "texture",
            FilterCategory::Tiling => "tiling",
            FilterCategory::Cartoon => "cartoon",
            FilterCategory::PopArt => "pop-art",
            FilterCategory::ContentAware => "content-aware",
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A registered filter.
#[derive(Clone, Serialize)]
pub struct Filter {
    /// Stable kebab-case identifier.
    pub id: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// UI grouping.
    pub category: FilterCategory,
    /// Ordered parameter schema; resolution fills defaults.
    pub schema: Vec<ParamSpec>,
    #[serde(skip)]
    transform: Transform,
}

impl Filter {
    fn new(
        id: &'static str,
        display_name: &'static str,
        category: FilterCategory,
        schema: Vec<ParamSpec>,
        transform: Transform,
    ) -> Self {
        Self {
            id,
            display_name,
            category,
            schema,
            transform,
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("params", &self.schema.len())
            .finish()
    }
}

/// The immutable filter catalog.
///
/// Built once at startup; lookups never mutate it.
#[derive(Debug)]
pub struct FilterRegistry {
    filters: Vec<Filter>,
    index: HashMap<&'static str, usize>,
}

impl FilterRegistry {
    /// Build the full builtin catalog.
    pub fn builtin() -> Self {
        let mut filters = Vec::new();
        filters.extend(remap::filters());
        filters.extend(texture::filters());
        filters.extend(tiling::filters());
        filters.extend(cartoon::filters());
        filters.extend(popart::filters());
        filters.extend(content::filters());
        Self::from_filters(filters)
    }

    fn from_filters(filters: Vec<Filter>) -> Self {
        let index = filters
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id, i))
            .collect();
        Self { filters, index }
    }

    /// Look up a filter by id.
    pub fn get(&self, id: &str) -> Option<&Filter> {
        self.index.get(id).map(|&i| &self.filters[i])
    }

    /// All filter ids, in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.filters.iter().map(|f| f.id)
    }

    /// All filters, in catalog order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Filters in one category, in catalog order.
    pub fn by_category(&self, category: FilterCategory) -> impl Iterator<Item = &Filter> {
        self.filters.iter().filter(move |f| f.category == category)
    }

    /// Number of registered filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply a filter to a buffer.
    ///
    /// Looks the filter up by id (failing with `UnknownFilter`, the input
    /// untouched), overlays caller params onto the schema defaults, and
    /// invokes the transform. The result is always a fresh buffer of the
    /// same dimensions.
    pub fn apply(&self, id: &str, buffer: &PixelBuffer, params: &UserParams) -> Result<PixelBuffer> {
        let filter = self.get(id).ok_or_else(|| BrixError::UnknownFilter {
            id: id.to_string(),
        })?;
        let resolved = resolve(&filter.schema, params);
        (filter.transform)(buffer, &resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;

    #[test]
    fn test_builtin_catalog_shape() {
        let registry = FilterRegistry::builtin();
        assert_eq!(registry.len(), 25);
        assert!(!registry.is_empty());

        // Every category is populated
        for category in [
            FilterCategory::PaletteRemap,
            FilterCategory::Texture,
            FilterCategory::Tiling,
            FilterCategory::Cartoon,
            FilterCategory::PopArt,
            FilterCategory::ContentAware,
        ] {
            assert!(
                registry.by_category(category).count() >= 3,
                "sparse category {}",
                category
            );
        }
    }

    #[test]
    fn test_ids_unique() {
        let registry = FilterRegistry::builtin();
        let ids: Vec<_> = registry.ids().collect();
        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn test_get_known_and_unknown() {
        let registry = FilterRegistry::builtin();
        assert!(registry.get("clean-quantize").is_some());
        assert!(registry.get("does-not-exist").is_none());
    }

    #[test]
    fn test_apply_unknown_filter_fails() {
        let registry = FilterRegistry::builtin();
        let buf = PixelBuffer::filled(4, 4, Colour::rgb(1, 2, 3));
        let copy = buf.clone();

        let err = registry.apply("does-not-exist", &buf, &UserParams::new());
        match err {
            Err(BrixError::UnknownFilter { id }) => assert_eq!(id, "does-not-exist"),
            other => panic!("expected UnknownFilter, got {:?}", other),
        }
        // Input untouched
        assert_eq!(buf, copy);
    }

    #[test]
    fn test_every_filter_keeps_dimensions_and_alpha() {
        let registry = FilterRegistry::builtin();
        let mut buf = PixelBuffer::filled(24, 18, Colour::new(140, 90, 60, 255));
        for y in 0..18 {
            for x in 0..24 {
                if (x / 4 + y / 3) % 2 == 0 {
                    buf.set_pixel(x, y, Colour::new(40, 120, 190, 255));
                }
            }
        }
        buf.set_pixel(3, 3, Colour::new(200, 200, 40, 128));

        for id in registry.ids().collect::<Vec<_>>() {
            let out = registry
                .apply(id, &buf, &UserParams::new())
                .unwrap_or_else(|e| panic!("{} failed: {}", id, e));
            assert_eq!(out.size(), buf.size(), "{} changed dimensions", id);
            assert_eq!(out.pixel(3, 3).a, 128, "{} lost alpha", id);
        }
    }

    #[test]
    fn test_every_filter_deterministic_with_defaults() {
        let registry = FilterRegistry::builtin();
        let mut buf = PixelBuffer::filled(16, 16, Colour::rgb(100, 150, 90));
        for i in 0..16 {
            buf.set_pixel(i, i, Colour::rgb(240, 30, 80));
        }

        for id in registry.ids().collect::<Vec<_>>() {
            let a = registry.apply(id, &buf, &UserParams::new()).unwrap();
            let b = registry.apply(id, &buf, &UserParams::new()).unwrap();
            assert_eq!(a, b, "{} is not deterministic", id);
        }
    }

    #[test]
    fn test_catalog_serializes_for_host_ui() {
        let registry = FilterRegistry::builtin();
        let json = serde_json::to_value(registry.filters()).unwrap();

        let arr = json.as_array().unwrap();
        assert_eq!(arr.len(), 25);

        let clean = arr
            .iter()
            .find(|f| f["id"] == "clean-quantize")
            .expect("clean-quantize in catalog");
        assert_eq!(clean["category"], "palette-remap");
        assert_eq!(clean["schema"][0]["name"], "dithering");
        assert_eq!(clean["schema"][0]["kind"], "choice");
    }
}
