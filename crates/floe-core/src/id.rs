//! Array identities, sharing categories, and dimension tags.

use std::fmt;

/// Sharing category of a model array.
///
/// The category is half of an array's identity: `shared:sst` and
/// `protected:sst` name two different arrays. It also fixes the write
/// discipline the store enforces at bind time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Written only by a single designated owner, read by any number of
    /// components.
    Protected,
    /// Supplied by one component and visible downstream; at most one
    /// component may hold read-write access at any time.
    Shared,
    /// Per-step working data owned and rewritten by its supplier.
    Dynamic,
}

impl Category {
    /// Lowercase label used in diagnostics and serialization keys.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Protected => "protected",
            Self::Shared => "shared",
            Self::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of one logical field in the array store.
///
/// The pair `(category, name)` is unique within a store and is the key
/// space used for diagnostics and restart serialization. Identities are
/// cheap to clone and hash; all store lookups by identity are O(1).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArrayId {
    /// Sharing category.
    pub category: Category,
    /// Field name, e.g. `"iceThickness"`.
    pub name: String,
}

impl ArrayId {
    /// Create an identity in the given category.
    pub fn new(category: Category, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
        }
    }

    /// Shorthand for a [`Category::Protected`] identity.
    pub fn protected(name: impl Into<String>) -> Self {
        Self::new(Category::Protected, name)
    }

    /// Shorthand for a [`Category::Shared`] identity.
    pub fn shared(name: impl Into<String>) -> Self {
        Self::new(Category::Shared, name)
    }

    /// Shorthand for a [`Category::Dynamic`] identity.
    pub fn dynamic(name: impl Into<String>) -> Self {
        Self::new(Category::Dynamic, name)
    }
}

impl fmt::Display for ArrayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.name)
    }
}

/// Semantic layout of a model array.
///
/// The tag records what the dimensions mean, independent of their sizes.
/// Declaring an array checks that the shape's rank matches the tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DimTag {
    /// Cell-centred horizontal field, 2 dimensions (x, y).
    Horizontal,
    /// Face-centred field on x-normal faces, 2 dimensions.
    StaggeredU,
    /// Face-centred field on y-normal faces, 2 dimensions.
    StaggeredV,
    /// Layered field with vertical levels, 3 dimensions (x, y, z).
    Vertical,
}

impl DimTag {
    /// Number of dimensions an array with this tag must have.
    pub fn rank(&self) -> usize {
        match self {
            Self::Horizontal | Self::StaggeredU | Self::StaggeredV => 2,
            Self::Vertical => 3,
        }
    }
}

impl fmt::Display for DimTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Horizontal => "horizontal",
            Self::StaggeredU => "staggered-u",
            Self::StaggeredV => "staggered-v",
            Self::Vertical => "vertical",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_display_includes_category() {
        let id = ArrayId::shared("iceThickness");
        assert_eq!(id.to_string(), "shared:iceThickness");
        assert_eq!(ArrayId::protected("sst").to_string(), "protected:sst");
    }

    #[test]
    fn same_name_different_category_are_distinct() {
        assert_ne!(ArrayId::shared("sst"), ArrayId::protected("sst"));
        assert_eq!(ArrayId::shared("sst"), ArrayId::shared("sst"));
    }

    #[test]
    fn tag_ranks() {
        assert_eq!(DimTag::Horizontal.rank(), 2);
        assert_eq!(DimTag::StaggeredU.rank(), 2);
        assert_eq!(DimTag::Vertical.rank(), 3);
    }
}
