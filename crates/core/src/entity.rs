//! Entity traits: identity and slug addressing.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Entities addressable by a URL slug.
///
/// Slugs are unique per entity kind and stable for the lifetime of the
/// record; identifiers stay internal while slugs face the outside.
pub trait Slugged: Entity {
    fn slug(&self) -> &str;
}
