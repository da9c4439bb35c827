//! Identity of the long-lived domain objects.

/// Something that keeps its identity while its state changes.
///
/// Clients are identified by tax id, accounts by their branch-wide number.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Whether this is the entity identified by `id`.
    fn has_id(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}
