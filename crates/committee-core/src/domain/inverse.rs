//! One-to-many inverse index for "which entities point to this value?" lookups.
//!
//! - **Index-based**: stores `value index -> entity indices`, never entities
//! - **Owned**: plain `Vec`s mutated through `&mut self`
//! - **Ordered**: members are kept sorted so iteration order does not depend
//!   on the order in which moves were applied

/// Index-based inverse of a nullable planning variable.
///
/// For `assignment.committee = Some(c)` this answers "which assignments point
/// at committee `c`?". Entities whose variable is unset are not tracked.
///
/// # Example
///
/// ```
/// use committee_core::domain::InverseIndex;
///
/// let mut index = InverseIndex::new(2);
/// index.insert(1, 7);
/// index.insert(1, 3);
/// assert_eq!(index.get(1), &[3, 7]);
///
/// index.update(Some(1), Some(0), 7);
/// assert_eq!(index.get(0), &[7]);
/// assert_eq!(index.get(1), &[3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InverseIndex {
    members: Vec<Vec<usize>>,
}

impl InverseIndex {
    /// Creates an index over `value_count` values, all without members.
    pub fn new(value_count: usize) -> Self {
        Self {
            members: vec![Vec::new(); value_count],
        }
    }

    /// Entities currently pointing at `value`, in ascending index order.
    #[inline]
    pub fn get(&self, value: usize) -> &[usize] {
        self.members.get(value).map_or(&[], Vec::as_slice)
    }

    /// Registers that `entity` now points at `value`.
    pub fn insert(&mut self, value: usize, entity: usize) {
        let members = &mut self.members[value];
        if let Err(pos) = members.binary_search(&entity) {
            members.insert(pos, entity);
        }
    }

    /// Removes `entity` from the members of `value`.
    pub fn remove(&mut self, value: usize, entity: usize) {
        let members = &mut self.members[value];
        if let Ok(pos) = members.binary_search(&entity) {
            members.remove(pos);
        }
    }

    /// Moves `entity` from `old_value` to `new_value`; `None` means unset.
    pub fn update(&mut self, old_value: Option<usize>, new_value: Option<usize>, entity: usize) {
        if let Some(old) = old_value {
            self.remove(old, entity);
        }
        if let Some(new) = new_value {
            self.insert(new, entity);
        }
    }

    /// Number of values tracked (not members).
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Total number of entities pointing at some value.
    pub fn member_count(&self) -> usize {
        self.members.iter().map(Vec::len).sum()
    }
}
