use rand::random;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::num::NonZeroU16;
use std::ops::{Index, IndexMut};
use tracing::trace;

/// Generational arena handing out small copyable [`Idx`] handles.
///
/// Removed slots are reused, each reuse bumps the slot's generation so handles to the previous
/// occupant stop resolving.
pub struct Arenal<T> {
    arenal_id: ArenalId,
    entries: Vec<Entry<T>>,
    free_head: Option<OffsetType>,
    len: usize,
}

type OffsetType = u32;
type ArenalId = u16;
type Generation = NonZeroU16;

enum Entry<T> {
    Occupied(Occupied<T>),
    Empty(Empty),
}

struct Occupied<T> {
    generation: Generation,
    value: T,
}

struct Empty {
    generation: Generation,
    next_free: Option<OffsetType>,
}

pub struct Idx<T> {
    arenal_id: ArenalId,
    generation: Generation,
    offset: OffsetType,
    marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Idx<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Idx<T> {}

impl<T> PartialEq for Idx<T> {
    fn eq(&self, other: &Self) -> bool {
        self.arenal_id == other.arenal_id
            && self.generation == other.generation
            && self.offset == other.offset
    }
}

impl<T> Eq for Idx<T> {}

impl<T> Debug for Idx<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Idx({}v{})", self.offset, self.generation)
    }
}

impl<T> Default for Arenal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arenal<T> {
    pub fn new() -> Self {
        Self {
            arenal_id: random(),
            entries: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> Idx<T> {
        self.len += 1;
        if let Some(offset) = self.free_head {
            let entry = &mut self.entries[offset as usize];
            if let Entry::Empty(Empty {
                generation,
                next_free,
            }) = *entry
            {
                let Some(generation) = generation.checked_add(1) else {
                    unreachable!("retired slot {offset} on the free list");
                };
                trace!("Reusing arena slot {} at generation {}", offset, generation);
                self.free_head = next_free;
                *entry = Entry::Occupied(Occupied { generation, value });
                return self.idx(offset, generation);
            }
            unreachable!("free list points at occupied slot {offset}");
        }
        let offset = next_offset(self.entries.len());
        self.entries.push(Entry::Occupied(Occupied {
            generation: Generation::MIN,
            value,
        }));
        self.idx(offset, Generation::MIN)
    }

    /// Removes the value, the handle and all of its copies become stale
    pub fn remove(&mut self, idx: Idx<T>) -> Option<T> {
        self.get(idx)?;
        // slots at the last generation are retired instead of wrapping
        let retired = idx.generation == Generation::MAX;
        let entry = &mut self.entries[idx.offset as usize];
        let empty = Entry::Empty(Empty {
            generation: idx.generation,
            next_free: if retired { None } else { self.free_head },
        });
        let Entry::Occupied(Occupied { value, .. }) = std::mem::replace(entry, empty) else {
            return None;
        };
        if retired {
            trace!("Retiring arena slot {}", idx.offset);
        } else {
            self.free_head = Some(idx.offset);
        }
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, idx: Idx<T>) -> Option<&T> {
        if idx.arenal_id != self.arenal_id {
            return None;
        }
        match self.entries.get(idx.offset as usize)? {
            Entry::Occupied(Occupied { generation, value }) if *generation == idx.generation => {
                Some(value)
            }
            _ => None,
        }
    }

    pub fn get_mut(&mut self, idx: Idx<T>) -> Option<&mut T> {
        if idx.arenal_id != self.arenal_id {
            return None;
        }
        match self.entries.get_mut(idx.offset as usize)? {
            Entry::Occupied(Occupied { generation, value }) if *generation == idx.generation => {
                Some(value)
            }
            _ => None,
        }
    }

    pub fn contains(&self, idx: Idx<T>) -> bool {
        self.get(idx).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Idx<T>, &T)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(offset, entry)| match entry {
                Entry::Occupied(Occupied { generation, value }) => {
                    Some((self.idx(offset as OffsetType, *generation), value))
                }
                Entry::Empty(_) => None,
            })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().filter_map(|entry| match entry {
            Entry::Occupied(Occupied { value, .. }) => Some(value),
            Entry::Empty(_) => None,
        })
    }

    fn idx(&self, offset: OffsetType, generation: Generation) -> Idx<T> {
        Idx {
            arenal_id: self.arenal_id,
            generation,
            offset,
            marker: PhantomData,
        }
    }
}

fn next_offset(len: usize) -> OffsetType {
    OffsetType::try_from(len)
        .unwrap_or_else(|_| panic!("arena exceeds {} slots", OffsetType::MAX))
}

impl<T> Index<Idx<T>> for Arenal<T> {
    type Output = T;
    fn index(&self, idx: Idx<T>) -> &T {
        match self.get(idx) {
            Some(value) => value,
            None => panic!("stale or foreign arena index {idx:?}"),
        }
    }
}

impl<T> IndexMut<Idx<T>> for Arenal<T> {
    fn index_mut(&mut self, idx: Idx<T>) -> &mut T {
        match self.get_mut(idx) {
            Some(value) => value,
            None => panic!("stale or foreign arena index {idx:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::arenal::{next_offset, Arenal, Generation, Idx, OffsetType};
    use crate::geometry::rectangle::Rectangle;
    use crate::geometry::RectanglePool;

    #[test]
    fn test_size() {
        assert_eq!(std::mem::size_of::<Idx<()>>(), 8);
        assert_eq!(std::mem::size_of::<Idx<Rectangle>>(), 8);
        assert_eq!(std::mem::size_of::<Option<Idx<Rectangle>>>(), 8);
    }

    #[test]
    fn test_insert() {
        let mut arenal: Arenal<&str> = Arenal::new();
        let foo_idx = arenal.insert("foo");
        assert_eq!(arenal.entries.len(), 1);
        assert_eq!(arenal.len(), 1);
        assert_eq!(arenal[foo_idx], "foo");
    }

    #[test]
    fn test_mutate_pooled_rectangle() {
        let mut pool = RectanglePool::new();
        let idx = pool.insert(Rectangle::new(10.0, 10.0, 20.0, 20.0));
        pool[idx].inflate(5.0, 0.0);
        assert_eq!(pool[idx], Rectangle::new(5.0, 10.0, 30.0, 20.0));
        pool.get_mut(idx).unwrap().normalize();
        assert_eq!(pool.get(idx), Some(&Rectangle::new(5.0, 10.0, 30.0, 20.0)));
    }

    #[test]
    fn test_remove_and_reuse() {
        let mut pool = RectanglePool::new();
        let first = pool.insert(Rectangle::new(1.0, 1.0, 1.0, 1.0));
        let second = pool.insert(Rectangle::new(2.0, 2.0, 2.0, 2.0));
        assert_eq!(pool.remove(first), Some(Rectangle::new(1.0, 1.0, 1.0, 1.0)));
        assert_eq!(pool.len(), 1);
        assert!(!pool.contains(first));
        assert_eq!(pool.remove(first), None);

        let third = pool.insert(Rectangle::new(3.0, 3.0, 3.0, 3.0));
        assert_eq!(pool.entries.len(), 2, "slot should be reused");
        assert_ne!(first, third);
        assert_eq!(pool.get(first), None);
        assert_eq!(pool[third], Rectangle::new(3.0, 3.0, 3.0, 3.0));
        assert_eq!(pool[second], Rectangle::new(2.0, 2.0, 2.0, 2.0));
    }

    #[test]
    fn test_exhausted_slot_is_retired() {
        let mut pool = RectanglePool::new();
        let first = pool.insert(Rectangle::new(0.0, 0.0, 1.0, 1.0));
        pool.remove(first);
        for _ in 1..Generation::MAX.get() {
            let idx = pool.insert(Rectangle::new(9.0, 9.0, 9.0, 9.0));
            assert_eq!(idx.offset, 0);
            pool.remove(idx);
        }
        assert_eq!(pool.free_head, None);
        let current = pool.insert(Rectangle::new(2.0, 2.0, 2.0, 2.0));
        assert_eq!(current.offset, 1);
        assert_eq!(pool.entries.len(), 2);
        assert_ne!(first, current);
        assert_eq!(pool.get(first), None);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_next_offset() {
        assert_eq!(next_offset(0), 0);
        assert_eq!(next_offset(OffsetType::MAX as usize), OffsetType::MAX);
    }

    #[test]
    #[should_panic(expected = "arena exceeds")]
    fn test_next_offset_overflow_panics() {
        next_offset(OffsetType::MAX as usize + 1);
    }

    #[test]
    fn test_foreign_index_is_rejected() {
        let mut pool = RectanglePool::new();
        let mut other = RectanglePool::new();
        let idx = pool.insert(Rectangle::default());
        other.insert(Rectangle::default());
        other.arenal_id = pool.arenal_id.wrapping_add(1);
        assert_eq!(other.get(idx), None);
    }

    #[test]
    fn test_iter_skips_removed() {
        let mut pool = RectanglePool::new();
        let a = pool.insert(Rectangle::new(0.0, 0.0, 1.0, 1.0));
        let b = pool.insert(Rectangle::new(0.0, 0.0, 2.0, 2.0));
        let c = pool.insert(Rectangle::new(0.0, 0.0, 3.0, 3.0));
        pool.remove(b);
        let indices: Vec<_> = pool.iter().map(|(idx, _)| idx).collect();
        assert_eq!(indices, vec![a, c]);
        for rect in pool.iter_mut() {
            rect.scale_size_by(2.0);
        }
        let union = pool
            .iter()
            .fold(None, |acc: Option<Rectangle>, (_, rect)| {
                Some(rect.unite_with_rectangle(acc.as_ref()))
            })
            .unwrap();
        assert_eq!(union, Rectangle::new(0.0, 0.0, 6.0, 6.0));
    }

    #[test]
    #[should_panic(expected = "stale or foreign arena index")]
    fn test_index_stale_panics() {
        let mut pool = RectanglePool::new();
        let idx = pool.insert(Rectangle::default());
        pool.remove(idx);
        let _rect = pool[idx];
    }
}
