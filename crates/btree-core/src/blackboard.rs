use std::any::Any;
use std::collections::BTreeMap;
use std::marker::PhantomData;

use crate::BlackboardError;

/// Typed key into a [`Blackboard`].
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    id: u64,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    pub fn id(self) -> u64 {
        self.id
    }
}

/// Shared memory of a tree: every task reads and writes it during a tick.
///
/// Values are keyed by id; ordering is deterministic. Reading a key with a type other
/// than the one stored under it is reported as [`BlackboardError::TypeMismatch`].
#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<u64, Box<dyn Any>>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.values.contains_key(&key.id)
    }

    pub fn set<T: 'static>(&mut self, key: BbKey<T>, value: T) {
        self.values.insert(key.id, Box::new(value));
    }

    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Result<Option<&T>, BlackboardError> {
        match self.values.get(&key.id) {
            None => Ok(None),
            Some(value) => value
                .downcast_ref::<T>()
                .map(Some)
                .ok_or(BlackboardError::TypeMismatch { id: key.id }),
        }
    }

    pub fn get_mut<T: 'static>(
        &mut self,
        key: BbKey<T>,
    ) -> Result<Option<&mut T>, BlackboardError> {
        match self.values.get_mut(&key.id) {
            None => Ok(None),
            Some(value) => value
                .downcast_mut::<T>()
                .map(Some)
                .ok_or(BlackboardError::TypeMismatch { id: key.id }),
        }
    }

    /// Get the value under `key`, inserting `make()` first when the key is absent.
    pub fn get_or_insert_with<T: 'static>(
        &mut self,
        key: BbKey<T>,
        make: impl FnOnce() -> T,
    ) -> Result<&mut T, BlackboardError> {
        self.values
            .entry(key.id)
            .or_insert_with(|| Box::new(make()))
            .downcast_mut::<T>()
            .ok_or(BlackboardError::TypeMismatch { id: key.id })
    }

    /// Remove the value under `key`. A value of the wrong type is left in place.
    pub fn remove<T: 'static>(&mut self, key: BbKey<T>) -> Result<Option<T>, BlackboardError> {
        match self.values.get(&key.id) {
            None => return Ok(None),
            Some(value) if !value.is::<T>() => {
                return Err(BlackboardError::TypeMismatch { id: key.id })
            }
            Some(_) => {}
        }

        Ok(self
            .values
            .remove(&key.id)
            .and_then(|value| value.downcast::<T>().ok())
            .map(|boxed| *boxed))
    }
}
