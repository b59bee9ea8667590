//! Orders `Arc`s by the identity of the value they point to.
//!
//! Values are mostly told apart by a hash of their address. When two hashes
//! collide, the values are ordered by ids handed out the first time each value
//! is seen in a collision. Ids are kept in a process-wide table which only
//! holds weak handles, so it never keeps a value alive. The weak handle does
//! keep the allocation, which means that an address in the table can't be
//! reused by another value until its entry has been swept.

use std::{
    any::Any,
    cmp,
    collections::HashMap,
    sync::{
        Arc, LazyLock, Weak,
        atomic::{self, AtomicU64},
    },
};

use parking_lot::Mutex;
use tracing::{debug, error};

use super::{Ordering, Variant};

// Dead entries are only swept once the table has at least this many entries.
const MIN_SWEEP: usize = 64;

static IDS: LazyLock<IdTable> = LazyLock::new(IdTable::default);

impl<U> Ordering<Arc<U>>
where
    U: Send + Sync + 'static,
{
    /// An ordering of `Arc`s by the identity of what they point to, rather
    /// than by value.
    ///
    /// Two `Arc`s are equivalent only if they point to the same allocation,
    /// i.e. they are clones of each other. The order is the same every time
    /// two values are compared, but it is only meaningful within one run of
    /// the process.
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use ordering::prelude::*;
    ///
    /// let ordering = Ordering::arbitrary();
    /// let a = Arc::new("same");
    /// let b = Arc::new("same");
    /// assert!(ordering.compare(&a, &b).unwrap().is_ne());
    /// assert!(ordering.compare(&a, &a.clone()).unwrap().is_eq());
    /// ```
    pub fn arbitrary() -> Self {
        Self::new(Variant::Arbitrary(compare::<U>))
    }
}

fn compare<U: Send + Sync + 'static>(a: &Arc<U>, b: &Arc<U>) -> cmp::Ordering {
    IDS.compare(a, b, identity_hash)
}

fn address<U>(value: &Arc<U>) -> usize {
    Arc::as_ptr(value) as usize
}

// Fibonacci hashing of the address, keeping the high half.
fn identity_hash(address: usize) -> u32 {
    ((address as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 32) as u32
}

struct Entry {
    handle: Weak<dyn Any + Send + Sync>,
    id: u64,
}

struct Entries {
    by_address: HashMap<usize, Entry>,
    // Size of the table when the next sweep is due.
    sweep_at: usize,
}

impl Default for Entries {
    fn default() -> Self {
        Entries { by_address: HashMap::new(), sweep_at: MIN_SWEEP }
    }
}

impl Entries {
    fn sweep_if_due(&mut self) {
        if self.by_address.len() < self.sweep_at {
            return;
        }
        let before = self.by_address.len();
        self.by_address.retain(|_, entry| entry.handle.strong_count() > 0);
        let after = self.by_address.len();
        self.sweep_at = (2 * after).max(MIN_SWEEP);
        debug!(before, after, "swept dead entries from the arbitrary ordering's id table");
    }
}

#[derive(Default)]
struct IdTable {
    entries: Mutex<Entries>,
    next_id: AtomicU64,
}

impl IdTable {
    fn compare<U, H>(&self, a: &Arc<U>, b: &Arc<U>, hash: H) -> cmp::Ordering
    where
        U: Send + Sync + 'static,
        H: Fn(usize) -> u32,
    {
        if Arc::ptr_eq(a, b) {
            return cmp::Ordering::Equal;
        }
        let (address_a, address_b) = (address(a), address(b));
        let result = hash(address_a).cmp(&hash(address_b));
        if result.is_ne() {
            return result;
        }

        let (id_a, id_b) = (self.id(a), self.id(b));
        if id_a == id_b {
            error!(address_a, address_b, id = id_a, "two live values were given the same id");
            panic!("arbitrary ordering found two distinct values with the same id {id_a}");
        }
        id_a.cmp(&id_b)
    }

    /// The id of `value`. Assigns a new id the first time `value` is seen.
    fn id<U: Send + Sync + 'static>(&self, value: &Arc<U>) -> u64 {
        let address = address(value);
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.by_address.get(&address) {
            return entry.id;
        }
        let id = self.next_id.fetch_add(1, atomic::Ordering::Relaxed);
        let handle: Weak<U> = Arc::downgrade(value);
        let handle: Weak<dyn Any + Send + Sync> = handle;
        entries.by_address.insert(address, Entry { handle, id });
        entries.sweep_if_due();
        id
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().by_address.len()
    }
}
