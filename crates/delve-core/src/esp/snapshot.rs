use std::sync::{Arc, Mutex, PoisonError, TryLockError};

use super::EspObject;

/// Immutable list of classified entities from one scan
pub type Snapshot = Arc<[EspObject]>;

/// Latest published snapshot, shared between the scan loop and the draw
/// callback.
///
/// The lock is only held to swap or clone the `Arc`, so a reader always sees
/// one complete list.
#[derive(Debug)]
pub struct SnapshotBuffer {
    current: Mutex<Snapshot>,
}

impl SnapshotBuffer {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(Arc::from(Vec::new())),
        }
    }

    /// Replace the current snapshot
    pub fn publish(&self, objects: Vec<EspObject>) {
        let snapshot: Snapshot = Arc::from(objects);
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    pub fn clear(&self) {
        self.publish(Vec::new());
    }

    /// Current snapshot without blocking; `None` when the writer holds the lock
    pub fn try_read(&self) -> Option<Snapshot> {
        match self.current.try_lock() {
            Ok(guard) => Some(Arc::clone(&guard)),
            Err(TryLockError::Poisoned(poisoned)) => Some(Arc::clone(&poisoned.into_inner())),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    pub fn read(&self) -> Snapshot {
        Arc::clone(&self.current.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Default for SnapshotBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::esp::EspType;
    use crate::geometry::Vec3;
    use crate::host::{GameEntity, ObjectKind};
    use std::thread;

    fn objects(count: u32) -> Vec<EspObject> {
        (0..count)
            .map(|i| {
                let entity = GameEntity {
                    object_id: 0x4000_0000 + i,
                    kind: ObjectKind::EventObj,
                    ..GameEntity::default()
                };
                EspObject::new(entity, EspType::Trap, Vec3::default(), None)
            })
            .collect()
    }

    #[test]
    fn test_publish_and_clear() {
        let buffer = SnapshotBuffer::new();
        assert!(buffer.read().is_empty());

        buffer.publish(objects(3));
        assert_eq!(buffer.try_read().unwrap().len(), 3);

        buffer.clear();
        assert!(buffer.read().is_empty());
    }

    #[test]
    fn test_reader_keeps_old_snapshot() {
        let buffer = SnapshotBuffer::new();
        buffer.publish(objects(2));
        let held = buffer.read();

        buffer.publish(objects(5));
        assert_eq!(held.len(), 2);
        assert_eq!(buffer.read().len(), 5);
    }

    #[test]
    fn test_try_read_skips_on_contention() {
        let buffer = SnapshotBuffer::new();
        let guard = buffer.current.lock().unwrap();
        assert!(buffer.try_read().is_none());
        drop(guard);
        assert!(buffer.try_read().is_some());
    }

    #[test]
    fn test_concurrent_reads_see_complete_lists() {
        let buffer = Arc::new(SnapshotBuffer::new());
        let sizes = [1u32, 4, 9];

        let writer = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || {
                for _ in 0..200 {
                    for size in sizes {
                        buffer.publish(objects(size));
                    }
                }
            })
        };

        for _ in 0..1000 {
            if let Some(snapshot) = buffer.try_read() {
                let len = snapshot.len() as u32;
                assert!(len == 0 || sizes.contains(&len));
            }
        }
        writer.join().unwrap();
    }
}
