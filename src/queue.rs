//! Indexed binary-heap priority queue.
//!
//! An array-backed heap over [`Task`] records, augmented with an
//! id→position map so the priority of an arbitrary element — not just the
//! root — can be changed in O(log n). Without the map, locating a non-root
//! task would cost an O(n) scan before any repair could start.
//!
//! The comparison direction (max-first or min-first) is fixed once at
//! construction; the queue orders purely on `Task::priority` and never
//! interprets scheduling policy.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 6.5
//! (Priority Queues)

use std::collections::HashMap;
use std::str::FromStr;

use crate::models::Task;

/// Comparison direction of a queue instance, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapMode {
    /// The best element is the one with the highest priority.
    MaxFirst,
    /// The best element is the one with the lowest priority.
    MinFirst,
}

impl HeapMode {
    /// Canonical string form, round-trips through [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxFirst => "max-first",
            Self::MinFirst => "min-first",
        }
    }
}

impl FromStr for HeapMode {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max-first" => Ok(Self::MaxFirst),
            "min-first" => Ok(Self::MinFirst),
            other => Err(QueueError::InvalidMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for HeapMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by queue operations.
///
/// Every error is a contract violation detected before any structural
/// mutation: a failed operation leaves the queue unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// An insert supplied an id that is already present.
    DuplicateId(String),
    /// An update referenced an id that is not present.
    NotFound(String),
    /// An extract was attempted on an empty queue.
    Empty,
    /// A mode string did not name a known comparison direction.
    InvalidMode(String),
}

impl std::fmt::Display for QueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "task '{id}' is already present in the queue"),
            Self::NotFound(id) => write!(f, "task '{id}' not found in the queue"),
            Self::Empty => write!(f, "extract from an empty queue"),
            Self::InvalidMode(s) => {
                write!(f, "unknown heap mode '{s}' (expected 'max-first' or 'min-first')")
            }
        }
    }
}

impl std::error::Error for QueueError {}

/// Array-backed binary heap with O(log n) keyed priority updates.
///
/// `storage` is interpreted as a complete binary tree: the element at
/// index `i` has children at `2i+1` and `2i+2` and its parent at
/// `(i-1)/2`. `position` maps each live task id to its current index and
/// is kept exactly in sync with `storage` after every mutation — all
/// structural movement routes through [`IndexedHeap::swap`], which is the
/// only code that relocates elements between occupied slots.
///
/// # Example
///
/// ```
/// use u_dispatch::models::Task;
/// use u_dispatch::queue::{HeapMode, IndexedHeap};
///
/// let mut queue = IndexedHeap::new(HeapMode::MaxFirst);
/// queue.insert(Task::new("A").with_priority(3)).unwrap();
/// queue.insert(Task::new("B").with_priority(1)).unwrap();
/// queue.update_priority("B", 10).unwrap();
/// assert_eq!(queue.extract_best().unwrap().id, "B");
/// ```
#[derive(Debug, Clone)]
pub struct IndexedHeap {
    mode: HeapMode,
    storage: Vec<Task>,
    position: HashMap<String, usize>,
}

impl IndexedHeap {
    /// Creates an empty queue with the given comparison direction.
    pub fn new(mode: HeapMode) -> Self {
        Self {
            mode,
            storage: Vec::new(),
            position: HashMap::new(),
        }
    }

    /// Creates an empty queue with pre-allocated capacity.
    pub fn with_capacity(mode: HeapMode, capacity: usize) -> Self {
        Self {
            mode,
            storage: Vec::with_capacity(capacity),
            position: HashMap::with_capacity(capacity),
        }
    }

    /// The comparison direction this queue was constructed with.
    pub fn mode(&self) -> HeapMode {
        self.mode
    }

    /// Number of tasks currently queued.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the queue holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Whether a task with the given id is currently queued.
    pub fn contains(&self, task_id: &str) -> bool {
        self.position.contains_key(task_id)
    }

    /// Returns the best task without removing it, or `None` when empty.
    pub fn peek(&self) -> Option<&Task> {
        self.storage.first()
    }

    /// Inserts a task. O(log n).
    ///
    /// # Errors
    /// [`QueueError::DuplicateId`] if a task with the same id is already
    /// queued. The duplicate check runs before anything is appended.
    pub fn insert(&mut self, task: Task) -> Result<(), QueueError> {
        if self.position.contains_key(&task.id) {
            return Err(QueueError::DuplicateId(task.id));
        }
        let idx = self.storage.len();
        self.position.insert(task.id.clone(), idx);
        self.storage.push(task);
        self.sift_up(idx);
        Ok(())
    }

    /// Removes and returns the best task. O(log n).
    ///
    /// The root is swapped with the last element, the old root popped off
    /// the tail, and the moved element sifted back down from the root.
    ///
    /// # Errors
    /// [`QueueError::Empty`] if the queue holds no tasks.
    pub fn extract_best(&mut self) -> Result<Task, QueueError> {
        if self.storage.is_empty() {
            return Err(QueueError::Empty);
        }
        let last = self.storage.len() - 1;
        self.swap(0, last);
        let top = self.storage.swap_remove(last);
        self.position.remove(&top.id);
        if !self.storage.is_empty() {
            self.sift_down(0);
        }
        Ok(top)
    }

    /// Rewrites the priority of the task with the given id and repairs the
    /// heap locally. O(log n) after an O(1) position lookup.
    ///
    /// The repair direction is decided by an actual standing check against
    /// the element's parent after the write, not by any caller-supplied
    /// increase/decrease hint: if the element now beats its parent it sifts
    /// up, otherwise it sifts down. A "raise" that does not improve the
    /// element's standing is therefore still resolved correctly.
    ///
    /// # Errors
    /// [`QueueError::NotFound`] if no task with the id is queued.
    pub fn update_priority(&mut self, task_id: &str, new_priority: i64) -> Result<(), QueueError> {
        let idx = match self.position.get(task_id) {
            Some(&i) => i,
            None => return Err(QueueError::NotFound(task_id.to_string())),
        };
        self.storage[idx].priority = new_priority;
        if idx > 0 && self.beats(idx, Self::parent(idx)) {
            self.sift_up(idx);
        } else {
            self.sift_down(idx);
        }
        Ok(())
    }

    fn parent(idx: usize) -> usize {
        (idx - 1) / 2
    }

    /// Whether the element at `i` outranks the element at `j` under the
    /// configured mode. Equal priorities never outrank each other, so the
    /// relative order of ties is unspecified.
    fn beats(&self, i: usize, j: usize) -> bool {
        let a = self.storage[i].priority;
        let b = self.storage[j].priority;
        match self.mode {
            HeapMode::MaxFirst => a > b,
            HeapMode::MinFirst => a < b,
        }
    }

    /// Exchanges two slots and rewrites both position entries. Every
    /// structural move goes through here so `storage` and `position`
    /// cannot drift.
    fn swap(&mut self, i: usize, j: usize) {
        self.storage.swap(i, j);
        self.position.insert(self.storage[i].id.clone(), i);
        self.position.insert(self.storage[j].id.clone(), j);
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = Self::parent(idx);
            if self.beats(idx, parent) {
                self.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let n = self.storage.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut best = idx;
            if left < n && self.beats(left, best) {
                best = left;
            }
            if right < n && self.beats(right, best) {
                best = right;
            }
            if best == idx {
                break;
            }
            self.swap(idx, best);
            idx = best;
        }
    }
}
