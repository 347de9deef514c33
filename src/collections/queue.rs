//! A resizing ring-buffer queue.

use log::trace;

/// A FIFO queue stored in a ring buffer.
///
/// The buffer doubles when full and halves when it drops to a quarter full,
/// so both operations are amortized `O(1)` and memory stays proportional to the length.
#[derive(Clone)]
pub struct Queue<T> {
    /// Slots `head, head + 1, ..., head + len - 1` (mod the buffer length) are occupied.
    buf: Vec<Option<T>>,
    head: usize,
    len: usize,
}

const MIN_CAPACITY: usize = 4;

impl<T> Queue<T> {
    pub fn new() -> Self {
        Queue {
            buf: Self::empty_buffer(MIN_CAPACITY),
            head: 0,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds `value` at the back of the queue.
    pub fn enqueue(&mut self, value: T) {
        if self.len == self.buf.len() {
            self.resize(2 * self.buf.len());
        }
        let tail = (self.head + self.len) % self.buf.len();
        self.buf[tail] = Some(value);
        self.len += 1;
    }

    /// Removes the value at the front of the queue.
    pub fn dequeue(&mut self) -> Option<T> {
        let value = self.buf[self.head].take()?;
        self.head = (self.head + 1) % self.buf.len();
        self.len -= 1;
        if self.len > 0 && self.len == self.buf.len() / 4 && self.buf.len() / 2 >= MIN_CAPACITY {
            self.resize(self.buf.len() / 2);
        }
        Some(value)
    }

    /// The value at the front of the queue.
    pub fn peek(&self) -> Option<&T> {
        self.buf[self.head].as_ref()
    }

    /// Iterates from the front of the queue to the back.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |k| self.buf[(self.head + k) % self.buf.len()].as_ref())
    }

    fn empty_buffer(capacity: usize) -> Vec<Option<T>> {
        std::iter::repeat_with(|| None).take(capacity).collect()
    }

    fn resize(&mut self, capacity: usize) {
        trace!("resizing queue buffer from {} to {}", self.buf.len(), capacity);
        let mut buf = Self::empty_buffer(capacity);
        let old_len = self.buf.len();
        for (k, slot) in buf.iter_mut().enumerate().take(self.len) {
            *slot = self.buf[(self.head + k) % old_len].take();
        }
        self.buf = buf;
        self.head = 0;
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut res = Self::new();
        res.extend(iter);
        res
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.enqueue(value);
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
