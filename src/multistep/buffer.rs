/// Fixed-capacity ring buffer of past steps, indexed from the oldest entry.
///
/// The buffer grows by appending until it reaches its capacity. From then on, [`rotate`] recycles
/// the oldest slot as the newest one so that the window slides without moving any entry.
///
/// [`rotate`]: LMBuffer::rotate
#[derive(Clone, Debug)]
pub struct LMBuffer<T> {
    head: usize,
    capacity: usize,
    data: Vec<T>,
}

impl<T> LMBuffer<T> {
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "buffer capacity must be positive");
        Self {
            head: 0,
            capacity,
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends `value` while the buffer is still filling up.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        assert!(!self.is_full(), "buffer is full");
        // The head stays at 0 until the buffer wraps around.
        self.data.push(value);
    }

    /// Evicts the oldest entry and returns its slot, now the newest entry, for overwriting.
    #[inline]
    pub fn rotate(&mut self) -> &mut T {
        assert!(self.is_full(), "buffer must be full to rotate");
        let slot = self.head;
        self.head = (self.head + 1) % self.capacity;
        &mut self.data[slot]
    }

    /// The `j`-th oldest entry.
    #[inline]
    pub fn get(&self, j: usize) -> &T {
        assert!(j < self.data.len(), "index out of bounds");
        &self.data[(self.head + j) % self.data.len()]
    }

    /// The `j`-th newest entry.
    #[inline]
    pub fn get_back(&self, j: usize) -> &T {
        assert!(j < self.data.len(), "index out of bounds");
        self.get(self.data.len() - 1 - j)
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        (!self.is_empty()).then(|| self.get(0))
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        (!self.is_empty()).then(|| self.get_back(0))
    }

    #[inline]
    pub fn iter(&self) -> LMBufferIter<'_, T> {
        LMBufferIter {
            buffer: self,
            front: 0,
            back: self.data.len(),
        }
    }
}

pub struct LMBufferIter<'a, T> {
    buffer: &'a LMBuffer<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for LMBufferIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let item = self.buffer.get(self.front);
            self.front += 1;
            Some(item)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for LMBufferIter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.buffer.get(self.back))
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for LMBufferIter<'_, T> {}
