use std::{
    fmt::{self, Debug, Formatter},
    mem::MaybeUninit,
    ptr::addr_of_mut,
};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RingBufferError {
    #[error("index {index} is out of range for ring buffer of length {len}")]
    OutOfRange { index: usize, len: usize },
}

type Error = RingBufferError;
type Result<T> = std::result::Result<T, Error>;

/// A fixed-capacity FIFO queue that overwrites the oldest element when full.
///
/// `head` is the next slot to be written and `tail` the oldest occupied slot;
/// `head == tail` is disambiguated by the `full` flag. All index arithmetic
/// wraps modulo `N`, so every operation is O(1) and no reallocation ever
/// happens. Pushing into a full buffer silently evicts the oldest element,
/// which makes this suitable for rolling windows (telemetry, audio frames,
/// producer-overwrite logs) where the newest data always wins.
pub struct RingBuffer<T, const N: usize> {
    storage: [MaybeUninit<T>; N],
    head: usize,
    tail: usize,
    full: bool,
}

impl<T, const N: usize> RingBuffer<T, N> {
    const ASSERTS: () = {
        assert!(N >= 1, "\nCapacity (N) must be at least 1");
    };

    /// Creates an empty `RingBuffer<T, N>` inline (on the stack)
    ///
    /// ```
    /// use cbuf::RingBuffer;
    ///
    /// let rb = RingBuffer::<usize, 8>::new();
    ///
    /// assert!(rb.is_empty());
    /// assert_eq!(8, rb.capacity());
    /// ```
    pub fn new() -> Self {
        _ = Self::ASSERTS;

        Self {
            storage: [const { MaybeUninit::uninit() }; N],
            head: 0,
            tail: 0,
            full: false,
        }
    }

    /// Allocates an empty `RingBuffer<T, N>` directly on the heap
    ///
    /// The normal `Box::new(Self::new())` syntax may end up doing memcpy's
    /// of the whole storage array, which can overflow the stack if N is
    /// large, so we initialize the fields through an uninitialized box.
    ///
    /// ```
    /// use cbuf::RingBuffer;
    ///
    /// let rb = RingBuffer::<usize, 256>::new_heap();
    ///
    /// assert!(rb.is_empty());
    /// ```
    pub fn new_heap() -> Box<Self> {
        _ = Self::ASSERTS;

        let mut data: Box<MaybeUninit<Self>> = Box::new_uninit();
        unsafe {
            let slot = data.as_mut_ptr();
            addr_of_mut!((*slot).head).write(0);
            addr_of_mut!((*slot).tail).write(0);
            addr_of_mut!((*slot).full).write(false);
            data.assume_init()
        }
    }

    /// Pushes `value`, evicting the oldest element if the buffer is full
    ///
    /// Eviction is the defining policy, not an error: the push never fails
    /// and never blocks, the evicted value is dropped silently.
    ///
    /// ```
    /// use cbuf::RingBuffer;
    ///
    /// let mut rb = RingBuffer::<usize, 2>::new();
    /// rb.push(1);
    /// rb.push(2);
    /// rb.push(3); // evicts 1
    ///
    /// assert_eq!(Some(&2), rb.front());
    /// ```
    pub fn push(&mut self, value: T) {
        if self.full {
            // head == tail here, so the slot being written holds the oldest
            // element; it must be dropped before the overwrite.
            unsafe { self.storage[self.head].assume_init_drop() };
            self.tail = (self.tail + 1) % N;
        }

        self.storage[self.head].write(value);
        self.head = (self.head + 1) % N;
        self.full = self.head == self.tail;
    }

    /// Removes and returns the oldest element, or `None` if empty
    ///
    /// ```
    /// use cbuf::RingBuffer;
    ///
    /// let mut rb = RingBuffer::<usize, 8>::new();
    /// rb.push(1337);
    ///
    /// assert_eq!(Some(1337), rb.pop());
    /// assert_eq!(None, rb.pop());
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = unsafe { self.storage[self.tail].assume_init_read() };
        self.full = false;
        self.tail = (self.tail + 1) % N;

        Some(value)
    }

    /// Returns a reference to the element at `index`, counted from the oldest
    ///
    /// Can return either of
    /// * `Err(RingBufferError::OutOfRange)`
    /// * `Ok(&T)`
    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.len();
        if index >= len {
            return Err(Error::OutOfRange { index, len });
        }

        Ok(unsafe { self.storage[(self.tail + index) % N].assume_init_ref() })
    }

    /// Returns a reference to the oldest element, if any
    pub fn front(&self) -> Option<&T> {
        self.get(0).ok()
    }

    /// Returns a reference to the newest element, if any
    pub fn back(&self) -> Option<&T> {
        match self.len() {
            0 => None,
            len => self.get(len - 1).ok(),
        }
    }

    /// Returns the number of occupied slots, always in `0..=N`
    pub fn len(&self) -> usize {
        if self.full {
            N
        } else if self.head >= self.tail {
            self.head - self.tail
        } else {
            N + self.head - self.tail
        }
    }

    /// Returns the fixed capacity `N`
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        N
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        !self.full && self.head == self.tail
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Iterates over the occupied elements, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len()).map(move |i| unsafe { self.storage[(self.tail + i) % N].assume_init_ref() })
    }

    /// Drops all occupied elements and resets the buffer to empty
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }
}

impl<T, const N: usize> Drop for RingBuffer<T, N> {
    fn drop(&mut self) {
        let mut index = self.tail;
        for _ in 0..self.len() {
            unsafe { self.storage[index].assume_init_drop() };
            index = (index + 1) % N;
        }
    }
}

impl<T: Debug, const N: usize> Debug for RingBuffer<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("elements", &self.iter().collect::<Vec<_>>())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("full", &self.full)
            .finish()
    }
}
