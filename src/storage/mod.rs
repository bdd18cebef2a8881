//! Raw element buffers shared between an owning array and its views.

use core::{mem::ManuallyDrop, ptr::NonNull};
use std::rc::Rc;

/// A heap allocation addressed only through raw pointers.
///
/// No reference to an element is ever created, so any number of arrays may
/// read and write through pointers into the same buffer.
#[derive(Debug)]
pub struct Buffer<T> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
}

impl<T> Buffer<T> {
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    pub fn as_non_null(&self) -> NonNull<T> {
        self.ptr
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `ptr` points into this allocation (or one past its end).
    pub fn contains(&self, ptr: *const T) -> bool {
        let start = self.ptr.as_ptr() as *const T;
        let end = start.wrapping_add(self.len);
        start <= ptr && ptr <= end
    }
}

impl<T> From<Vec<T>> for Buffer<T> {
    fn from(data: Vec<T>) -> Self {
        let mut data = ManuallyDrop::new(data);
        let len = data.len();
        let cap = data.capacity();
        // SAFETY: `Vec::as_mut_ptr` is never null, dangling only when the
        // capacity is zero.
        let ptr = unsafe { NonNull::new_unchecked(data.as_mut_ptr()) };
        Self { ptr, len, cap }
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        // SAFETY: the parts come from a `Vec` that was never freed.
        unsafe { drop(Vec::from_raw_parts(self.ptr.as_ptr(), self.len, self.cap)) };
    }
}

/// Keep-alive handle to a buffer. The allocation is released when the last
/// handle is dropped.
pub type SharedBuffer<T> = Rc<Buffer<T>>;

pub fn share<T>(data: Vec<T>) -> SharedBuffer<T> {
    Rc::new(Buffer::from(data))
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{share, Buffer};

    #[test]
    fn wrap_vec() {
        let data = vec![1_u32, 2, 3];
        let ptr = data.as_ptr();
        let buf = Buffer::from(data);

        assert_eq!(buf.as_ptr() as *const u32, ptr);
        assert_eq!(buf.len(), 3);
        assert!(buf.contains(ptr));
        assert!(buf.contains(ptr.wrapping_add(3)));
        assert!(!buf.contains(ptr.wrapping_add(4)));
    }

    #[test]
    fn release_after_last_handle() {
        let buf = share(vec![0_u8; 4]);
        let other = Rc::clone(&buf);

        assert_eq!(Rc::strong_count(&buf), 2);
        drop(buf);
        assert_eq!(Rc::strong_count(&other), 1);
        assert_eq!(other.len(), 4);
    }

    #[test]
    fn empty_buffer() {
        let buf = Buffer::<f64>::from(Vec::new());

        assert!(buf.is_empty());
    }
}
