//! Mapped region handles
//!
//! `MappedRegion` is the raw handle returned by the mapper. It carries no
//! cleanup of its own: the mapper never unmaps, and region lifetime belongs
//! to the caller. Callers that want RAII semantics wrap the handle in a
//! `ScopedRegion`, which unmaps on drop.

use rustix::mm::munmap;
use std::ptr::NonNull;

/// A shared, read-write memory mapping over one tenant slot
///
/// Writes through this region are visible to every other mapping of the
/// same backing object at the same offset, and persist to the object.
/// Dropping the handle does NOT unmap the region.
pub struct MappedRegion {
    addr: NonNull<u8>,
    len: usize,
}

// SAFETY: the handle is a pointer + length pair over MAP_SHARED memory.
// The memory itself is shared across processes already; all dereferencing
// goes through unsafe accessors where the caller upholds synchronization.
unsafe impl Send for MappedRegion {}
unsafe impl Sync for MappedRegion {}

impl MappedRegion {
    pub(crate) fn new(addr: NonNull<u8>, len: usize) -> Self {
        Self { addr, len }
    }

    /// Get raw pointer to the start of the region
    #[inline(always)]
    pub fn as_ptr(&self) -> *mut u8 {
        self.addr.as_ptr()
    }

    /// Size of the region in bytes
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// View the region as a byte slice
    ///
    /// # Safety
    /// Other mappers of the same slot may write concurrently; the caller
    /// must ensure no conflicting writes happen while the slice is live.
    #[inline]
    pub unsafe fn as_slice(&self) -> &[u8] {
        std::slice::from_raw_parts(self.addr.as_ptr(), self.len)
    }

    /// View the region as a mutable byte slice
    ///
    /// # Safety
    /// Same aliasing rules as [`as_slice`](Self::as_slice), plus the caller
    /// must be the only writer for the duration of the borrow.
    #[inline]
    pub unsafe fn as_mut_slice(&mut self) -> &mut [u8] {
        std::slice::from_raw_parts_mut(self.addr.as_ptr(), self.len)
    }
}

/// Call-site guard that unmaps a region when it goes out of scope
///
/// The mapper stays stateless and never cleans up after itself; a caller
/// that wants bounded lifetime wraps the returned region here instead.
pub struct ScopedRegion {
    region: MappedRegion,
}

impl ScopedRegion {
    pub fn new(region: MappedRegion) -> Self {
        Self { region }
    }

    /// Access the wrapped region
    #[inline(always)]
    pub fn region(&self) -> &MappedRegion {
        &self.region
    }

    /// Get raw pointer to the start of the region
    #[inline(always)]
    pub fn as_ptr(&self) -> *mut u8 {
        self.region.as_ptr()
    }

    /// Size of the region in bytes
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.region.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }
}

impl Drop for ScopedRegion {
    fn drop(&mut self) {
        unsafe {
            let _ = munmap(self.region.as_ptr().cast(), self.region.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{TenantMapper, PAGE_STRIDE};
    use rustix::fs::ftruncate;
    use rustix::shm::{shm_open, shm_unlink, Mode, ShmOFlags};

    struct Backing {
        name: String,
    }

    impl Backing {
        fn new(tag: &str, pages: u64) -> Self {
            let name = format!("tenantmap_region_{}_{}", tag, std::process::id());
            let _ = shm_unlink(name.as_str());
            let fd = shm_open(
                name.as_str(),
                ShmOFlags::CREATE | ShmOFlags::EXCL | ShmOFlags::RDWR,
                Mode::RUSR | Mode::WUSR,
            )
            .unwrap();
            ftruncate(&fd, pages * PAGE_STRIDE).unwrap();
            Self { name }
        }
    }

    impl Drop for Backing {
        fn drop(&mut self) {
            let _ = shm_unlink(self.name.as_str());
        }
    }

    #[test]
    fn scoped_region_forwards_accessors() {
        let backing = Backing::new("scoped", 1);
        let mapper = TenantMapper::new(&backing.name);

        let region = mapper.allocate(0, PAGE_STRIDE as usize).unwrap();
        let ptr = region.as_ptr();

        let scoped = ScopedRegion::new(region);
        assert_eq!(scoped.as_ptr(), ptr);
        assert_eq!(scoped.len(), PAGE_STRIDE as usize);
        assert!(!scoped.is_empty());

        unsafe {
            std::ptr::write(scoped.as_ptr(), 0xA5u8);
            assert_eq!(std::ptr::read(scoped.as_ptr()), 0xA5u8);
        }
    }

    #[test]
    fn scoped_drop_leaves_backing_intact() {
        let backing = Backing::new("drop", 1);
        let mapper = TenantMapper::new(&backing.name);

        {
            let scoped = ScopedRegion::new(mapper.allocate(0, PAGE_STRIDE as usize).unwrap());
            unsafe { std::ptr::write(scoped.as_ptr(), 7u8) };
        }

        // The guard unmapped its view; the backing object and its contents
        // are untouched.
        let again = ScopedRegion::new(mapper.allocate(0, PAGE_STRIDE as usize).unwrap());
        assert_eq!(unsafe { std::ptr::read(again.as_ptr()) }, 7u8);
    }
}
