//! The tenant region mapper
//!
//! Translates a (tenant id, size) pair into a shared, page-offset memory
//! mapping over a named POSIX shared-memory object. The mapper holds no
//! state beyond the backing-object name: every `allocate` call opens the
//! object and establishes a fresh mapping, nothing is cached, and nothing
//! is ever unmapped here.

use crate::error::{MapperError, Result};
use crate::region::MappedRegion;
use rustix::io::Errno;
use rustix::mm::{mmap, MapFlags, ProtFlags};
use rustix::shm::{shm_open, Mode, ShmOFlags};
use std::ptr::NonNull;

/// Name of the backing object when none is injected
pub const DEFAULT_SHM_NAME: &str = "shm";

/// Bytes per tenant slot: one page
pub const PAGE_STRIDE: u64 = 4096;

/// Byte offset of a tenant's slot inside the backing object
///
/// The rule is `tenant_id * PAGE_STRIDE`, with one carve-out: tenant 10 is
/// hard-mapped to page 2. The carve-out is an observable contract and must
/// not be generalized away.
#[inline]
pub fn tenant_offset(tenant_id: u32) -> u64 {
    if tenant_id == 10 {
        2 * PAGE_STRIDE
    } else {
        u64::from(tenant_id) * PAGE_STRIDE
    }
}

/// Maps tenant regions out of one named shared-memory object
///
/// The backing object is externally owned: a collaborator creates and
/// sizes it before any `allocate` call, and decides how many page slots
/// to reserve (the reserved range must cover every tenant offset in use,
/// including tenant 10 at page 2).
pub struct TenantMapper {
    name: String,
}

impl TenantMapper {
    /// Create a mapper over the named backing object
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name of the backing object this mapper opens
    #[inline(always)]
    pub fn backing_name(&self) -> &str {
        &self.name
    }

    /// Map `size` bytes of the backing object at the tenant's slot offset
    ///
    /// Opens the backing object read-write (it must already exist; nothing
    /// is created here), then establishes a `MAP_SHARED` read-write mapping
    /// at [`tenant_offset`]. Concurrent mappings of the same slot alias the
    /// same bytes and observe each other's writes.
    ///
    /// `size` is not validated: a zero size, or a size/offset pair beyond
    /// the object's extent, surfaces as whatever the platform reports.
    pub fn allocate(&self, tenant_id: u32, size: usize) -> Result<MappedRegion> {
        let fd = shm_open(
            self.name.as_str(),
            ShmOFlags::RDWR,
            Mode::RUSR | Mode::WUSR,
        )
        .map_err(|e| match e {
            Errno::NOENT => MapperError::NotFound {
                name: self.name.clone(),
            },
            Errno::ACCESS => MapperError::PermissionDenied {
                name: self.name.clone(),
            },
            _ => MapperError::Open {
                name: self.name.clone(),
                source: e.into(),
            },
        })?;

        let offset = tenant_offset(tenant_id);

        let addr = unsafe {
            mmap(
                std::ptr::null_mut(),
                size,
                ProtFlags::READ | ProtFlags::WRITE,
                MapFlags::SHARED,
                &fd,
                offset,
            )
            .map_err(|e| MapperError::MapFailed {
                size,
                offset,
                source: e.into(),
            })?
        };

        // The mapping stays valid after the descriptor closes, so `fd`
        // dropping at end of scope does not affect the region.
        let addr = NonNull::new(addr.cast::<u8>()).expect("mmap returned null");

        Ok(MappedRegion::new(addr, size))
    }
}

impl Default for TenantMapper {
    fn default() -> Self {
        Self::new(DEFAULT_SHM_NAME)
    }
}
