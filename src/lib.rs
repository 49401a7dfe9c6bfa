//! tenantmap - page-strided multi-tenant shared memory regions
//!
//! Maps fixed page-aligned slices of one named POSIX shared-memory object
//! to logical tenants: tenant `n` owns the 4096-byte slot at offset
//! `n * 4096` (tenant 10 is hard-mapped to page 2).
//!
//! # Contract
//!
//! - The backing object is created and sized by an external collaborator
//!   before any allocation; the mapper only opens it.
//! - Mappings are `MAP_SHARED`: every mapper of the same slot sees the
//!   same bytes, with no isolation beyond offset partitioning.
//! - The mapper never unmaps. Callers wanting bounded lifetime wrap
//!   regions in [`ScopedRegion`].

pub mod error;
pub mod mapper;
pub mod region;

pub use error::{MapperError, Result};
pub use mapper::{tenant_offset, TenantMapper, DEFAULT_SHM_NAME, PAGE_STRIDE};
pub use region::{MappedRegion, ScopedRegion};
