//! Tenant demo (a mapper client)
//!
//! Maps one page for the given tenant id and does a write/read round trip
//! through the shared region. Run `provision` first. Usage:
//!
//!   tenant [tenant_id] [name]

use tenantmap::{tenant_offset, ScopedRegion, TenantMapper, DEFAULT_SHM_NAME, PAGE_STRIDE};

fn main() {
    let mut args = std::env::args().skip(1);
    let tenant_id: u32 = args
        .next()
        .map(|s| s.parse().expect("tenant_id must be an integer"))
        .unwrap_or(0);
    let name = args.next().unwrap_or_else(|| DEFAULT_SHM_NAME.to_string());

    let mapper = TenantMapper::new(&name);
    println!(
        "[tenant {}] Mapping one page of '{}' at offset {}",
        tenant_id,
        name,
        tenant_offset(tenant_id)
    );

    let region = match mapper.allocate(tenant_id, PAGE_STRIDE as usize) {
        Ok(r) => ScopedRegion::new(r),
        Err(e) => {
            eprintln!("[tenant {}] Allocation failed: {}", tenant_id, e);
            std::process::exit(1);
        }
    };

    let marker = tenant_id as u8;
    unsafe {
        std::ptr::write(region.as_ptr(), marker);
        std::ptr::write(region.as_ptr().add(region.len() - 1), marker);

        let first = std::ptr::read(region.as_ptr());
        let last = std::ptr::read(region.as_ptr().add(region.len() - 1));
        println!(
            "[tenant {}] Wrote marker 0x{:02X}, read back first=0x{:02X} last=0x{:02X}",
            tenant_id, marker, first, last
        );
    }

    println!(
        "[tenant {}] Other mappers of this slot will observe the marker",
        tenant_id
    );
}
