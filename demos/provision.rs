//! Provisioner demo (the external collaborator)
//!
//! Creates and sizes the backing object before any tenant maps it, and
//! removes it afterwards. Usage:
//!
//!   provision [name] [pages]
//!   provision remove [name]

use rustix::fs::ftruncate;
use rustix::shm::{shm_open, shm_unlink, Mode, ShmOFlags};
use tenantmap::{DEFAULT_SHM_NAME, PAGE_STRIDE};

fn main() {
    let mut args = std::env::args().skip(1);
    let first = args.next();

    if first.as_deref() == Some("remove") {
        let name = args.next().unwrap_or_else(|| DEFAULT_SHM_NAME.to_string());
        match shm_unlink(name.as_str()) {
            Ok(()) => println!("[provision] Removed '{}'", name),
            Err(e) => {
                eprintln!("[provision] Failed to remove '{}': {}", name, e);
                std::process::exit(1);
            }
        }
        return;
    }

    let name = first.unwrap_or_else(|| DEFAULT_SHM_NAME.to_string());
    let pages: u64 = args
        .next()
        .map(|s| s.parse().expect("pages must be an integer"))
        .unwrap_or(16);

    let fd = match shm_open(
        name.as_str(),
        ShmOFlags::CREATE | ShmOFlags::EXCL | ShmOFlags::RDWR,
        Mode::RUSR | Mode::WUSR,
    ) {
        Ok(fd) => fd,
        Err(e) => {
            eprintln!("[provision] Failed to create '{}': {}", name, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = ftruncate(&fd, pages * PAGE_STRIDE) {
        eprintln!("[provision] Failed to size '{}': {}", name, e);
        let _ = shm_unlink(name.as_str());
        std::process::exit(1);
    }

    println!(
        "[provision] Created '{}' with {} page slots ({} bytes)",
        name,
        pages,
        pages * PAGE_STRIDE
    );
    println!("[provision] Remove it later with: provision remove {}", name);
}
