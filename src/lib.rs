/// Use mimalloc as the global allocator for all binaries.
/// Encoding allocates one String per output line, which favors a fast
/// small-object allocator.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod base64;
pub mod common;
