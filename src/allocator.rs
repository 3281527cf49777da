use alloc::vec::Vec;

/// Source of pixel and palette buffers for new surfaces.
///
/// Boards with DMA-capable or external RAM route surface memory through
/// their own implementation; everything else uses [`Global`].
pub trait SurfaceAllocator {
    /// Return a zero-filled buffer of exactly `len` bytes, or `None` if the
    /// memory is not available.
    fn allocate(&self, len: usize) -> Option<Vec<u8>>;
}

/// The general-purpose heap.
#[derive(Clone, Copy, Debug, Default)]
pub struct Global;

impl SurfaceAllocator for Global {
    fn allocate(&self, len: usize) -> Option<Vec<u8>> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len).ok()?;
        buf.resize(len, 0);
        Some(buf)
    }
}
