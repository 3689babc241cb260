use std::sync::atomic::{AtomicUsize, Ordering};

/// Largest id a loaded document may carry; leaves room for new ids after it
pub const MAX_SHAPE_ID: usize = usize::MAX / 2;

// Single static counter for all shapes
static NEXT_SHAPE_ID: AtomicUsize = AtomicUsize::new(1);

pub fn generate_id() -> usize {
    NEXT_SHAPE_ID.fetch_add(1, Ordering::SeqCst)
}

/// Make sure ids handed out from now on never collide with `id`.
///
/// Needed after loading a document whose shapes carry ids from a previous run.
pub fn reserve_through(id: usize) {
    NEXT_SHAPE_ID.fetch_max(id.saturating_add(1), Ordering::SeqCst);
}
