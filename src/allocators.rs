//! Helper traits for allocator trait bounds.
pub use isokin_traits::allocators::*;
