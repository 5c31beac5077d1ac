//! Helper macros.

/// Returns the offset of a field in a `struct`.
///
/// ```rust
/// # #[macro_use] extern crate glitter;
/// #[repr(C)]
/// struct Vertex {
///     position: [f32; 2],
///     color: [f32; 3],
/// }
///
/// # fn main() {
/// assert_eq!(0, offset_of!(Vertex::position));
/// assert_eq!(8, offset_of!(Vertex::color));
/// # }
/// ```
#[macro_export]
macro_rules! offset_of {
    ($ty:ident::$field:ident) => {
        {
            let uninit = ::std::mem::MaybeUninit::<$ty>::uninit();
            let base = uninit.as_ptr();
            #[allow(unused_unsafe)]
            let field = unsafe { ::std::ptr::addr_of!((*base).$field) };
            field as usize - base as usize
        }
    };
}
