//! Values a sequence may hold.

/// A sortable value with an integer projection.
///
/// `key` is what observers see and what counting sort buckets by. It must
/// agree with `Ord`: `a < b` implies `a.key() <= b.key()`.
pub trait Element: Copy + Ord + Send + Sync + 'static {
    fn key(&self) -> i64;
}

macro_rules! impl_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                #[inline]
                fn key(&self) -> i64 {
                    *self as i64
                }
            }
        )*
    };
}

impl_element!(i8, i16, i32, i64, u8, u16, u32);

/// Keys of a slice, for publishing.
pub fn keys<T: Element>(values: &[T]) -> Vec<i64> {
    values.iter().map(Element::key).collect()
}

/// Whether `values` is non-decreasing.
pub fn is_sorted<T: Ord>(values: &[T]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}
