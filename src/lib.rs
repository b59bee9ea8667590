//! Composable orderings and bounded top-k selection.
//!
//! An [`Ordering`] is an immutable comparison over some type `T` that can be
//! combined into new orderings:
//! - [`reverse`](Ordering::reverse), the opposite order.
//! - [`nulls_first`](Ordering::nulls_first) and
//!   [`nulls_last`](Ordering::nulls_last), orderings over `Option<T>`.
//! - [`on_result_of`](Ordering::on_result_of), ordering by a derived key.
//! - [`compound`](Ordering::compound), breaking ties with another ordering.
//! - [`lexicographical`](Ordering::lexicographical), ordering sequences
//!   element by element.
//!
//! Every ordering implements [`Comparator`], which derives `min`, `max`,
//! sorting, searching and top-k selection from a single `compare`. Plain
//! closures implement it too, so they can be used anywhere an ordering is
//! expected.
//!
//! ```
//! use ordering::prelude::*;
//!
//! let by_len = Ordering::natural().on_result_of(|s: &String| s.len());
//! let words = ["kiwi", "fig", "banana", "apple"].map(String::from);
//!
//! let least = by_len.least_of(words.clone(), 2).unwrap();
//! assert_eq!(&least[..], ["fig", "kiwi"]);
//!
//! let longest = by_len.max_of(words).unwrap();
//! assert_eq!(longest, "banana");
//! ```
//!
//! Comparing never panics on bad input, instead the error is returned. The
//! only ordering that can fail is [`Ordering::explicit`], which can't compare
//! values it wasn't built with. A failure aborts the enclosing sort or search.

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod comparator;
mod error;
pub mod ordering;
mod sort;
pub mod top_k;

pub use comparator::{Comparator, Reversed};
pub use error::{Error, Result};
pub use ordering::Ordering;
pub use top_k::{Selection, TopKSelector};

/// Commonly used traits and types
pub mod prelude {
    pub use super::{Comparator, Ordering};
}

#[cfg(test)]
mod tests {
    use quickcheck::{Arbitrary, Gen};
    use rand::{SeedableRng, rngs::StdRng};

    // `Gen` contains a rng, but it's a private member so this method is used to get
    // a standard rng generated from `Gen`
    pub fn std_rng(g: &mut Gen) -> StdRng {
        let mut seed = [0u8; 32];
        for i in 0..32 {
            seed[i] = Arbitrary::arbitrary(g);
        }
        StdRng::from_seed(seed)
    }
}
