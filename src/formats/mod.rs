//! Binary codecs for the two Dark Seed asset formats.
//!
//! Both are byte-exact legacy layouts; every encode path reproduces the
//! original files down to their irregularities.

pub mod nsp;
pub mod sprite;
pub mod tostext;
