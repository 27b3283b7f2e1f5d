//! Cross-crate scenarios for the search engine. Everything lives behind
//! `cfg(test)`; the library itself is empty.

#[cfg(test)]
mod search;
#[cfg(test)]
mod util;
