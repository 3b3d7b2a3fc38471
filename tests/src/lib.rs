//! End-to-end checks of the palm analyzer against stub remote services.

#[cfg(test)]
mod util;

#[cfg(test)]
mod fallback_test;
#[cfg(test)]
mod lifecycle_test;
#[cfg(test)]
mod remote_test;
