/// Debug logging for the diff pipeline, enabled in test mode or with the `debug_diff` feature
///
/// # Usage
/// ```rust,ignore
/// debug_log!("found block {:?}", block);
/// ```
#[cfg(any(test, feature = "debug_diff"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}

#[cfg(not(any(test, feature = "debug_diff")))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}
