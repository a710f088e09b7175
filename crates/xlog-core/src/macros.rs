//! Emission macros
//!
//! `debug!`, `info!`, `warn!` and `error!` take `format!`-style arguments.
//! Without a `logger:` prefix they go through the process-wide logger:
//!
//! ```ignore
//! xlog_core::info!("accepted {} connections", n);
//! xlog_core::warn!(logger: &handle, "queue at {}%", pct);
//! ```
//!
//! The gate is checked before the arguments are evaluated, and the caller's
//! file and line end up in the line because the macros expand in place.
//!
//! Events are handed straight to the logger's dispatcher through a static
//! callsite, so `tracing`'s compile-time level caps (`max_level_*`) never
//! filter them; the facade's own gate is the only one.

#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__log!(logger: $logger, Debug, DEBUG, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log!(Debug, DEBUG, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__log!(logger: $logger, Info, INFO, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log!(Info, INFO, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__log!(logger: $logger, Warn, WARN, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log!(Warn, WARN, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__log!(logger: $logger, Error, ERROR, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log!(Error, ERROR, $($arg)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    (logger: $logger:expr, $severity:ident, $level:ident, $($arg:tt)+) => {{
        let logger: &$crate::Logger = $logger;
        if logger.enabled($crate::Severity::$severity) {
            $crate::__log!(@emit logger, $level, $($arg)+);
        }
    }};
    (@emit $logger:ident, $level:ident, $($arg:tt)+) => {{
        static __CALLSITE: $crate::__private::tracing_core::callsite::DefaultCallsite =
            $crate::__private::tracing_core::callsite::DefaultCallsite::new(&__META);
        static __META: $crate::__private::tracing_core::Metadata<'static> =
            $crate::__private::tracing_core::Metadata::new(
                ::core::concat!("event ", ::core::file!(), ":", ::core::line!()),
                ::core::module_path!(),
                $crate::__private::tracing_core::Level::$level,
                ::core::option::Option::Some(::core::file!()),
                ::core::option::Option::Some(::core::line!()),
                ::core::option::Option::Some(::core::module_path!()),
                $crate::__private::tracing_core::field::FieldSet::new(
                    &["message"],
                    $crate::__private::tracing_core::callsite::Identifier(&__CALLSITE),
                ),
                $crate::__private::tracing_core::metadata::Kind::EVENT,
            );
        $logger.emit(&__CALLSITE, &__META, ::core::format_args!($($arg)+));
    }};
    ($severity:ident, $level:ident, $($arg:tt)+) => {{
        if $crate::enabled($crate::Severity::$severity) {
            if let ::core::option::Option::Some(logger) = $crate::global() {
                $crate::__log!(@emit logger, $level, $($arg)+);
            }
        }
    }};
}
