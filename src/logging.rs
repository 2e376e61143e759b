//! Structured `event=<name> component=<part> key=value...` log lines.
//!
//! Everything goes to the single `rockwrap` target through the `log` facade;
//! the crate never installs a logger. Key and value bytes are never
//! formatted, only paths, flags and engine messages.

pub(crate) const LOG_TARGET: &str = "rockwrap";

macro_rules! rockwrap_log {
    ($level:expr, $component:literal, $event:literal, $fmt:literal $(, $args:expr)* $(,)?) => {{
        if log::log_enabled!(target: crate::logging::LOG_TARGET, $level) {
            log::log!(
                target: crate::logging::LOG_TARGET,
                $level,
                concat!("event=", $event, " component=", $component, " ", $fmt)
                $(, $args)*
            );
        }
    }};
}

pub(crate) use rockwrap_log;
