//! Debug output shim.
//!
//! Development builds print progress (sensor readings, connection steps)
//! that production nodes must not pay for. The `debug` Cargo feature is the
//! switch:
//!
//! - on: [`debug_print!`], [`debug_println!`] and [`debug_block!`] run and
//!   write to a [`DebugSink`] (the logging backend unless a sink is given)
//! - off: they expand to `if false { .. }`, so arguments are still
//!   type-checked but no code survives optimization and nothing is printed
//!
//! # Usage
//!
//! ```rust
//! use climate_node::{debug_block, debug_print, debug_println};
//! use climate_node::debug::FmtSink;
//!
//! let temperature = 21.5;
//! debug_print!("T = ");
//! debug_println!("{} C", temperature);
//!
//! // Explicit sink, e.g. a UART writer
//! let mut serial = FmtSink::new(heapless::String::<64>::new());
//! debug_println!(serial => "T = {} C", temperature);
//!
//! debug_block!(
//!     let doubled = temperature * 2.0;
//!     debug_println!("2T = {}", doubled);
//! );
//! ```

use core::fmt;

/// Whether the crate was built with the `debug` feature.
pub const ENABLED: bool = cfg!(feature = "debug");

/// Destination for debug output.
pub trait DebugSink {
    /// Write a formatted message without a line terminator.
    fn write_args(&mut self, args: fmt::Arguments<'_>);

    /// Write a formatted message followed by a line terminator.
    fn write_line(&mut self, args: fmt::Arguments<'_>) {
        self.write_args(args);
        self.write_args(format_args!("\n"));
    }
}

impl<S: DebugSink + ?Sized> DebugSink for &mut S {
    fn write_args(&mut self, args: fmt::Arguments<'_>) {
        (**self).write_args(args);
    }

    fn write_line(&mut self, args: fmt::Arguments<'_>) {
        (**self).write_line(args);
    }
}

/// Sends debug output to the logging backend at debug level.
///
/// Every call becomes one log record, so `write_line` does not add a
/// terminator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DebugSink for LogSink {
    fn write_args(&mut self, args: fmt::Arguments<'_>) {
        #[cfg(not(feature = "defmt"))]
        node_log!(debug, "{}", args);
        #[cfg(feature = "defmt")]
        node_log!(debug, "{}", defmt::Display2Format(&args));
    }

    fn write_line(&mut self, args: fmt::Arguments<'_>) {
        self.write_args(args);
    }
}

/// Writes debug output into any [`fmt::Write`] target: a serial port
/// wrapper, a `heapless::String` buffer, ...
///
/// Write errors (a full buffer) are dropped; debug output has no failure path.
#[derive(Debug, Clone, Default)]
pub struct FmtSink<W> {
    inner: W,
}

impl<W: fmt::Write> FmtSink<W> {
    /// Wrap a writer.
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Borrow the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: fmt::Write> DebugSink for FmtSink<W> {
    fn write_args(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.inner.write_fmt(args);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DebugSink for NullSink {
    #[inline]
    fn write_args(&mut self, _args: fmt::Arguments<'_>) {}

    #[inline]
    fn write_line(&mut self, _args: fmt::Arguments<'_>) {}
}

/// Sink used by the macros when none is given.
#[cfg(feature = "debug")]
pub type DefaultSink = LogSink;

/// Sink used by the macros when none is given.
#[cfg(not(feature = "debug"))]
pub type DefaultSink = NullSink;

/// Print debug output without a line terminator.
///
/// `debug_print!("fmt", args..)` writes to [`DefaultSink`];
/// `debug_print!(sink => "fmt", args..)` writes to `sink`.
#[macro_export]
#[cfg(feature = "debug")]
macro_rules! debug_print {
    ($sink:expr => $($arg:tt)+) => {
        $crate::debug::DebugSink::write_args(&mut $sink, ::core::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::debug::DebugSink::write_args(
            &mut <$crate::debug::DefaultSink as ::core::default::Default>::default(),
            ::core::format_args!($($arg)+),
        )
    };
}

#[macro_export]
#[cfg(not(feature = "debug"))]
macro_rules! debug_print {
    ($sink:expr => $($arg:tt)+) => {
        if false {
            let _ = &mut $sink;
            let _ = ::core::format_args!($($arg)+);
        }
    };
    ($($arg:tt)+) => {
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    };
}

/// Print debug output followed by a line terminator.
///
/// Same forms as [`debug_print!`].
#[macro_export]
#[cfg(feature = "debug")]
macro_rules! debug_println {
    ($sink:expr => $($arg:tt)+) => {
        $crate::debug::DebugSink::write_line(&mut $sink, ::core::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::debug::DebugSink::write_line(
            &mut <$crate::debug::DefaultSink as ::core::default::Default>::default(),
            ::core::format_args!($($arg)+),
        )
    };
}

#[macro_export]
#[cfg(not(feature = "debug"))]
macro_rules! debug_println {
    ($sink:expr => $($arg:tt)+) => {
        if false {
            let _ = &mut $sink;
            let _ = ::core::format_args!($($arg)+);
        }
    };
    ($($arg:tt)+) => {
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    };
}

/// Run a block of statements only in debug builds.
#[macro_export]
#[cfg(feature = "debug")]
macro_rules! debug_block {
    ($($body:tt)*) => {{
        $($body)*
    }};
}

#[macro_export]
#[cfg(not(feature = "debug"))]
macro_rules! debug_block {
    ($($body:tt)*) => {
        if false {
            $($body)*
        }
    };
}
