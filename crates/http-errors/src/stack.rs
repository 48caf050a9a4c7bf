//! Call-site capture independent of any error value.
//!
//! An error handed to [`send_http_error`](crate::send_http_error) may have been
//! built on another task or thread, so its own stack points at wherever it was
//! created. [`capture_call_site`] records where the caller is *now*, so the
//! report can say which handler gave up on the request.
//!
//! Frames are captured unresolved and symbolised on first use.

use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use backtrace::Backtrace;
use serde::{Serialize, Serializer};

const CALL_SITE_BOUNDARY: &str = concat!(module_path!(), "::capture_call_site");

/// Frames that belong to the capture itself, whatever the caller's boundary.
const CAPTURE_MACHINERY: [&str; 2] = ["backtrace::", concat!(module_path!(), "::CallSite::")];

/// A single symbolised stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Demangled function path, without the symbol hash.
    pub function: String,
    pub file: Option<PathBuf>,
    pub line: Option<u32>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.function)?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "\n       at {}:{line}", file.display()),
            (Some(file), None) => write!(f, "\n       at {}", file.display()),
            _ => Ok(()),
        }
    }
}

/// Stack captured at a chosen synchronous point.
///
/// The leading frames of the capture machinery and of the caller's boundary
/// are trimmed, so the first frame is the code that asked for the capture.
pub struct CallSite {
    trace: Backtrace,
    boundary: &'static str,
    resolved: OnceLock<Vec<Frame>>,
}

impl CallSite {
    /// Capture the current stack, trimming the leading run of frames that are
    /// either capture machinery or start with the `boundary` path prefix.
    #[inline(never)]
    pub(crate) fn capture_below(boundary: &'static str) -> Self {
        Self {
            trace: Backtrace::new_unresolved(),
            boundary,
            resolved: OnceLock::new(),
        }
    }

    /// The frames from the capturing caller outward.
    pub fn frames(&self) -> &[Frame] {
        self.resolved.get_or_init(|| {
            let mut trace = self.trace.clone();
            trace.resolve();
            trim_to_boundary(symbolise(&trace), self.boundary)
        })
    }

    /// Name of the innermost retained frame, if any.
    pub fn first_function(&self) -> Option<&str> {
        self.frames().first().map(|frame| frame.function.as_str())
    }

    /// Returns `true` if any retained frame's function path contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.frames().iter().any(|frame| frame.function.contains(needle))
    }
}

/// Capture the stack of whoever calls this function.
///
/// The returned [`CallSite`] excludes this function's own frame and the
/// capture machinery below it; its first frame is the caller.
#[inline(never)]
pub fn capture_call_site() -> CallSite {
    CallSite::capture_below(CALL_SITE_BOUNDARY)
}

fn symbolise(trace: &Backtrace) -> Vec<Frame> {
    let mut frames = Vec::new();
    for frame in trace.frames() {
        let symbols = frame.symbols();
        if symbols.is_empty() {
            frames.push(Frame {
                function: format!("<unknown at {:?}>", frame.ip()),
                file: None,
                line: None,
            });
            continue;
        }
        // Inlined calls show up as several symbols on one physical frame.
        for symbol in symbols {
            frames.push(Frame {
                function: symbol
                    .name()
                    .map(|name| format!("{name:#}"))
                    .unwrap_or_else(|| "<unknown>".to_owned()),
                file: symbol.filename().map(PathBuf::from),
                line: symbol.lineno(),
            });
        }
    }
    frames
}

fn is_capture_frame(frame: &Frame, boundary: &str) -> bool {
    // Trait impls demangle as `<path as Trait>::method`.
    let path = frame.function.trim_start_matches('<');
    path.starts_with(boundary) || CAPTURE_MACHINERY.iter().any(|prefix| path.starts_with(prefix))
}

/// Drop leading frames through the last frame of the first run of capture
/// frames.
///
/// Optimised builds may fold the boundary function into a tail call, so any
/// capture frame ends the run, not only `boundary` itself. Without symbols
/// nothing matches and the full stack is kept.
fn trim_to_boundary(frames: Vec<Frame>, boundary: &str) -> Vec<Frame> {
    let mut end = 0;
    for (idx, frame) in frames.iter().enumerate() {
        if is_capture_frame(frame, boundary) {
            end = idx + 1;
        } else if end > 0 {
            break;
        }
    }
    frames.into_iter().skip(end).collect()
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, frame) in self.frames().iter().enumerate() {
            if idx > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{idx:>4}: {frame}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallSite")
            .field("first_function", &self.first_function())
            .field("depth", &self.frames().len())
            .finish()
    }
}

impl Serialize for CallSite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(function: &str) -> Frame {
        Frame {
            function: function.into(),
            file: None,
            line: None,
        }
    }

    #[inline(never)]
    fn named_caller() -> CallSite {
        let site = capture_call_site();
        // Keeps this frame out of a tail call in release builds.
        std::hint::black_box(&site);
        site
    }

    #[test]
    fn first_frame_is_the_caller() {
        let site = named_caller();
        let first = site.first_function().unwrap();
        assert!(first.ends_with("named_caller"), "first frame was {first}");
        assert!(!site.mentions("capture_call_site"));
        assert!(!site.mentions("Backtrace::new_unresolved"));
    }

    #[test]
    fn display_numbers_frames_from_zero() {
        let site = named_caller();
        let rendered = site.to_string();
        let first_line = rendered.lines().next().unwrap();
        assert!(first_line.trim_start().starts_with("0: "), "{first_line}");
        assert!(first_line.contains("named_caller"));
    }

    #[test]
    fn trim_skips_through_boundary_run() {
        let frames = vec![
            frame("backtrace::capture::Backtrace::new_unresolved"),
            frame("my_crate::stack::capture_call_site"),
            frame("my_crate::stack::capture_call_site"),
            frame("my_crate::dispatch::report"),
            frame("main"),
        ];
        let trimmed = trim_to_boundary(frames, "my_crate::stack::capture_call_site");
        assert_eq!(trimmed, vec![frame("my_crate::dispatch::report"), frame("main")]);
    }

    #[test]
    fn trim_skips_machinery_when_boundary_frame_was_folded() {
        // Release builds: `capture_call_site` tail-calls `capture_below`.
        let frames = vec![
            frame("backtrace::capture::Backtrace::create"),
            frame("http_errors::stack::CallSite::capture_below"),
            frame("http_errors::dispatch::send_http_error"),
            frame("main"),
        ];
        let trimmed = trim_to_boundary(frames, CALL_SITE_BOUNDARY);
        assert_eq!(trimmed[0], frame("http_errors::dispatch::send_http_error"));
    }

    #[test]
    fn trim_skips_unsymbolised_frames_before_machinery() {
        let frames = vec![
            frame("<unknown>"),
            frame("backtrace::backtrace::libunwind::trace"),
            frame("<backtrace::capture::Backtrace>::new_unresolved"),
            frame("http_errors::stack::capture_call_site"),
            frame("app::handler"),
            frame("backtrace::unrelated_later_frame"),
        ];
        let trimmed = trim_to_boundary(frames, CALL_SITE_BOUNDARY);
        assert_eq!(
            trimmed,
            vec![frame("app::handler"), frame("backtrace::unrelated_later_frame")]
        );
    }

    #[test]
    fn first_frame_is_never_capture_machinery() {
        let site = named_caller();
        let first = site.first_function().unwrap();
        assert!(!first.starts_with("backtrace::"), "first frame was {first}");
        assert!(!first.starts_with("http_errors::stack::CallSite::"), "first frame was {first}");
        assert!(!first.starts_with(CALL_SITE_BOUNDARY), "first frame was {first}");
    }

    #[test]
    fn trim_keeps_everything_without_boundary() {
        let frames = vec![frame("<unknown>"), frame("<unknown>")];
        assert_eq!(trim_to_boundary(frames.clone(), "capture_call_site"), frames);
    }

    #[test]
    fn serialises_as_rendered_text() {
        let site = named_caller();
        let json = serde_json::to_value(&site).unwrap();
        assert_eq!(json.as_str().unwrap(), site.to_string());
    }
}
