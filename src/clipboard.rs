//! Clipboard output for copied chunks. Writes are fire-and-forget: callers
//! log a failure and carry on.

use crate::error::ClipboardError;

pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard, when built with the `clipboard` feature.
#[derive(Debug, Default)]
pub struct SystemClipboard;

#[cfg(feature = "clipboard")]
impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        use copypasta::{ClipboardContext, ClipboardProvider};

        let mut ctx =
            ClipboardContext::new().map_err(|err| ClipboardError::Backend(err.to_string()))?;
        ctx.set_contents(text.to_owned())
            .map_err(|err| ClipboardError::Backend(err.to_string()))
    }
}

#[cfg(not(feature = "clipboard"))]
impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}

/// Write `text`, logging instead of failing. Returns whether it landed.
pub fn copy_or_warn(sink: &mut dyn ClipboardSink, text: &str) -> bool {
    match sink.write_text(text) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("failed to copy to clipboard: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl ClipboardSink for Recorder {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    struct Broken;

    impl ClipboardSink for Broken {
        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Backend("no display".to_string()))
        }
    }

    #[test]
    fn copy_reports_success_and_failure() {
        let mut recorder = Recorder::default();
        assert!(copy_or_warn(&mut recorder, "chunk"));
        assert_eq!(recorder.0, vec!["chunk"]);
        assert!(!copy_or_warn(&mut Broken, "chunk"));
    }
}
