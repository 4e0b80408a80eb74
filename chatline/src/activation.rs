use crate::{DatagramSink, Dispatch, Result, TextSurface};

/// Reacts to the user pressing a button. The surface is handed in on every call; handlers
/// hold no reference to it.
pub trait ActivationHandler {
    fn activate(&mut self, surface: &mut dyn TextSurface) -> Result<Dispatch>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    Processing,
}

/// The "Send" button: trims the surface, sends what is left, then clears the surface.
///
/// Input that trims to nothing is ignored and the surface is left as it was. A failed send
/// also leaves the surface alone so the message is not lost.
#[derive(Debug)]
pub struct SendButton<S> {
    sink: S,
    state: ButtonState,
}

impl<S: DatagramSink> SendButton<S> {
    pub const LABEL: &'static str = "Send";

    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: ButtonState::Idle,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: DatagramSink> ActivationHandler for SendButton<S> {
    fn activate(&mut self, surface: &mut dyn TextSurface) -> Result<Dispatch> {
        self.state = ButtonState::Processing;
        let result = self.sink.send_text(&surface.text());
        self.state = ButtonState::Idle;

        let dispatch = result?;
        if let Dispatch::Sent(_) = dispatch {
            surface.clear();
        }
        Ok(dispatch)
    }
}
