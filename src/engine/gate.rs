/// Callback invoked once when a playback completes.
pub type CompletionCallback = Box<dyn FnOnce()>;

/// Which path completed the playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionSource {
    /// The frame loop reached full progress.
    FrameLoop,
    /// The fallback watchdog forced completion.
    Watchdog,
}

/// How a playback ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Completion fired.
    Completed(CompletionSource),
    /// The host tore the playback down first; completion never fires.
    TornDown,
}

/// Single authority on whether a playback is live, and the only holder of its completion
/// callback.
///
/// Leaving the live state moves the callback out (or drops it), so completion can be observed at
/// most once no matter how many paths race for it.
pub(crate) struct CompletionGate {
    callback: Option<CompletionCallback>,
    outcome: Option<Outcome>,
}

impl CompletionGate {
    pub(crate) fn new(callback: CompletionCallback) -> Self {
        Self {
            callback: Some(callback),
            outcome: None,
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        self.outcome.is_none()
    }

    pub(crate) fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Close the gate as completed. Only the first caller gets the callback.
    pub(crate) fn complete(&mut self, source: CompletionSource) -> Option<CompletionCallback> {
        if !self.is_live() {
            return None;
        }
        self.outcome = Some(Outcome::Completed(source));
        self.callback.take()
    }

    /// Close the gate without completing. Returns `false` if it was already closed.
    pub(crate) fn tear_down(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        self.outcome = Some(Outcome::TornDown);
        self.callback = None;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/gate.rs"]
mod tests;
