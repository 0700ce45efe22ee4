//! Headline activation: click, touch and Enter/Space collapse into one signal.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActivationInput {
    Click,
    TouchStart,
    /// `KeyboardEvent.key` of a keydown.
    Key(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputDecision {
    pub activate: bool,
    pub prevent_default: bool,
}

impl InputDecision {
    const IGNORE: InputDecision = InputDecision { activate: false, prevent_default: false };
}

pub fn classify(input: &ActivationInput) -> InputDecision {
    match input {
        ActivationInput::Click => InputDecision { activate: true, prevent_default: false },
        // Suppress the synthetic click that follows a tap.
        ActivationInput::TouchStart => InputDecision { activate: true, prevent_default: true },
        // Space would otherwise scroll the page.
        ActivationInput::Key(key) if key == "Enter" || key == " " => {
            InputDecision { activate: true, prevent_default: true }
        }
        ActivationInput::Key(_) => InputDecision::IGNORE,
    }
}
