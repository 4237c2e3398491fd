use squatcore::FeedbackMessage;

/// English display text for a feedback tag; `None` when nothing should show.
pub fn display_text(message: FeedbackMessage) -> Option<&'static str> {
    match message {
        FeedbackMessage::InsufficientVisibility => {
            Some("Make sure your whole body is visible to the camera")
        }
        FeedbackMessage::WarmingUp => Some("Collecting data, please wait..."),
        FeedbackMessage::TooFast => Some("Slow down and control the movement"),
        FeedbackMessage::NotLowEnough => Some("Squat lower"),
        FeedbackMessage::BackNotStraight => Some("Keep your back straight"),
        FeedbackMessage::Ready => Some("Ready, start squatting"),
        FeedbackMessage::None => None,
    }
}
