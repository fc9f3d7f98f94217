use rand::seq::SliceRandom;

use crate::surface::StatusKey;

pub const MOTIVATIONAL_MESSAGES: [&str; 8] = [
    "You've got this! Kuromi believes in you!",
    "Stay focused! Every second counts!",
    "You're doing amazing! Keep going!",
    "Focus mode activated! You're unstoppable!",
    "Breathe deep and concentrate!",
    "Your future self will thank you!",
    "Kuromi's cheering you on! Ganbatte!",
    "Success is built one focused session at a time!",
];

pub const SESSION_COMPLETE: &str = "Session Complete! Great job studying!";

pub fn status_message(status: StatusKey) -> &'static str {
    match status {
        StatusKey::Ready => "Ready to focus!",
        StatusKey::Running => "Stay focused! You're doing great!",
        StatusKey::Paused => "Take a breath, resume when ready!",
        StatusKey::Completed => "Session complete! Well done!",
        StatusKey::Urgent => "Final countdown! Push through!",
    }
}

pub fn random_motivation() -> &'static str {
    MOTIVATIONAL_MESSAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(MOTIVATIONAL_MESSAGES[0])
}
