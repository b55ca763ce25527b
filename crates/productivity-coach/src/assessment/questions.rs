use serde::Serialize;

/// Forced-choice question with four labelled options.
///
/// `reversed` questions list their options from best to worst habit, so the
/// scorer inverts them to keep a higher score meaning a higher risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt: &'static str,
    pub options: [&'static str; 4],
    pub reversed: bool,
}

impl Question {
    /// Option label for a 1-based choice, if it exists.
    pub fn option(&self, choice: u8) -> Option<&'static str> {
        let index = usize::from(choice).checked_sub(1)?;
        self.options.get(index).copied()
    }
}

/// Free-text follow-up asked after the forced-choice block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DescriptiveQuestion {
    pub key: &'static str,
    pub prompt: &'static str,
}

const FREQUENCY: [&str; 4] = ["Rarely", "Sometimes", "Often", "Almost Always"];
const FREQUENCY_REVERSED: [&str; 4] = ["Almost Always", "Often", "Sometimes", "Rarely"];

const fn forward(prompt: &'static str) -> Question {
    Question {
        prompt,
        options: FREQUENCY,
        reversed: false,
    }
}

const fn reversed(prompt: &'static str) -> Question {
    Question {
        prompt,
        options: FREQUENCY_REVERSED,
        reversed: true,
    }
}

pub static QUESTIONS: [Question; 10] = [
    forward("How often do you plan your day in the morning?"),
    forward("How often do you get distracted by social media or notifications at work?"),
    reversed("How often do you finish your most important task of the day?"),
    forward("How often do you feel overwhelmed by your to-do list?"),
    reversed("How often do you take scheduled breaks (like the Pomodoro Technique)?"),
    forward("How often do you feel mentally exhausted at the end of the day?"),
    forward("How often do you work late or on weekends to catch up?"),
    reversed("How often do you feel a sense of accomplishment from your work?"),
    forward("How often do you struggle to start a new task (procrastinate)?"),
    reversed("How often do you feel you have your energy levels under control?"),
];

pub static DESCRIPTIVE_QUESTIONS: [DescriptiveQuestion; 2] = [
    DescriptiveQuestion {
        key: "challenge",
        prompt: "Describe your biggest productivity challenge.",
    },
    DescriptiveQuestion {
        key: "focus_time",
        prompt: "When do you feel most focused and energized during the day?",
    },
];
