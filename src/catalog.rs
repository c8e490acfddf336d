/// Number of days in the learning plan.
pub const TOTAL_DAYS: u32 = 20;

pub const TOPICS: [&str; TOTAL_DAYS as usize] = [
    "Day 1 – What is Python, print, input/output",
    "Day 2 – Variables, data types, operators",
    "Day 3 – If-else, loops",
    "Day 4 – Functions",
    "Day 5 – Mini project – calculator",
    "Day 6 – Lists and tuples",
    "Day 7 – Dictionaries and sets",
    "Day 8 – Strings and loops",
    "Day 9 – Error handling",
    "Day 10 – Mini project – quiz or word counter",
    "Day 11 – NumPy basics",
    "Day 12 – Pandas (dataframes)",
    "Day 13 – Data filtering",
    "Day 14 – Matplotlib visualization",
    "Day 15 – CSV analysis mini-project",
    "Day 16 – What is Machine Learning",
    "Day 17 – Install Scikit-learn",
    "Day 18 – Linear regression example",
    "Day 19 – Decision Tree example",
    "Day 20 – Mini project – predict house prices",
];

pub const QUOTES: [&str; 8] = [
    "Keep coding — your AI skills are growing! 💻",
    "Small steps today, big AI tomorrow! 🚀",
    "You're building something amazing! 🌟",
    "Every line of code makes you stronger! 💪",
    "Learning Python is your superpower! ⚡",
    "Progress over perfection! 📈",
    "You've got this! Keep going! 🎯",
    "Future AI expert in the making! 🤖",
];

pub fn is_valid_day(day: u32) -> bool {
    (1..=TOTAL_DAYS).contains(&day)
}

/// Topic label for a 1-based day, if the day is in the plan.
pub fn topic(day: u32) -> Option<&'static str> {
    if !is_valid_day(day) {
        return None;
    }
    TOPICS.get(day as usize - 1).copied()
}
