//! Built-in catalog entries

use super::{Calculator, Category};

fn category(id: &str, name: &str, description: &str, icon: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
    }
}

fn calculator(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    icon: &str,
    is_new: bool,
    is_popular: bool,
) -> Calculator {
    Calculator {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        icon: icon.to_string(),
        is_new,
        is_popular,
    }
}

pub(super) fn categories() -> Vec<Category> {
    vec![
        category("finance", "Finance", "Loans, savings, interest and taxes", "$"),
        category("math", "Math", "Arithmetic, algebra and number theory", "∑"),
        category("health", "Health & Fitness", "Body metrics, nutrition and training", "♥"),
        category("conversion", "Conversion", "Units, currencies and number bases", "⇄"),
        category("date-time", "Date & Time", "Durations, ages and calendars", "◷"),
        category("everyday", "Everyday", "Tips, fuel, cooking and more", "☀"),
    ]
}

pub(super) fn calculators() -> Vec<Calculator> {
    vec![
        calculator("loan", "Loan Calculator", "Monthly payment and total interest for a fixed-rate loan", "finance", "$", false, true),
        calculator("mortgage", "Mortgage Calculator", "Mortgage payments with a full amortization schedule", "finance", "⌂", true, true),
        calculator("compound-interest", "Compound Interest", "Growth of savings with periodic compounding", "finance", "%", false, true),
        calculator("income-tax", "Income Tax", "Estimate income tax owed or refunded", "finance", "§", true, false),
        calculator("savings-goal", "Savings Goal", "How much to save each month to reach a target", "finance", "◎", false, false),
        calculator("factorial", "Factorial", "n! for large integers", "math", "!", false, false),
        calculator("percentage", "Percentage", "Percent of, percent change and percent difference", "math", "%", false, true),
        calculator("quadratic", "Quadratic Equation", "Real and complex roots of ax² + bx + c", "math", "x²", false, false),
        calculator("gcd-lcm", "GCD & LCM", "Greatest common divisor and least common multiple", "math", "÷", true, false),
        calculator("fraction", "Fraction Calculator", "Add, subtract, multiply and simplify fractions", "math", "½", false, false),
        calculator("bmi", "BMI Calculator", "Body mass index from height and weight", "health", "♥", false, true),
        calculator("calorie", "Calorie Needs", "Daily calorie needs from activity level", "health", "♨", false, false),
        calculator("body-fat", "Body Fat", "Body fat percentage using the Navy method", "health", "◐", true, false),
        calculator("pace", "Running Pace", "Pace, distance and finish time for runs", "health", "➶", false, false),
        calculator("length", "Length Converter", "Metric and imperial length units", "conversion", "↔", false, false),
        calculator("temperature", "Temperature Converter", "Celsius, Fahrenheit and Kelvin", "conversion", "°", false, true),
        calculator("number-base", "Number Base", "Binary, octal, decimal and hexadecimal", "conversion", "#", true, false),
        calculator("age", "Age Calculator", "Exact age in years, months and days", "date-time", "◷", false, true),
        calculator("date-diff", "Date Difference", "Days, weeks and weekdays between two dates", "date-time", "⇥", false, false),
        calculator("time-zone", "Time Zone Converter", "Convert a time between world time zones", "date-time", "◍", true, false),
        calculator("tip", "Tip Calculator", "Tip and split the bill between friends", "everyday", "✎", false, true),
        calculator("fuel-cost", "Fuel Cost", "Trip fuel cost from distance and consumption", "everyday", "⛽", false, false),
        calculator("recipe-scaler", "Recipe Scaler", "Scale ingredient amounts to a new serving count", "everyday", "☕", true, false),
    ]
}
