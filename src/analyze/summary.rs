use crate::types::scoring::{Breakdown, CategoryScore, Grade, Score};

/// One to two sentences describing overall health, keyed on the grade and
/// the strongest and weakest categories. D and F never call an area strong.
pub fn summarize(score: Score, breakdown: &Breakdown) -> String {
    let grade = Grade::of(score);
    let strongest = breakdown.strongest();
    let weakest = breakdown.weakest();

    if strongest.value == weakest.value {
        return format!(
            "{} repository health at {score}/100 (grade {grade}), with every category at {}/100.",
            health(grade),
            strongest.value
        );
    }

    let opening = format!("{} repository health at {score}/100 (grade {grade}).", health(grade));
    let detail = match grade {
        Grade::A => format!(
            "{} leads at {}; {} is the least developed area at {}.",
            strongest.category.label(),
            out_of_hundred(strongest),
            weakest.category,
            out_of_hundred(weakest)
        ),
        Grade::B => format!(
            "{} is the strongest area at {}, while {} has the most room to improve at {}.",
            strongest.category.label(),
            out_of_hundred(strongest),
            weakest.category,
            out_of_hundred(weakest)
        ),
        Grade::C => format!(
            "{} holds up best at {}, but {} lags at {} and should come first.",
            strongest.category.label(),
            out_of_hundred(strongest),
            weakest.category,
            out_of_hundred(weakest)
        ),
        Grade::D => format!(
            "{} is the main gap at {}; the highest sub-score, {} at {}, does not offset it.",
            weakest.category.label(),
            out_of_hundred(weakest),
            strongest.category,
            out_of_hundred(strongest)
        ),
        Grade::F => format!(
            "{} sits at {}, and the highest sub-score, {} at {}, is not enough to lift the overall result.",
            weakest.category.label(),
            out_of_hundred(weakest),
            strongest.category,
            out_of_hundred(strongest)
        ),
    };
    format!("{opening} {detail}")
}

fn health(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "Excellent",
        Grade::B => "Solid",
        Grade::C => "Fair",
        Grade::D => "Weak",
        Grade::F => "Poor",
    }
}

fn out_of_hundred(score: CategoryScore) -> String {
    format!("{}/100", score.value)
}
